use crate::*;

fn make_flat(universe_size: u64, bits: &[u32]) -> FlatBitmap {
    let mut f = FlatBitmap::new(universe_size);
    for &b in bits {
        f.set(b);
    }
    f
}

#[test]
fn test_smoke() {
    let f = make_flat(1000, &[1, 9, 62, 63, 64, 65, 88, 280]);
    assert_eq!(f.first_set(0), Some(1));
    assert_eq!(f.first_set(1), Some(1));
    assert_eq!(f.first_set(2), Some(9));
    assert_eq!(f.first_set(9), Some(9));
    assert_eq!(f.first_set(10), Some(62));
    assert_eq!(f.first_set(63), Some(63));
    assert_eq!(f.first_set(64), Some(64));
    assert_eq!(f.first_set(65), Some(65));
    assert_eq!(f.first_set(66), Some(88));
    assert_eq!(f.first_set(89), Some(280));
    assert_eq!(f.first_set(281), None);
}

#[test]
fn test_empty() {
    let f = FlatBitmap::new(1000);
    assert!(f.is_empty());
    assert_eq!(f.len(), 0);
    assert_eq!(f.first_set(0), None);
    assert_eq!(f.iter().count(), 0);
}

#[test]
fn test_set_and_contains() {
    let f = make_flat(1000, &[0, 42, 999]);
    assert!(f.contains(0));
    assert!(f.contains(42));
    assert!(f.contains(999));
    assert!(!f.contains(1));
    assert!(!f.contains(998));
    assert!(!f.contains(1000));
    assert_eq!(f.len(), 3);
}

#[test]
fn test_set_idempotent() {
    let mut f = FlatBitmap::new(100);
    f.set(7);
    f.set(7);
    assert_eq!(f.len(), 1);
    assert_eq!(f.iter().collect::<Vec<_>>(), vec![7]);
}

#[test]
fn test_boundaries() {
    let f = make_flat(1000, &[999]);
    assert_eq!(f.first_set(999), Some(999));
    assert_eq!(f.first_set(1000), None);
    assert_eq!(f.first_set(u32::MAX), None);
}

#[test]
fn test_iter_ascending_order() {
    let f = make_flat(1000, &[511, 0, 255, 1, 63, 64]);
    assert_eq!(f.iter().collect::<Vec<_>>(), vec![0, 1, 63, 64, 255, 511]);
}

#[test]
fn test_word_boundary_scan() {
    // The scan crosses a word boundary from a non-zero masked word miss.
    let f = make_flat(200, &[10, 130]);
    assert_eq!(f.first_set(11), Some(130));
    assert_eq!(f.first_set(64), Some(130));
    assert_eq!(f.first_set(128), Some(130));
    assert_eq!(f.first_set(131), None);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_set_out_of_bounds() {
    let mut f = FlatBitmap::new(100);
    f.set(100);
}

#[test]
#[should_panic(expected = "universe_size")]
fn test_universe_zero() {
    let _ = FlatBitmap::new(0);
}
