use crate::*;

const SMOKE_BITS: [u32; 8] = [1, 9, 62, 63, 64, 65, 88, 280];

const SMOKE_QUERIES: [(u32, Option<u32>); 11] = [
    (0, Some(1)),
    (1, Some(1)),
    (2, Some(9)),
    (9, Some(9)),
    (10, Some(62)),
    (63, Some(63)),
    (64, Some(64)),
    (65, Some(65)),
    (66, Some(88)),
    (89, Some(280)),
    (281, None),
];

const POLICIES: [LevelPolicy; 2] = [LevelPolicy::Dynamic, LevelPolicy::Fixed];

const STRATEGIES: [SearchStrategy; 3] = [
    SearchStrategy::RecursiveAscend,
    SearchStrategy::RecursiveDescend,
    SearchStrategy::Iterative,
];

fn make_pyramid<W: Slot>(
    universe_size: u64,
    bits: &[u32],
    policy: LevelPolicy,
    strategy: SearchStrategy,
) -> Pyramid<W> {
    let mut p = Pyramid::with_config(universe_size, policy, strategy);
    for &b in bits {
        p.set(b);
    }
    p
}

fn smoke<W: Slot>() {
    for policy in POLICIES {
        for strategy in STRATEGIES {
            let p = make_pyramid::<W>(1000, &SMOKE_BITS, policy, strategy);
            for (from, expected) in SMOKE_QUERIES {
                assert_eq!(
                    p.first_set(from),
                    expected,
                    "first_set({from}), {policy:?}/{strategy:?}, {} bit slots",
                    W::BITS
                );
            }
        }
    }
}

#[test]
fn test_smoke_u8() {
    smoke::<u8>();
}

#[test]
fn test_smoke_u32() {
    smoke::<u32>();
}

#[test]
fn test_smoke_u64() {
    smoke::<u64>();
}

#[test]
fn test_levels_dynamic() {
    assert_eq!(Pyramid::<u64>::new(1).levels(), 1);
    assert_eq!(Pyramid::<u64>::new(64).levels(), 1);
    assert_eq!(Pyramid::<u64>::new(65).levels(), 2);
    assert_eq!(Pyramid::<u64>::new(1000).levels(), 2);
    assert_eq!(Pyramid::<u64>::new(4096).levels(), 2);
    assert_eq!(Pyramid::<u64>::new(4097).levels(), 3);

    assert_eq!(Pyramid::<u8>::new(8).levels(), 1);
    assert_eq!(Pyramid::<u8>::new(9).levels(), 2);
    assert_eq!(Pyramid::<u8>::new(1000).levels(), 4);

    assert_eq!(Pyramid::<u32>::new(1000).levels(), 2);
    assert_eq!(Pyramid::<u32>::new(1 << 20).levels(), 4);
}

#[test]
fn test_levels_fixed() {
    // The fixed policy always builds the depth the 2^32 ceiling needs.
    for universe in [1u64, 1000, 1 << 20, MAX_UNIVERSE] {
        assert_eq!(
            Pyramid::<u64>::with_config(universe, LevelPolicy::Fixed, SearchStrategy::default())
                .levels(),
            6
        );
        assert_eq!(
            Pyramid::<u32>::with_config(universe, LevelPolicy::Fixed, SearchStrategy::default())
                .levels(),
            7
        );
        assert_eq!(
            Pyramid::<u8>::with_config(universe, LevelPolicy::Fixed, SearchStrategy::default())
                .levels(),
            11
        );
    }
}

#[test]
fn test_levels_match_levels_for() {
    for universe in [1u64, 7, 8, 9, 63, 64, 65, 511, 512, 513, 4096, 4097, 1_000_000] {
        assert_eq!(
            Pyramid::<u8>::new(universe).levels(),
            levels_for(universe, 3),
            "universe={universe}"
        );
        assert_eq!(
            Pyramid::<u32>::new(universe).levels(),
            levels_for(universe, 5),
            "universe={universe}"
        );
        assert_eq!(
            Pyramid::<u64>::new(universe).levels(),
            levels_for(universe, 6),
            "universe={universe}"
        );
    }
}

#[test]
fn test_empty() {
    let p = Pyramid::<u64>::new(1000);
    assert!(p.is_empty());
    assert_eq!(p.len(), 0);
    assert_eq!(p.min(), None);
    assert_eq!(p.first_set(0), None);
    assert_eq!(p.first_set(999), None);
    assert_eq!(p.iter().count(), 0);
    for bit in 0..1000 {
        assert!(!p.contains(bit));
    }
}

#[test]
fn test_set_and_contains() {
    let mut p = Pyramid::<u64>::new(1000);
    p.set(42);
    assert!(p.contains(42));
    assert!(!p.contains(41));
    assert!(!p.contains(43));
    assert!(!p.is_empty());
    assert_eq!(p.len(), 1);
    assert_eq!(p.min(), Some(42));
}

#[test]
fn test_set_idempotent() {
    let mut p = Pyramid::<u64>::new(1000);
    p.set(42);
    p.set(42);
    p.set(42);
    assert_eq!(p.len(), 1);
    assert_eq!(p.iter().collect::<Vec<_>>(), vec![42]);
}

#[test]
fn test_last_valid_bit() {
    for policy in POLICIES {
        for strategy in STRATEGIES {
            let p = make_pyramid::<u64>(1000, &[999], policy, strategy);
            assert_eq!(p.first_set(999), Some(999));
            assert_eq!(p.first_set(0), Some(999));
            assert_eq!(p.first_set(1000), None);
        }
    }
}

#[test]
fn test_from_past_universe() {
    let p = make_pyramid::<u64>(1000, &SMOKE_BITS, LevelPolicy::Dynamic, SearchStrategy::default());
    assert_eq!(p.first_set(1000), None);
    assert_eq!(p.first_set(5000), None);
    assert_eq!(p.first_set(u32::MAX), None);
}

#[test]
fn test_contains_past_universe() {
    let p = make_pyramid::<u64>(1000, &SMOKE_BITS, LevelPolicy::Dynamic, SearchStrategy::default());
    assert!(!p.contains(1000));
    assert!(!p.contains(u32::MAX));
}

#[test]
fn test_single_word_universe() {
    // One level: a fast-path miss has nowhere to ascend to.
    let mut p = Pyramid::<u64>::new(64);
    assert_eq!(p.levels(), 1);
    p.set(63);
    assert_eq!(p.first_set(0), Some(63));
    assert_eq!(p.first_set(63), Some(63));
    assert_eq!(p.first_set(64), None);
}

#[test]
fn test_bit_in_second_word() {
    // Universe 65 puts one bit capacity in the second level-0 word, so the
    // query has to leave the first word through the summary level.
    for strategy in STRATEGIES {
        let p = make_pyramid::<u64>(65, &[64], LevelPolicy::Dynamic, strategy);
        assert_eq!(p.levels(), 2);
        assert_eq!(p.first_set(0), Some(64), "{strategy:?}");
        assert_eq!(p.first_set(64), Some(64), "{strategy:?}");
    }
}

#[test]
fn test_word_boundary_bits() {
    for w in [63u32, 64, 127, 128, 255, 256, 511, 512] {
        for strategy in STRATEGIES {
            let p = make_pyramid::<u64>(1000, &[w], LevelPolicy::Dynamic, strategy);
            assert_eq!(p.first_set(0), Some(w), "bit {w}, {strategy:?}");
            assert_eq!(p.first_set(w), Some(w), "bit {w}, {strategy:?}");
            assert_eq!(p.first_set(w + 1), None, "bit {w}, {strategy:?}");
        }
    }
}

#[test]
fn test_iter_ascending_order() {
    let mut p = Pyramid::<u64>::new(1000);
    for bit in [511, 0, 255, 1, 63, 64, 8, 7, 256] {
        p.set(bit);
    }
    let result: Vec<u32> = p.iter().collect();
    assert_eq!(result, vec![0, 1, 7, 8, 63, 64, 255, 256, 511]);
}

#[test]
fn test_huge_sparse() {
    // One bit near the end of a 25M universe: the walk has to skip the
    // whole empty prefix through the top levels.
    for strategy in STRATEGIES {
        let p = make_pyramid::<u64>(25_000_000, &[24_999_999], LevelPolicy::Dynamic, strategy);
        assert_eq!(p.first_set(0), Some(24_999_999), "{strategy:?}");
        assert_eq!(p.first_set(24_999_999), Some(24_999_999), "{strategy:?}");
        assert_eq!(p.first_set(12_000_000), Some(24_999_999), "{strategy:?}");
    }

    let p = make_pyramid::<u8>(25_000_000, &[3, 24_999_999], LevelPolicy::Dynamic, SearchStrategy::default());
    assert_eq!(p.first_set(0), Some(3));
    assert_eq!(p.first_set(4), Some(24_999_999));
}

#[test]
fn test_heap_bytes_dominated_by_level0() {
    let p = Pyramid::<u64>::new(1_000_000);
    let level0_bytes = (1_000_000u64.div_ceil(64) * 8) as usize;
    assert!(p.heap_bytes() >= level0_bytes);
    // The summary levels are a geometric series on top of level 0.
    assert!(p.heap_bytes() < level0_bytes + level0_bytes / 32);
}

#[test]
fn test_accessors() {
    let p = Pyramid::<u64>::with_config(1000, LevelPolicy::Fixed, SearchStrategy::Iterative);
    assert_eq!(p.universe_size(), 1000);
    assert_eq!(p.strategy(), SearchStrategy::Iterative);
    assert_eq!(p.levels(), 6);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_set_out_of_bounds() {
    let mut p = Pyramid::<u64>::new(1000);
    p.set(1000);
}

#[test]
#[should_panic(expected = "universe_size")]
fn test_universe_zero() {
    let _ = Pyramid::<u64>::new(0);
}

#[test]
#[should_panic(expected = "universe_size")]
fn test_universe_too_big() {
    let _ = Pyramid::<u64>::new(MAX_UNIVERSE + 1);
}
