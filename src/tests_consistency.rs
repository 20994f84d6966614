//! Every `{slot width, level policy, search strategy}` combination must
//! return the same answers as the flat reference bitmap, for the same set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::*;

const POLICIES: [LevelPolicy; 2] = [LevelPolicy::Dynamic, LevelPolicy::Fixed];

const STRATEGIES: [SearchStrategy; 3] = [
    SearchStrategy::RecursiveAscend,
    SearchStrategy::RecursiveDescend,
    SearchStrategy::Iterative,
];

/// Compare every pyramid configuration of width `W` against the flat oracle
/// for the given set, querying each position in `queries`.
fn check_against_flat<W: Slot>(universe: u64, bits: &[u32], queries: &[u32]) {
    let mut flat = FlatBitmap::new(universe);
    for &b in bits {
        flat.set(b);
    }

    for policy in POLICIES {
        for strategy in STRATEGIES {
            let mut p = Pyramid::<W>::with_config(universe, policy, strategy);
            for &b in bits {
                p.set(b);
            }

            assert_eq!(p.len(), flat.len());
            assert_eq!(p.is_empty(), flat.is_empty());

            for &from in queries {
                assert_eq!(
                    p.first_set(from),
                    flat.first_set(from),
                    "first_set({from}), universe={universe}, {policy:?}/{strategy:?}, {} bit slots",
                    W::BITS
                );
            }

            let p_vals: Vec<u32> = p.iter().collect();
            let f_vals: Vec<u32> = flat.iter().collect();
            assert_eq!(
                p_vals, f_vals,
                "enumeration, universe={universe}, {policy:?}/{strategy:?}, {} bit slots",
                W::BITS
            );
        }
    }
}

/// Every query position in `0..=universe`, plus a couple past the end.
fn exhaustive_queries(universe: u64) -> Vec<u32> {
    (0..=universe as u32 + 2).collect()
}

/// Query positions around every set bit plus the universe edges.
fn probe_queries(universe: u64, bits: &[u32]) -> Vec<u32> {
    let mut queries = vec![0, (universe / 2) as u32, (universe - 1) as u32];
    for &b in bits {
        queries.push(b.saturating_sub(1));
        queries.push(b);
        if u64::from(b) + 1 < universe {
            queries.push(b + 1);
        }
    }
    queries
}

/// Distinct random bits via rejection against a flat bitmap, the way the
/// original harness generated its test sets. Returned sorted.
fn random_set(universe: u64, count: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = FlatBitmap::new(universe);
    let mut bits = Vec::with_capacity(count);
    while bits.len() < count {
        let x = rng.random_range(0..universe as u32);
        if !seen.contains(x) {
            seen.set(x);
            bits.push(x);
        }
    }
    bits.sort_unstable();
    bits
}

#[test]
fn test_small_universes_exhaustive() {
    let boundary_bits = [
        0u32, 1, 7, 8, 31, 32, 62, 63, 64, 65, 88, 255, 256, 280, 511, 512, 999, 4095, 4096,
    ];

    for universe in [1u64, 8, 9, 64, 65, 512, 513, 1000, 4096, 4097] {
        let bits: Vec<u32> = boundary_bits
            .iter()
            .copied()
            .filter(|&b| u64::from(b) < universe)
            .collect();
        let queries = exhaustive_queries(universe);

        check_against_flat::<u8>(universe, &bits, &queries);
        check_against_flat::<u32>(universe, &bits, &queries);
        check_against_flat::<u64>(universe, &bits, &queries);
    }
}

#[test]
fn test_empty_set_exhaustive() {
    for universe in [1u64, 64, 65, 1000, 4097] {
        let queries = exhaustive_queries(universe);
        check_against_flat::<u8>(universe, &[], &queries);
        check_against_flat::<u32>(universe, &[], &queries);
        check_against_flat::<u64>(universe, &[], &queries);
    }
}

#[test]
fn test_full_universe() {
    for universe in [1u64, 8, 64, 65, 512] {
        let bits: Vec<u32> = (0..universe as u32).collect();
        let queries = exhaustive_queries(universe);
        check_against_flat::<u8>(universe, &bits, &queries);
        check_against_flat::<u64>(universe, &bits, &queries);
    }
}

#[test]
fn test_mid_sparse() {
    let universe = 1_000_000;
    let bits = random_set(universe, 100, 4711);
    let queries = probe_queries(universe, &bits);
    check_against_flat::<u8>(universe, &bits, &queries);
    check_against_flat::<u32>(universe, &bits, &queries);
    check_against_flat::<u64>(universe, &bits, &queries);
}

#[test]
fn test_mid_mid() {
    let universe = 1_000_000;
    let bits = random_set(universe, 10_000, 4712);
    let queries = probe_queries(universe, &bits);
    check_against_flat::<u64>(universe, &bits, &queries);
}

#[test]
fn test_large_sparse() {
    let universe = 10_000_000;
    let bits = random_set(universe, 10, 4713);
    let queries = probe_queries(universe, &bits);
    check_against_flat::<u8>(universe, &bits, &queries);
    check_against_flat::<u64>(universe, &bits, &queries);
}

#[test]
fn test_dense_enumeration() {
    // Half the universe set: every variant must reproduce the generated set
    // exactly, with no omissions or duplicates, via the successor loop.
    let universe = 1_000_000;
    let expected = random_set(universe, 500_000, 4711);

    for strategy in [SearchStrategy::RecursiveAscend, SearchStrategy::Iterative] {
        let mut p = Pyramid::<u64>::with_config(universe, LevelPolicy::Dynamic, strategy);
        for &b in &expected {
            p.set(b);
        }
        assert_eq!(p.len(), expected.len() as u64);

        let mut found = Vec::with_capacity(expected.len());
        let mut last = 0u32;
        while let Some(n) = p.first_set(last) {
            found.push(n);
            last = n + 1;
        }
        assert_eq!(found, expected, "{strategy:?}");
    }
}

#[test]
fn test_monotonic_scan() {
    let universe = 1000;
    let bits = random_set(universe, 40, 99);
    let mut p = Pyramid::<u64>::new(universe);
    for &b in &bits {
        p.set(b);
    }

    let answers: Vec<Option<u32>> = (0..universe as u32).map(|b| p.first_set(b)).collect();
    for b1 in 0..universe as usize {
        let Some(x) = answers[b1] else { continue };
        for b2 in b1..universe as usize {
            if x >= b2 as u32 {
                assert_eq!(answers[b2], Some(x), "first_set({b1})={x}, b2={b2}");
            }
        }
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Kept small enough that exhaustive query sweeps across all variant
    /// configurations stay fast.
    const MAX_UNIVERSE: u64 = 1024;

    /// Strategy: a (universe_size, sorted-deduped bits) pair.
    fn arb_set() -> impl Strategy<Value = (u64, Vec<u32>)> {
        (1u64..=MAX_UNIVERSE).prop_flat_map(|universe| {
            proptest::collection::vec(0..universe as u32, 0..=128).prop_map(move |mut bits| {
                bits.sort_unstable();
                bits.dedup();
                (universe, bits)
            })
        })
    }

    proptest! {
        #[test]
        fn all_variants_match_flat((universe, bits) in arb_set()) {
            let queries = exhaustive_queries(universe);
            check_against_flat::<u8>(universe, &bits, &queries);
            check_against_flat::<u32>(universe, &bits, &queries);
            check_against_flat::<u64>(universe, &bits, &queries);
        }

        #[test]
        fn round_trip_enumeration((universe, bits) in arb_set()) {
            let mut p = Pyramid::<u64>::new(universe);
            for &b in &bits {
                p.set(b);
            }

            let mut found = Vec::new();
            let mut last = 0u32;
            while let Some(n) = p.first_set(last) {
                found.push(n);
                last = n + 1;
            }
            prop_assert_eq!(found, bits);
        }

        #[test]
        fn set_is_idempotent((universe, bits) in arb_set()) {
            let mut once = Pyramid::<u64>::new(universe);
            let mut twice = Pyramid::<u64>::new(universe);
            for &b in &bits {
                once.set(b);
                twice.set(b);
                twice.set(b);
            }
            prop_assert_eq!(once.len(), twice.len());
            prop_assert_eq!(once.iter().collect::<Vec<_>>(), twice.iter().collect::<Vec<_>>());
        }

        #[test]
        fn monotonic_scan((universe, bits) in arb_set()) {
            let mut p = Pyramid::<u64>::new(universe);
            for &b in &bits {
                p.set(b);
            }

            // If first_set(b1) = x, every start in (b1, x] must answer x too.
            let answers: Vec<Option<u32>> = (0..universe as u32).map(|b| p.first_set(b)).collect();
            for b1 in 0..universe as u32 {
                let Some(x) = answers[b1 as usize] else { continue };
                for b2 in [b1, b1 + (x - b1) / 2, x] {
                    prop_assert_eq!(answers[b2 as usize], Some(x), "first_set({})={}, b2={}", b1, x, b2);
                }
            }
        }
    }
}
