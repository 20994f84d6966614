#![no_main]

use libfuzzer_sys::arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use pyrmap::{FlatBitmap, LevelPolicy, Pyramid, SearchStrategy, Slot};

// Interesting universe sizes: word and level-count boundaries for all three
// slot widths (u64 pyramids span 1-5 levels here, u8 pyramids 1-9).
const UNIVERSES: [u64; 14] = [
    1,          // single slot everywhere
    8,          // u8 slot boundary
    9,
    64,         // u64 slot boundary
    65,
    512,
    4_096,      // u64 two-level boundary
    4_097,
    32_768,
    262_144,    // u64 three-level boundary
    262_145,
    1_000_000,
    16_777_216, // u64 four-level boundary
    16_777_217,
];

#[derive(Arbitrary, Debug)]
enum Operation {
    Set(u32),
    Contains(u32),
    FirstSet(u32),
    CheckLen,
    CheckIter,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    universe_idx: u8,
    initial: Vec<u32>,
    ops: Vec<Operation>,
}

/// Every configuration of one slot width, mutated in lockstep.
struct Variants<W: Slot> {
    pyramids: Vec<Pyramid<W>>,
}

impl<W: Slot> Variants<W> {
    fn new(universe: u64) -> Self {
        let mut pyramids = Vec::new();
        for policy in [LevelPolicy::Dynamic, LevelPolicy::Fixed] {
            for strategy in [
                SearchStrategy::RecursiveAscend,
                SearchStrategy::RecursiveDescend,
                SearchStrategy::Iterative,
            ] {
                pyramids.push(Pyramid::with_config(universe, policy, strategy));
            }
        }
        Self { pyramids }
    }

    fn set(&mut self, bit: u32) {
        for p in &mut self.pyramids {
            p.set(bit);
        }
    }

    fn check_contains(&self, bit: u32, expected: bool) {
        for p in &self.pyramids {
            assert_eq!(
                p.contains(bit),
                expected,
                "contains({bit}) mismatch, {:?}, {} bit slots",
                p.strategy(),
                W::BITS
            );
        }
    }

    fn check_first_set(&self, from: u32, expected: Option<u32>) {
        for p in &self.pyramids {
            assert_eq!(
                p.first_set(from),
                expected,
                "first_set({from}) mismatch, {:?}, {} bit slots",
                p.strategy(),
                W::BITS
            );
        }
    }

    fn check_len(&self, expected: u64, expected_empty: bool, expected_min: Option<u32>) {
        for p in &self.pyramids {
            assert_eq!(p.len(), expected, "len mismatch, {} bit slots", W::BITS);
            assert_eq!(
                p.is_empty(),
                expected_empty,
                "is_empty mismatch, {} bit slots",
                W::BITS
            );
            assert_eq!(p.min(), expected_min, "min mismatch, {} bit slots", W::BITS);
        }
    }

    fn check_iter(&self, expected: &[u32]) {
        for p in &self.pyramids {
            let vals: Vec<u32> = p.iter().collect();
            assert_eq!(
                vals,
                expected,
                "iter mismatch, {:?}, {} bit slots",
                p.strategy(),
                W::BITS
            );
        }
    }
}

struct Lockstep {
    universe: u64,
    flat: FlatBitmap,
    v8: Variants<u8>,
    v32: Variants<u32>,
    v64: Variants<u64>,
}

impl Lockstep {
    fn new(universe: u64) -> Self {
        Self {
            universe,
            flat: FlatBitmap::new(universe),
            v8: Variants::new(universe),
            v32: Variants::new(universe),
            v64: Variants::new(universe),
        }
    }

    fn set(&mut self, bit: u32) {
        let bit = (u64::from(bit) % self.universe) as u32;
        self.flat.set(bit);
        self.v8.set(bit);
        self.v32.set(bit);
        self.v64.set(bit);
    }
}

fn run(input: &FuzzInput) {
    let universe = UNIVERSES[input.universe_idx as usize % UNIVERSES.len()];
    let mut state = Lockstep::new(universe);

    for &bit in &input.initial {
        state.set(bit);
    }

    for op in &input.ops {
        match *op {
            Operation::Set(bit) => {
                state.set(bit);
            }
            Operation::Contains(bit) => {
                let expected = state.flat.contains(bit);
                state.v8.check_contains(bit, expected);
                state.v32.check_contains(bit, expected);
                state.v64.check_contains(bit, expected);
            }
            Operation::FirstSet(from) => {
                let expected = state.flat.first_set(from);
                state.v8.check_first_set(from, expected);
                state.v32.check_first_set(from, expected);
                state.v64.check_first_set(from, expected);
            }
            Operation::CheckLen => {
                let expected = state.flat.len();
                let expected_empty = state.flat.is_empty();
                let expected_min = state.flat.min();
                state.v8.check_len(expected, expected_empty, expected_min);
                state.v32.check_len(expected, expected_empty, expected_min);
                state.v64.check_len(expected, expected_empty, expected_min);
            }
            Operation::CheckIter => {
                let expected: Vec<u32> = state.flat.iter().collect();
                state.v8.check_iter(&expected);
                state.v32.check_iter(&expected);
                state.v64.check_iter(&expected);
            }
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    run(&input);
});
