use crate::layout::{Layout, LevelPolicy};
use crate::slot::Slot;

/// Maximum number of addressable bits (the 32-bit identifier universe).
pub const MAX_UNIVERSE: u64 = 1 << 32;

/// How `first_set` walks the level stack after a fast-path miss.
///
/// Every strategy returns identical results; they differ in control-flow
/// shape and in which levels they touch. `RecursiveAscend` is the best
/// all-around default. `RecursiveDescend` touches fewer slots on extremely
/// sparse, large universes at the cost of extra levels on medium-density
/// ones.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "allocative", derive(allocative::Allocative))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStrategy {
    /// Recursive walk entering one level above the missed level-0 word.
    #[default]
    RecursiveAscend,
    /// Recursive walk entering at the topmost level.
    RecursiveDescend,
    /// The ascend-first walk as an explicit loop over a level cursor.
    Iterative,
}

/// A hierarchical ("pyramid") bit-set over a fixed universe of up to 2^32
/// bits.
///
/// Level 0 is the literal bitmap. Each level above it is a summary: bit `j`
/// of level `k` is set iff slot `j` of level `k-1` is non-zero. Membership
/// tests read a single level-0 word; successor queries skip entire zero
/// regions by climbing to coarser levels and descending only where a summary
/// bit promises content below, so `first_set` costs O(levels × slot bits)
/// instead of a linear scan.
///
/// All levels live in one contiguous zeroed allocation, indexed through a
/// small inline span table. The set is monotonic: bits are set, never
/// cleared.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "allocative", derive(allocative::Allocative))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pyramid<W: Slot = u64> {
    pub(crate) universe_size: u64,
    pub(crate) strategy: SearchStrategy,
    #[cfg_attr(feature = "allocative", allocative(skip))]
    pub(crate) layout: Layout,
    pub(crate) data: Vec<W>,
}

impl<W: Slot> Pyramid<W> {
    /// Create an empty pyramid: dynamic level count, `RecursiveAscend`
    /// search.
    ///
    /// Panics if `universe_size` is zero or exceeds 2^32.
    pub fn new(universe_size: u64) -> Self {
        Self::with_config(
            universe_size,
            LevelPolicy::default(),
            SearchStrategy::default(),
        )
    }

    /// Create an empty pyramid with an explicit level policy and search
    /// strategy.
    ///
    /// Panics if `universe_size` is zero or exceeds 2^32.
    pub fn with_config(universe_size: u64, policy: LevelPolicy, strategy: SearchStrategy) -> Self {
        assert!(
            universe_size >= 1 && universe_size <= MAX_UNIVERSE,
            "universe_size {universe_size} outside 1..={MAX_UNIVERSE}"
        );

        let layout = Layout::new::<W>(universe_size, policy);
        let data = vec![W::default(); layout.total_slots()];

        Self {
            universe_size,
            strategy,
            layout,
            data,
        }
    }

    /// The universe size (exclusive upper bound on bit positions).
    pub fn universe_size(&self) -> u64 {
        self.universe_size
    }

    /// The number of levels in the pyramid.
    pub fn levels(&self) -> u32 {
        self.layout.levels()
    }

    /// The search strategy this pyramid was built with.
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// The number of heap-allocated bytes used by this pyramid.
    pub fn heap_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<W>()
    }

    /// Set bit `bit`. Idempotent.
    ///
    /// ORs the bit in at every level, finest to coarsest, so the summary
    /// invariant holds on return.
    ///
    /// Panics if `bit >= universe_size`.
    pub fn set(&mut self, bit: u32) {
        assert!(
            u64::from(bit) < self.universe_size,
            "bit {bit} out of bounds for universe_size {}",
            self.universe_size
        );

        let mut pos = bit as usize;
        for span in self.layout.spans() {
            let slot = pos >> W::SHIFT;
            self.data[span.offset + slot] |= W::bit(pos as u32 & W::MASK);
            pos = slot;
        }
    }

    /// Test bit `bit`. Reads level 0 only, O(1).
    ///
    /// Positions at or above `universe_size` are never set.
    #[inline]
    pub fn contains(&self, bit: u32) -> bool {
        if u64::from(bit) >= self.universe_size {
            return false;
        }

        let span = self.layout.span(0);
        let word = self.data[span.offset + (bit >> W::SHIFT) as usize];
        !(word & W::bit(bit & W::MASK)).is_zero()
    }

    /// The smallest set bit at position `from` or above, or `None` if there
    /// is none (including when `from >= universe_size`).
    #[inline]
    pub fn first_set(&self, from: u32) -> Option<u32> {
        self.first_set_from(u64::from(from))
    }

    /// The smallest set bit, or `None` if empty.
    pub fn min(&self) -> Option<u32> {
        self.first_set_from(0)
    }

    /// Iterate over set bits in ascending order.
    ///
    /// Each step is a successor query from one past the previous bit.
    pub fn iter(&self) -> SetBits<'_, W> {
        SetBits {
            pyramid: self,
            next: 0,
        }
    }

    /// Count the number of set bits (level-0 population count).
    pub fn len(&self) -> u64 {
        let span = self.layout.span(0);
        self.data[span.offset..span.offset + span.slots]
            .iter()
            .map(|w| u64::from(w.count_ones()))
            .sum()
    }

    /// Returns `true` if no bits are set. O(1): the topmost summary slot is
    /// zero iff every slot below it is.
    pub fn is_empty(&self) -> bool {
        let top = self.layout.span(self.layout.levels() as usize - 1);
        self.data[top.offset].is_zero()
    }
}

/// Iterator over set bits of a [`Pyramid`], in ascending order.
pub struct SetBits<'a, W: Slot> {
    pyramid: &'a Pyramid<W>,
    next: u64,
}

impl<W: Slot> Iterator for SetBits<'_, W> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let found = self.pyramid.first_set_from(self.next)?;
        self.next = u64::from(found) + 1;
        Some(found)
    }
}

impl<'a, W: Slot> IntoIterator for &'a Pyramid<W> {
    type Item = u32;
    type IntoIter = SetBits<'a, W>;

    fn into_iter(self) -> SetBits<'a, W> {
        self.iter()
    }
}
