use arrayvec::ArrayVec;

use crate::slot::Slot;

/// Most levels any supported configuration can need: `u8` slots over the
/// 2^32 universe ceiling (`ceil(32 / 3)`).
pub(crate) const MAX_LEVELS: usize = 11;

/// Where a level's slots sit inside the shared storage buffer.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Span {
    pub(crate) offset: usize,
    pub(crate) slots: usize,
}

/// How many levels a pyramid is built with.
///
/// Both policies answer queries identically; they differ in how much of the
/// level stack exists for small universes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelPolicy {
    /// Grow the stack bottom-up until a level fits in a single slot. Small
    /// universes get shallow stacks and touch less memory per query.
    #[default]
    Dynamic,
    /// Always build the depth the 2^32 universe ceiling needs for the slot
    /// width (6 levels for `u64`, 7 for `u32`, 11 for `u8`), regardless of
    /// the actual universe size.
    Fixed,
}

/// Per-level slot counts and offsets into the single storage region.
///
/// Level 0 is the literal bitmap; level `k` has one bit per slot of level
/// `k-1`. The topmost level always ends up with exactly one slot.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Layout {
    spans: ArrayVec<Span, MAX_LEVELS>,
    total_slots: usize,
}

impl Layout {
    pub(crate) fn new<W: Slot>(universe_size: u64, policy: LevelPolicy) -> Self {
        debug_assert!(universe_size >= 1);

        let mut spans = ArrayVec::new();
        let mut offset = 0usize;
        let mut bits = universe_size;

        loop {
            let slots = ((bits + u64::from(W::BITS) - 1) >> W::SHIFT) as usize;
            spans.push(Span { offset, slots });
            offset += slots;
            bits = slots as u64;

            let done = match policy {
                LevelPolicy::Dynamic => slots == 1,
                LevelPolicy::Fixed => spans.len() == fixed_levels::<W>(),
            };
            if done {
                break;
            }
        }

        debug_assert_eq!(spans[spans.len() - 1].slots, 1);

        Layout {
            spans,
            total_slots: offset,
        }
    }

    #[inline]
    pub(crate) fn span(&self, level: usize) -> Span {
        self.spans[level]
    }

    #[inline]
    pub(crate) fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[inline]
    pub(crate) fn levels(&self) -> u32 {
        self.spans.len() as u32
    }

    #[inline]
    pub(crate) fn total_slots(&self) -> usize {
        self.total_slots
    }
}

/// Depth needed to cover the 2^32 universe ceiling: `ceil(32 / SHIFT)`.
pub(crate) fn fixed_levels<W: Slot>() -> usize {
    ((32 + W::SHIFT - 1) / W::SHIFT) as usize
}
