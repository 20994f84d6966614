//! The successor walk behind [`Pyramid::first_set`].
//!
//! A query first checks the level-0 word containing the start position with
//! the bits below it masked off; dense regions resolve there in O(1). On a
//! miss the walk enters the summary levels: a non-zero masked slot names the
//! next candidate region and the walk descends into it, a zero masked slot
//! means the region is exhausted and the walk resumes one level coarser at
//! the next slot boundary. The summary invariant (a set bit at level `k`
//! means a non-zero slot at level `k-1`) guarantees every descent after a
//! skip runs straight down to a real bit.

use crate::pyramid::{Pyramid, SearchStrategy};
use crate::slot::Slot;

impl<W: Slot> Pyramid<W> {
    /// First set bit at universe position `b` or above, `None` if none.
    ///
    /// Takes the position as `u64` so enumeration can run the cursor one
    /// past the last valid bit of a full 2^32 universe.
    #[inline]
    pub(crate) fn first_set_from(&self, b: u64) -> Option<u32> {
        if b >= self.universe_size {
            return None;
        }

        // Fast path: the level-0 word containing `b`, bits below `b` masked
        // off.
        let level0 = self.layout.span(0);
        let slot = (b >> W::SHIFT) as usize;
        let within = (b & u64::from(W::MASK)) as u32;
        let word = self.data[level0.offset + slot] & W::bits_from(within);
        if !word.is_zero() {
            return Some((((slot as u64) << W::SHIFT) + u64::from(word.trailing_zeros())) as u32);
        }

        // The rest of this word is zero; resume at the next word boundary.
        let cursor = ((slot as u64) + 1) << W::SHIFT;
        let top = self.layout.levels() - 1;
        match self.strategy {
            SearchStrategy::RecursiveAscend => self.walk(cursor, top.min(1)),
            SearchStrategy::RecursiveDescend => self.walk(cursor, top),
            SearchStrategy::Iterative => self.walk_iterative(cursor, top.min(1)),
        }
    }

    /// One step of the pyramid walk at `level`, looking for a set bit at or
    /// after universe position `b`.
    ///
    /// Recursion depth is bounded by the level count: every ascent strictly
    /// advances `b` to a slot boundary it has not visited, every descent
    /// either answers at level 0 or moves the walk one level finer, and a
    /// cursor past the universe ends the query.
    fn walk(&self, b: u64, level: u32) -> Option<u32> {
        if b >= self.universe_size {
            return None;
        }

        let span = self.layout.span(level as usize);
        let shift = W::SHIFT * level;
        let pos = b >> shift;
        let slot = (pos >> W::SHIFT) as usize;
        let within = (pos & u64::from(W::MASK)) as u32;
        let word = self.data[span.offset + slot] & W::bits_from(within);

        if !word.is_zero() {
            let hit = ((slot as u64) << W::SHIFT) + u64::from(word.trailing_zeros());
            if level == 0 {
                return Some(hit as u32);
            }
            // `hit` summarizes a non-empty region based at `hit << shift`;
            // continue one level finer from that base or from `b` itself,
            // whichever is later.
            self.walk(b.max(hit << shift), level - 1)
        } else if level + 1 == self.layout.levels() {
            None
        } else {
            // Slot exhausted: resume at the next slot boundary, one level
            // coarser.
            self.walk(((slot as u64) + 1) << (shift + W::SHIFT), level + 1)
        }
    }

    /// The same walk as [`walk`](Self::walk), with an explicit level cursor
    /// instead of recursion.
    fn walk_iterative(&self, mut b: u64, mut level: u32) -> Option<u32> {
        loop {
            if b >= self.universe_size {
                return None;
            }

            let span = self.layout.span(level as usize);
            let shift = W::SHIFT * level;
            let pos = b >> shift;
            let slot = (pos >> W::SHIFT) as usize;
            let within = (pos & u64::from(W::MASK)) as u32;
            let word = self.data[span.offset + slot] & W::bits_from(within);

            if !word.is_zero() {
                let hit = ((slot as u64) << W::SHIFT) + u64::from(word.trailing_zeros());
                if level == 0 {
                    return Some(hit as u32);
                }
                b = b.max(hit << shift);
                level -= 1;
            } else if level + 1 == self.layout.levels() {
                return None;
            } else {
                b = ((slot as u64) + 1) << (shift + W::SHIFT);
                level += 1;
            }
        }
    }
}
