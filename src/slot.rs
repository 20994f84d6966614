use std::fmt::Debug;
use std::ops::{BitAnd, BitOrAssign};

use static_assertions::const_assert_eq;

/// One fixed-width word of level storage.
///
/// Implemented for `u8`, `u32` and `u64`. `SHIFT` is `log2(BITS)`, so for a
/// bit position `p` within a level, `p >> SHIFT` is the slot index and
/// `p & MASK` the offset inside that slot.
pub trait Slot:
    Copy + Default + Eq + Debug + BitAnd<Output = Self> + BitOrAssign + sealed::Sealed + 'static
{
    const BITS: u32;
    const SHIFT: u32;
    const MASK: u32;

    /// A word with only bit `index` set.
    fn bit(index: u32) -> Self;

    /// A word with every bit at position `index` and above set.
    fn bits_from(index: u32) -> Self;

    fn is_zero(self) -> bool;

    fn trailing_zeros(self) -> u32;

    fn count_ones(self) -> u32;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

macro_rules! impl_slot {
    ($ty:ty, $shift:expr) => {
        impl Slot for $ty {
            const BITS: u32 = <$ty>::BITS;
            const SHIFT: u32 = $shift;
            const MASK: u32 = <$ty>::BITS - 1;

            #[inline]
            fn bit(index: u32) -> Self {
                1 << index
            }

            #[inline]
            fn bits_from(index: u32) -> Self {
                <$ty>::MAX << index
            }

            #[inline]
            fn is_zero(self) -> bool {
                self == 0
            }

            #[inline]
            fn trailing_zeros(self) -> u32 {
                <$ty>::trailing_zeros(self)
            }

            #[inline]
            fn count_ones(self) -> u32 {
                <$ty>::count_ones(self)
            }
        }
    };
}

impl_slot!(u8, 3);
impl_slot!(u32, 5);
impl_slot!(u64, 6);

const_assert_eq!(1u32 << <u8 as Slot>::SHIFT, u8::BITS);
const_assert_eq!(1u32 << <u32 as Slot>::SHIFT, u32::BITS);
const_assert_eq!(1u32 << <u64 as Slot>::SHIFT, u64::BITS);
