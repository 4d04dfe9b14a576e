//! Storage words backing a flag field.
//!
//! A flag field packs its bits into a flat array of unsigned words. The word
//! width only changes how the logical bitstream is cut up, never which bit a
//! (record, field) pair maps to. Bit `b` of word `w` is logical bit
//! `w * WORD_BITS + b`, least significant bit first, which is the same layout as
//! [`bitvec::order::Lsb0`].

use bitvec::store::BitStore;
use std::fmt::Debug;

/// Default word type (32-bit unsigned integer)
pub type Word = u32;

/// Number of bits per default word
pub const BITS_PER_WORD: usize = Word::BITS as usize;

/// An unsigned integer usable as flag field storage.
///
/// Implemented for `u8`, `u16`, `u32` and (on 64-bit targets) `u64`.
pub trait StorageWord: BitStore + Copy + Eq + Default + Debug + Send + Sync + 'static {
    /// Width of the word in bits (always a power of two)
    const WORD_BITS: u32;

    /// `log2(WORD_BITS)`, used to turn divisions into shifts
    const WORD_SHIFT: u32;

    /// Returns whether bit `bit` is 1.
    fn has_bit(self, bit: u32) -> bool;

    /// Returns the word with bit `bit` set to 1.
    fn with_bit(self, bit: u32) -> Self;

    /// Returns the word with bit `bit` cleared to 0.
    fn without_bit(self, bit: u32) -> Self;

    /// Returns the word with bit `bit` flipped.
    fn toggled_bit(self, bit: u32) -> Self;

    /// Population count.
    fn ones(self) -> u32;
}

macro_rules! storage_word {
    ($($t:ty),+ $(,)?) => {
        $(
            impl StorageWord for $t {
                const WORD_BITS: u32 = <$t>::BITS;
                const WORD_SHIFT: u32 = <$t>::BITS.trailing_zeros();

                #[inline(always)]
                fn has_bit(self, bit: u32) -> bool {
                    debug_assert!(bit < Self::WORD_BITS);
                    (self >> bit) & 1 == 1
                }

                #[inline(always)]
                fn with_bit(self, bit: u32) -> Self {
                    debug_assert!(bit < Self::WORD_BITS);
                    self | (1 << bit)
                }

                #[inline(always)]
                fn without_bit(self, bit: u32) -> Self {
                    debug_assert!(bit < Self::WORD_BITS);
                    self & !(1 << bit)
                }

                #[inline(always)]
                fn toggled_bit(self, bit: u32) -> Self {
                    debug_assert!(bit < Self::WORD_BITS);
                    self ^ (1 << bit)
                }

                #[inline(always)]
                fn ones(self) -> u32 {
                    self.count_ones()
                }
            }
        )+
    };
}

storage_word!(u8, u16, u32);

#[cfg(target_pointer_width = "64")]
storage_word!(u64);

/// Number of words of type `W` needed to hold `bits` bits.
#[inline]
pub(crate) fn words_for<W: StorageWord>(bits: usize) -> usize {
    bits.div_ceil(W::WORD_BITS as usize)
}
