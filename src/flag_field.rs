//! FlagField - packed fixed-width boolean fields per record.
//!
//! A `FlagField` stores `field_width` independent flags for each of `len`
//! records in exactly `len * field_width` bits, rounded up to whole storage
//! words.
//!
//! # Design
//!
//! - Storage is a flat `Box<[W]>` of zeroed words, fixed at construction
//! - The flag for (record `i`, field `f`) is logical bit `i * field_width + f`
//! - word index = bit / W::WORD_BITS, bit within word = bit % W::WORD_BITS
//! - A record's block may straddle words; field widths need not be powers of two
//!
//! Addressing is split in two stages. [`FlagField::locate`] checks the record
//! index and returns where the record's block starts. [`RecordAddress::field`]
//! then derives each field's word and bit with no further checks, so batch
//! operations pay for one bounds check no matter how many fields they name.
//!
//! # Field indices
//!
//! Field indices must be `< field_width`. This is checked with
//! `debug_assert!` only. In release builds an out-of-range field addresses a
//! bit belonging to a later record, or panics on slice indexing when it runs
//! past the end of storage.
//!
//! # Examples
//!
//! ```
//! use flagfield::FlagField;
//!
//! const LIKES_CATS: u8 = 0;
//! const LIKES_DOGS: u8 = 1;
//! const LIKES_FRIES: u8 = 7;
//!
//! let mut ff: FlagField = FlagField::new(9, 1000);
//! ff.set_fields(42, &[LIKES_CATS, LIKES_FRIES])?;
//!
//! assert!(ff.is_set(42, LIKES_CATS)?);
//! assert!(!ff.any_set(41, &[LIKES_CATS, LIKES_DOGS, LIKES_FRIES])?);
//! assert!(ff.all_set(42, &[LIKES_CATS, LIKES_FRIES])?);
//! assert!(ff.is_set(1000, LIKES_CATS).is_err());
//! # Ok::<(), flagfield::FlagFieldError>(())
//! ```

use bitvec::prelude::*;

use crate::config::FlagFieldConfig;
use crate::error::{BoundKind, FlagFieldError, Result};
use crate::word::{words_for, StorageWord, Word};

/// Start of a record's block of fields.
///
/// Only [`FlagField::locate`] builds one, so `offset` is always below the
/// word width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordAddress {
    pub(crate) word: usize,
    pub(crate) offset: u32,
}

/// Location of a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagAddress {
    pub(crate) word: usize,
    pub(crate) bit: u32,
}

impl FlagAddress {
    /// Word holding the flag.
    #[inline(always)]
    pub fn word(&self) -> usize {
        self.word
    }

    /// Bit within [`FlagAddress::word`].
    #[inline(always)]
    pub fn bit(&self) -> u32 {
        self.bit
    }
}

impl RecordAddress {
    /// Word holding the record's first field.
    #[inline(always)]
    pub fn word(&self) -> usize {
        self.word
    }

    /// Bit offset of the first field within [`RecordAddress::word`].
    #[inline(always)]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Resolve field `field` of this record to its word and bit.
    ///
    /// Pure arithmetic with no bounds checks. `offset` is below 64 and
    /// `offset + field` is computed in `u32`, so it cannot overflow for any
    /// `u8` field.
    #[inline(always)]
    pub fn field<W: StorageWord>(self, field: u8) -> FlagAddress {
        let absolute = self.offset + u32::from(field);
        let word_delta = (absolute >> W::WORD_SHIFT) as usize;
        FlagAddress {
            word: self.word + word_delta,
            bit: absolute & (W::WORD_BITS - 1),
        }
    }
}

/// Packed array of `len` records with `field_width` boolean fields each.
///
/// All fields start unset. The number of records and fields per record never
/// change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagField<W: StorageWord = Word> {
    field_width: u8,
    length: usize,
    words: Box<[W]>,
}

impl<W: StorageWord> FlagField<W> {
    /// Create a flag field of `length` records with `field_width` fields each.
    ///
    /// `field_width == 0` or `length == 0` gives an empty field with no
    /// storage. Use [`FlagField::from_config`] to get an error instead of a
    /// panic for oversized shapes.
    ///
    /// # Panics
    ///
    /// Panics if `length * field_width` overflows `usize`.
    ///
    /// ```
    /// use flagfield::FlagField;
    ///
    /// let ff: FlagField = FlagField::new(9, 5);
    /// assert_eq!(ff.len(), 5);
    /// assert_eq!(ff.num_words(), 2); // 45 bits
    /// ```
    pub fn new(field_width: u8, length: usize) -> Self {
        let bits = length
            .checked_mul(usize::from(field_width))
            .expect("flag field bit count overflows usize");
        Self {
            field_width,
            length,
            words: vec![W::default(); words_for::<W>(bits)].into_boxed_slice(),
        }
    }

    /// Create a flag field from a validated config.
    pub fn from_config(config: &FlagFieldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.field_width, config.record_count))
    }

    /// The parameters this field was built with.
    pub fn config(&self) -> FlagFieldConfig {
        FlagFieldConfig::new(self.field_width, self.length)
    }

    /// Number of records.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if there are no records.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of fields per record.
    #[inline(always)]
    pub fn field_width(&self) -> u8 {
        self.field_width
    }

    /// Number of meaningful bits (`len * field_width`).
    #[inline(always)]
    pub fn num_bits(&self) -> usize {
        self.length * usize::from(self.field_width)
    }

    /// Number of storage words.
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Read-only access to the storage words.
    #[inline(always)]
    pub fn words(&self) -> &[W] {
        &self.words
    }

    /// Estimate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + std::mem::size_of_val(&*self.words)
    }

    // =========================================================================
    // Addressing
    // =========================================================================

    /// Find the start of `record`'s block of fields.
    ///
    /// This is the only bounds check; every record-indexed operation goes
    /// through it before touching storage.
    #[inline]
    pub fn locate(&self, record: usize) -> Result<RecordAddress> {
        if record >= self.length {
            return Err(FlagFieldError::OutOfBounds {
                bound: BoundKind::Index,
                max: self.length,
                input: record,
            });
        }

        let start = record * usize::from(self.field_width);
        Ok(RecordAddress {
            word: start >> W::WORD_SHIFT,
            offset: (start & (W::WORD_BITS as usize - 1)) as u32,
        })
    }

    #[inline(always)]
    fn flag(&self, at: RecordAddress, field: u8) -> FlagAddress {
        debug_assert!(
            field < self.field_width,
            "field index {} out of bounds (field width: {})",
            field,
            self.field_width
        );
        at.field::<W>(field)
    }

    #[inline(always)]
    fn read(&self, at: RecordAddress, field: u8) -> bool {
        let flag = self.flag(at, field);
        self.words[flag.word].has_bit(flag.bit)
    }

    #[inline(always)]
    fn write(&mut self, at: RecordAddress, field: u8, value: bool) {
        let flag = self.flag(at, field);
        let word = &mut self.words[flag.word];
        *word = if value {
            word.with_bit(flag.bit)
        } else {
            word.without_bit(flag.bit)
        };
    }

    // =========================================================================
    // Single Field Operations
    // =========================================================================

    /// Returns whether `field` of `record` is set.
    #[inline]
    pub fn is_set(&self, record: usize, field: u8) -> Result<bool> {
        let at = self.locate(record)?;
        Ok(self.read(at, field))
    }

    /// Set `field` of `record` to 1.
    #[inline]
    pub fn set(&mut self, record: usize, field: u8) -> Result<()> {
        let at = self.locate(record)?;
        self.write(at, field, true);
        Ok(())
    }

    /// Clear `field` of `record` to 0.
    #[inline]
    pub fn unset(&mut self, record: usize, field: u8) -> Result<()> {
        let at = self.locate(record)?;
        self.write(at, field, false);
        Ok(())
    }

    /// Assign `field` of `record` to `value`.
    #[inline]
    pub fn assign(&mut self, record: usize, field: u8, value: bool) -> Result<()> {
        let at = self.locate(record)?;
        self.write(at, field, value);
        Ok(())
    }

    /// Flip `field` of `record`.
    #[inline]
    pub fn toggle(&mut self, record: usize, field: u8) -> Result<()> {
        let at = self.locate(record)?;
        let flag = self.flag(at, field);
        let word = &mut self.words[flag.word];
        *word = word.toggled_bit(flag.bit);
        Ok(())
    }

    // =========================================================================
    // Batch Operations
    // =========================================================================

    /// Returns true if every field in `fields` is set on `record`.
    ///
    /// Every field is read even once the answer is known, so the branch
    /// pattern depends only on how many fields are named, not on their
    /// values. An empty `fields` is vacuously true.
    pub fn all_set(&self, record: usize, fields: &[u8]) -> Result<bool> {
        let at = self.locate(record)?;
        let mut result = true;
        for &field in fields {
            result &= self.read(at, field);
        }
        Ok(result)
    }

    /// Returns true if at least one field in `fields` is set on `record`.
    ///
    /// Not short-circuited, see [`FlagField::all_set`]. An empty `fields`
    /// is false.
    pub fn any_set(&self, record: usize, fields: &[u8]) -> Result<bool> {
        let at = self.locate(record)?;
        let mut result = false;
        for &field in fields {
            result |= self.read(at, field);
        }
        Ok(result)
    }

    /// Set every field in `fields` on `record`.
    ///
    /// Each field is ORed into its word on its own, even when several land in
    /// the same word.
    pub fn set_fields(&mut self, record: usize, fields: &[u8]) -> Result<()> {
        let at = self.locate(record)?;
        for &field in fields {
            self.write(at, field, true);
        }
        Ok(())
    }

    /// Clear every field in `fields` on `record`.
    pub fn unset_fields(&mut self, record: usize, fields: &[u8]) -> Result<()> {
        let at = self.locate(record)?;
        for &field in fields {
            self.write(at, field, false);
        }
        Ok(())
    }

    // =========================================================================
    // Record Views
    // =========================================================================

    #[inline(always)]
    fn bits(&self) -> &BitSlice<W, Lsb0> {
        &BitSlice::<W, Lsb0>::from_slice(&self.words)[..self.num_bits()]
    }

    #[inline(always)]
    fn bits_mut(&mut self) -> &mut BitSlice<W, Lsb0> {
        let num_bits = self.num_bits();
        &mut BitSlice::<W, Lsb0>::from_slice_mut(&mut self.words)[..num_bits]
    }

    /// View `record`'s fields as a bit slice; field `f` is at index `f`.
    ///
    /// ```
    /// use flagfield::FlagField;
    ///
    /// let mut ff: FlagField = FlagField::new(9, 5);
    /// ff.set_fields(3, &[1, 8])?;
    ///
    /// let rec = ff.record(3)?;
    /// assert_eq!(rec.len(), 9);
    /// assert!(rec[1] && rec[8] && !rec[0]);
    /// # Ok::<(), flagfield::FlagFieldError>(())
    /// ```
    pub fn record(&self, record: usize) -> Result<&BitSlice<W, Lsb0>> {
        self.locate(record)?;
        let start = record * usize::from(self.field_width);
        Ok(&self.bits()[start..start + usize::from(self.field_width)])
    }

    /// Indices of the set fields of `record`, ascending.
    pub fn set_fields_of(&self, record: usize) -> Result<Vec<u8>> {
        // iter_ones yields indices below field_width, which fits in u8
        Ok(self.record(record)?.iter_ones().map(|f| f as u8).collect())
    }

    /// Number of set fields on `record`.
    pub fn count_set(&self, record: usize) -> Result<usize> {
        Ok(self.record(record)?.count_ones())
    }

    /// Clear every field of `record`.
    pub fn clear_record(&mut self, record: usize) -> Result<()> {
        self.locate(record)?;
        let width = usize::from(self.field_width);
        let start = record * width;
        self.bits_mut()[start..start + width].fill(false);
        Ok(())
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    /// Total number of set flags across all records.
    pub fn num_set(&self) -> usize {
        // Whole words are counted. Padding bits stay zero as long as every
        // field index passed in was below field_width.
        self.words.iter().map(|w| w.ones() as usize).sum()
    }

    /// Clear every flag of every record.
    pub fn clear_all(&mut self) {
        self.words.fill(W::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let ff: FlagField = FlagField::new(9, 5);
        assert_eq!(ff.len(), 5);
        assert_eq!(ff.field_width(), 9);
        assert_eq!(ff.num_bits(), 45);
        assert_eq!(ff.num_words(), 2);
        assert_eq!(ff.num_set(), 0);
        assert!(ff.words().iter().all(|&w| w == 0));
    }

    #[test]
    fn test_new_degenerate() {
        let ff: FlagField = FlagField::new(0, 100);
        assert_eq!(ff.len(), 100);
        assert_eq!(ff.num_words(), 0);

        let ff: FlagField = FlagField::new(9, 0);
        assert!(ff.is_empty());
        assert_eq!(ff.num_words(), 0);
        assert!(ff.locate(0).is_err());
    }

    #[test]
    fn test_locate() {
        let ff: FlagField = FlagField::new(9, 5);
        assert_eq!(ff.locate(0).unwrap(), RecordAddress { word: 0, offset: 0 });
        assert_eq!(ff.locate(3).unwrap(), RecordAddress { word: 0, offset: 27 });
        assert_eq!(ff.locate(4).unwrap(), RecordAddress { word: 1, offset: 4 });

        let ff: FlagField<u8> = FlagField::new(9, 5);
        assert_eq!(ff.locate(1).unwrap(), RecordAddress { word: 1, offset: 1 });
        assert_eq!(ff.locate(4).unwrap(), RecordAddress { word: 4, offset: 4 });
    }

    #[test]
    fn test_locate_out_of_bounds() {
        let ff: FlagField = FlagField::new(9, 5);
        match ff.locate(5) {
            Err(FlagFieldError::OutOfBounds { bound, max, input }) => {
                assert_eq!(bound, BoundKind::Index);
                assert_eq!(max, 5);
                assert_eq!(input, 5);
            }
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_field_address_straddles_word() {
        // Record 3 starts at bit 27; field 6 lands on bit 33
        let at = RecordAddress { word: 0, offset: 27 };
        assert_eq!(at.field::<u32>(4), FlagAddress { word: 0, bit: 31 });
        assert_eq!(at.field::<u32>(5), FlagAddress { word: 1, bit: 0 });
        assert_eq!(at.field::<u32>(6), FlagAddress { word: 1, bit: 1 });
    }

    #[test]
    fn test_field_address_large_offset() {
        let at = RecordAddress { word: 10, offset: 31 };
        assert_eq!(at.field::<u32>(255), FlagAddress { word: 18, bit: 30 });
        assert_eq!(at.field::<u8>(255), FlagAddress { word: 45, bit: 6 });
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_record_offsets_stay_within_word() {
        let ff: FlagField<u64> = FlagField::new(255, 70);
        for r in 0..70 {
            let at = ff.locate(r).unwrap();
            assert!(at.offset() < 64);
            assert_eq!(at.word() * 64 + at.offset() as usize, r * 255);

            let last = at.field::<u64>(254);
            assert_eq!(last.word() * 64 + last.bit() as usize, r * 255 + 254);
        }
    }

    #[test]
    #[should_panic(expected = "bit count overflows")]
    fn test_new_overflowing_shape_panics() {
        let _ff: FlagField = FlagField::new(2, usize::MAX / 2 + 1);
    }

    #[test]
    fn test_set_unset() {
        let mut ff: FlagField = FlagField::new(9, 5);
        assert!(!ff.is_set(3, 5).unwrap());
        ff.set(3, 5).unwrap();
        assert!(ff.is_set(3, 5).unwrap());
        // bit 32, the first bit of word 1
        assert_eq!(ff.words()[1], 1);
        ff.unset(3, 5).unwrap();
        assert!(!ff.is_set(3, 5).unwrap());
        assert_eq!(ff.num_set(), 0);
    }

    #[test]
    fn test_assign_toggle() {
        let mut ff: FlagField<u16> = FlagField::new(3, 10);
        ff.assign(7, 2, true).unwrap();
        assert!(ff.is_set(7, 2).unwrap());
        ff.assign(7, 2, false).unwrap();
        assert!(!ff.is_set(7, 2).unwrap());

        ff.toggle(7, 1).unwrap();
        assert!(ff.is_set(7, 1).unwrap());
        ff.toggle(7, 1).unwrap();
        assert!(!ff.is_set(7, 1).unwrap());
    }

    #[test]
    fn test_batch_empty_fields() {
        let mut ff: FlagField = FlagField::new(4, 2);
        assert!(ff.all_set(0, &[]).unwrap());
        assert!(!ff.any_set(0, &[]).unwrap());
        ff.set_fields(1, &[]).unwrap();
        ff.unset_fields(1, &[]).unwrap();
        assert_eq!(ff.num_set(), 0);

        // the record index is still checked
        assert!(ff.all_set(2, &[]).is_err());
    }

    #[test]
    fn test_record_view() {
        let mut ff: FlagField = FlagField::new(9, 5);
        ff.set_fields(3, &[0, 4, 5, 8]).unwrap();

        let rec = ff.record(3).unwrap();
        assert_eq!(rec.len(), 9);
        assert_eq!(rec.count_ones(), 4);
        assert_eq!(ff.set_fields_of(3).unwrap(), vec![0, 4, 5, 8]);
        assert_eq!(ff.count_set(3).unwrap(), 4);
        assert_eq!(ff.count_set(2).unwrap(), 0);

        ff.clear_record(3).unwrap();
        assert_eq!(ff.count_set(3).unwrap(), 0);
        assert_eq!(ff.num_set(), 0);
    }

    #[test]
    fn test_clear_all() {
        let mut ff: FlagField<u8> = FlagField::new(5, 20);
        for r in 0..20 {
            ff.set_fields(r, &[0, 2, 4]).unwrap();
        }
        assert_eq!(ff.num_set(), 60);
        ff.clear_all();
        assert_eq!(ff.num_set(), 0);
        assert_eq!(ff.len(), 20);
    }

    #[test]
    fn test_equality() {
        let mut a: FlagField = FlagField::new(9, 5);
        let mut b: FlagField = FlagField::new(9, 5);
        a.set(1, 1).unwrap();
        b.set(1, 1).unwrap();
        assert_eq!(a, b);
        b.set(2, 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_memory_usage() {
        let ff: FlagField = FlagField::new(9, 1_000);
        // 9000 bits -> 282 words
        assert_eq!(ff.num_words(), 282);
        assert!(ff.memory_usage() >= 282 * 4);
    }

    #[test]
    #[should_panic(expected = "field index")]
    #[cfg(debug_assertions)]
    fn test_field_out_of_range_debug_asserts() {
        let ff: FlagField = FlagField::new(9, 5);
        let _ = ff.is_set(0, 9);
    }
}
