//! Flag field construction parameters.
//!
//! A [`FlagFieldConfig`] captures the two numbers a [`FlagField`] is built
//! from, so a field's shape can be kept in a config file and rebuilt later.
//! Only the shape is serialized; flag contents are not.
//!
//! # Example
//!
//! ```
//! use flagfield::{FlagField, FlagFieldConfig};
//!
//! let config = FlagFieldConfig::new(9, 1_000_000);
//! let json = config.to_json()?;
//!
//! let restored = FlagFieldConfig::from_json(&json)?;
//! let ff: FlagField = FlagField::from_config(&restored)?;
//! assert_eq!(ff.len(), 1_000_000);
//! # Ok::<(), flagfield::FlagFieldError>(())
//! ```

use crate::{FlagField, FlagFieldError, Result, StorageWord};
use serde::{Deserialize, Serialize};

/// Shape of a flag field: fields per record and number of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagFieldConfig {
    /// Fields per record
    pub field_width: u8,
    /// Number of records
    pub record_count: usize,
}

impl FlagFieldConfig {
    pub fn new(field_width: u8, record_count: usize) -> Self {
        Self {
            field_width,
            record_count,
        }
    }

    /// Total bits needed, or an error if it does not fit in `usize`.
    pub fn total_bits(&self) -> Result<usize> {
        self.record_count
            .checked_mul(usize::from(self.field_width))
            .ok_or_else(|| {
                FlagFieldError::InvalidParameter(format!(
                    "{} records of {} fields overflow the addressable bit count",
                    self.record_count, self.field_width
                ))
            })
    }

    /// Check that a field of this shape can be built.
    pub fn validate(&self) -> Result<()> {
        self.total_bits().map(|_| ())
    }

    /// Build a zeroed flag field of this shape.
    pub fn build<W: StorageWord>(&self) -> Result<FlagField<W>> {
        FlagField::from_config(self)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to bincode.
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bincode and validate.
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        let config: Self = bincode::deserialize(data)?;
        config.validate()?;
        Ok(config)
    }
}
