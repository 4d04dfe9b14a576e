//! Flagfield - Packed Fixed-Width Boolean Fields
//!
//! Flagfield stores, for each of N records, W independent boolean flags in
//! exactly N×W bits of word storage instead of a byte or more per flag. It is
//! meant for very large record counts where per-record flag storage dominates
//! memory footprint and cache behavior.
//!
//! # Key Characteristics
//!
//! - Dense packing: records straddle word boundaries when W is not a power of two
//! - One bounds check per call, no matter how many fields a batch names
//! - Fixed shape: no resizing after construction
//! - Generic storage word (`u8`, `u16`, `u32`, `u64`), `u32` by default
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use flagfield::FlagField;
//!
//! let mut ff: FlagField = FlagField::new(9, 5);
//! ff.set_fields(2, &[4, 7, 2])?;
//! ff.set_fields(4, &[0, 5, 8])?;
//! ff.unset(4, 5)?;
//!
//! assert!(ff.all_set(2, &[4, 7, 2])?);
//! assert!(!ff.all_set(4, &[0, 5, 8])?);
//! assert!(ff.any_set(4, &[0, 5, 8])?);
//! # Ok::<(), flagfield::FlagFieldError>(())
//! ```
//!
//! ## Out of Bounds Records
//!
//! ```
//! use flagfield::{FlagField, FlagFieldError};
//!
//! let ff: FlagField = FlagField::new(9, 5);
//! let err = ff.is_set(5, 0).unwrap_err();
//! assert!(matches!(err, FlagFieldError::OutOfBounds { max: 5, input: 5, .. }));
//! assert_eq!(err.to_string(), "Outside of bound index. Max of 5 but received 5");
//! ```
//!
//! # Safety
//!
//! Record indices are always checked and reported as
//! [`FlagFieldError::OutOfBounds`]. Field indices are a caller precondition
//! checked with `debug_assert!`, which is free in release builds.
//!
//! # Concurrency
//!
//! A `FlagField` has no internal locking. It is `Send + Sync`, and mutation
//! takes `&mut self`, so sharing it across threads for writes needs an
//! external lock such as `RwLock<FlagField>`.

// Module declarations
pub mod config;
pub mod error;
pub mod flag_field;
pub mod word;

// Re-exports for convenient access
pub use config::FlagFieldConfig;
pub use error::{BoundKind, FlagFieldError, Result};
pub use flag_field::{FlagAddress, FlagField, RecordAddress};
pub use word::{StorageWord, Word, BITS_PER_WORD};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "Flagfield";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
