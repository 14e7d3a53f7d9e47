//! Centralized error handling for Polyarc.
//!
//! All failure conditions are propagated through the [`Result`] type; the
//! crate-level lints (`deny(clippy::unwrap_used)`, `deny(clippy::panic)`)
//! keep the library itself panic-free.
//!
//! ## Error categories
//!
//! Errors are categorized by their domain:
//!
//! - **Truncated input** ([`PolyarcError::OutOfRange`]): a load reached past
//!   the end of the source buffer.
//! - **Registry misses** ([`PolyarcError::UndeclaredType`]): a polymorphic
//!   encode or decode met a type that was never registered.
//! - **Empty handles** ([`PolyarcError::NullHandle`]): a save was asked to
//!   encode an owning handle that holds nothing.
//! - **Failed downcasts** ([`PolyarcError::TypeMismatch`]): a loaded
//!   polymorphic object could not be converted to the requested type.
//! - **Domain violations** ([`PolyarcError::InvalidValue`]): the decoded
//!   bytes are not a valid value of the target type (malformed UTF-8, an
//!   unknown enum discriminant, an oversized container).
//!
//! ## Usage
//!
//! ```rust
//! use polyarc::{OutputArchive, Result};
//!
//! fn encode(values: &[u32]) -> Result<Vec<u8>> {
//!     let mut data = Vec::new();
//!     OutputArchive::new(&mut data).save(&values.to_vec())?;
//!     Ok(data)
//! }
//! ```

use std::fmt;

/// A specialized `Result` type for Polyarc operations.
///
/// Equivalent to `std::result::Result<T, PolyarcError>` and used throughout
/// the library.
pub type Result<T> = std::result::Result<T, PolyarcError>;

/// The error enum covering all failure domains in Polyarc.
///
/// Each variant is a distinct leaf: no variant wraps another, and every
/// public operation reports exactly one of them. The payload is a
/// human-readable description of the specific failure site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolyarcError {
    /// A load requested more bytes than remained at the read cursor.
    ///
    /// The cursor is left at its position; no bytes are consumed by the
    /// failing read.
    OutOfRange(String),

    /// A polymorphic operation met a type absent from the registry.
    ///
    /// On the encode side this means the runtime type of the object was
    /// never registered; on the decode side it means the identifier read
    /// from the wire has no registered constructor. Both also cover the
    /// aftermath of a conflicting registration that was silently dropped.
    UndeclaredType(String),

    /// A save encountered an owning handle that holds nothing.
    ///
    /// Empty handles have no wire representation; the caller must either
    /// fill the handle or not serialize it.
    NullHandle(String),

    /// A loaded polymorphic object could not be downcast to the requested
    /// concrete type.
    ///
    /// The constructed object is destroyed before this error is returned.
    TypeMismatch(String),

    /// Decoded bytes do not form a valid value of the target type, or a
    /// value cannot be represented on the wire (e.g. a container longer
    /// than `u32::MAX`).
    InvalidValue(String),
}

impl fmt::Display for PolyarcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(s) => write!(f, "Out of range: {s}"),
            Self::UndeclaredType(s) => write!(f, "Undeclared polymorphic type: {s}"),
            Self::NullHandle(s) => write!(f, "Attempt to serialize null: {s}"),
            Self::TypeMismatch(s) => write!(f, "Polymorphic type mismatch: {s}"),
            Self::InvalidValue(s) => write!(f, "Invalid value: {s}"),
        }
    }
}

impl std::error::Error for PolyarcError {}
