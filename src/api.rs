//! One-shot convenience entry points.
//!
//! The archive types support batched, stateful sessions; most callers just
//! want "value to bytes" and back. These helpers wrap a single top-level
//! operation around a fresh archive.

use crate::archive::{InputArchive, OutputArchive};
use crate::error::Result;
use crate::serialize::{Load, Save};

/// Encodes one value into a fresh byte vector.
///
/// ```rust
/// let bytes = polyarc::to_bytes(&(7u16, 9u16))?;
/// assert_eq!(bytes.len(), 4);
/// # Ok::<(), polyarc::PolyarcError>(())
/// ```
pub fn to_bytes<T: Save>(value: &T) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    OutputArchive::new(&mut data).save(value)?;
    Ok(data)
}

/// Decodes one value from the front of `data`.
///
/// Bytes past the decoded value are ignored; use an [`InputArchive`] when
/// several values share one buffer and the cursor matters.
///
/// ```rust
/// let bytes = polyarc::to_bytes(&vec![1u8, 2, 3])?;
/// let values: Vec<u8> = polyarc::from_bytes(&bytes)?;
/// assert_eq!(values, [1, 2, 3]);
/// # Ok::<(), polyarc::PolyarcError>(())
/// ```
pub fn from_bytes<T: Load + Default>(data: &[u8]) -> Result<T> {
    let mut value = T::default();
    InputArchive::new(data).load(&mut value)?;
    Ok(value)
}

/// Decodes into an existing value, reusing its allocations.
///
/// Equivalent to a one-value [`InputArchive`] session: containers are
/// resized in place and owning handles are replaced.
pub fn from_bytes_into<T: Load>(data: &[u8], value: &mut T) -> Result<()> {
    InputArchive::new(data).load(value)
}
