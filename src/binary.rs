//! The raw-binary escape hatch.
//!
//! [`as_binary`] wraps a scalar slice so that it is copied to or from the
//! archive as bare bytes, with no length prefix. The caller takes over the
//! framing responsibility — both endpoints must agree on the element count
//! out of band. Use with care.

use crate::archive::{InputArchive, OutputArchive};
use crate::error::Result;
use crate::scalar::{as_bytes, as_bytes_mut, Scalar};
use crate::serialize::{Load, Save};

/// A borrowed scalar run saved as raw bytes, without a length prefix.
///
/// The `T: Scalar` bound is what rejects element types that are not
/// trivially copyable: a `Binary` over such a type does not type-check.
#[derive(Debug, Clone, Copy)]
pub struct Binary<'a, T: Scalar> {
    items: &'a [T],
}

impl<T: Scalar> Binary<'_, T> {
    /// Number of elements in the run.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the run is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total size of the run in bytes.
    pub fn size_in_bytes(&self) -> usize {
        std::mem::size_of_val(self.items)
    }
}

/// A mutable scalar run loaded from raw bytes, without a length prefix.
///
/// Exactly `len() * size_of::<T>()` bytes are consumed from the archive.
#[derive(Debug)]
pub struct BinaryMut<'a, T: Scalar> {
    items: &'a mut [T],
}

impl<T: Scalar> BinaryMut<'_, T> {
    /// Number of elements in the run.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the run is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Wraps a scalar slice for saving as raw binary data.
pub fn as_binary<T: Scalar>(items: &[T]) -> Binary<'_, T> {
    Binary { items }
}

/// Wraps a mutable scalar slice for loading from raw binary data.
pub fn as_binary_mut<T: Scalar>(items: &mut [T]) -> BinaryMut<'_, T> {
    BinaryMut { items }
}

impl<T: Scalar> Save for Binary<'_, T> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        archive.write_bytes(as_bytes(self.items))
    }
}

impl<T: Scalar> Load for BinaryMut<'_, T> {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        archive.read_bytes(as_bytes_mut(self.items))
    }
}
