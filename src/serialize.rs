//! The `Save` and `Load` traits: the dispatch seam of the library.
//!
//! Where the archive decides *where* bytes go, these traits decide *how* a
//! value becomes bytes. Every supported shape — scalars, enums, sequences,
//! associative containers, fixed arrays, tuples, owning handles, the raw
//! and polymorphic wrappers — is one impl of `Save` and one of `Load`;
//! dispatch is resolved entirely at compile time from the value's type.
//!
//! User types participate either by `#[derive(Save, Load)]` (fields in
//! declaration order) or by a hand-written impl when the encoding needs
//! custom logic. Both directions of a type must agree on field order; that
//! agreement *is* the wire contract.
//!
//! Raw pointers and references deliberately implement neither trait:
//! attempting to serialize one is a compile error.

use crate::archive::{InputArchive, OutputArchive};
use crate::error::Result;

/// A value that can be encoded into a saving archive.
pub trait Save {
    /// Encodes `self` into the archive.
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()>;

    /// Encodes a contiguous run of values.
    ///
    /// The default loops over [`save`](Self::save); scalar types override it
    /// with a single raw-byte copy. Container encoders call this for their
    /// payload, which is how the contiguous-scalar fast path is selected
    /// without the caller knowing whether the element type qualifies.
    fn save_slice(items: &[Self], archive: &mut OutputArchive<'_>) -> Result<()>
    where
        Self: Sized,
    {
        for item in items {
            item.save(archive)?;
        }
        Ok(())
    }
}

/// A value that can be decoded, in place, from a loading archive.
///
/// Loading is in-place: the destination already exists and is overwritten.
/// Containers resize themselves to the decoded length before filling;
/// owning handles replace their contents with a freshly constructed object.
pub trait Load {
    /// Decodes from the archive into `self`.
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()>;

    /// Decodes into a contiguous run of values.
    ///
    /// Mirror of [`Save::save_slice`]: per-element by default, one raw-byte
    /// copy for scalars.
    fn load_slice(items: &mut [Self], archive: &mut InputArchive<'_>) -> Result<()>
    where
        Self: Sized,
    {
        for item in items {
            item.load(archive)?;
        }
        Ok(())
    }
}
