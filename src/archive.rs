//! The built-in memory archives.
//!
//! An archive wraps a byte sink or source for the duration of one
//! serialization session and carries the fundamental codec: scalars and raw
//! byte runs move through [`OutputArchive::write_bytes`] and
//! [`InputArchive::read_bytes`] in host byte order.
//!
//! Three archives are provided:
//!
//! - [`OutputArchive`]: saving. Appends to a caller-owned `Vec<u8>`,
//!   over-allocating while a top-level operation is in flight and shrinking
//!   back to the exact written length when it completes.
//! - [`InputArchive`]: loading from a borrowed byte slice. Advances a
//!   cursor; never mutates the source.
//! - [`OwnedInputArchive`]: loading from a caller-owned `Vec<u8>`. Erases
//!   the consumed prefix after every top-level operation so the next
//!   operation begins at byte zero — the natural shape for a buffer that is
//!   filled and drained like a queue.
//!
//! Archive instances are single-threaded: each one mutably borrows its
//! buffer, so the borrow checker already prevents sharing one across
//! threads. Two archives over disjoint buffers are fully independent.

use crate::error::{PolyarcError, Result};
use crate::serialize::{Load, Save};

/// A saving archive that appends encoded bytes to a `Vec<u8>`.
///
/// Construction records the buffer's current length; encoded bytes are
/// appended after any pre-existing content. While an operation runs, the
/// buffer may be over-allocated (1.5× growth on overflow); at the end of
/// every top-level [`save`](Self::save) — successful or not — the buffer is
/// truncated to the exact number of bytes written, so the caller never
/// observes trailing capacity bytes.
///
/// ```rust
/// use polyarc::OutputArchive;
///
/// let mut data = Vec::new();
/// OutputArchive::new(&mut data).save(&(1337u32, 1338u32))?;
/// assert_eq!(data.len(), 8);
/// # Ok::<(), polyarc::PolyarcError>(())
/// ```
#[derive(Debug)]
pub struct OutputArchive<'a> {
    output: &'a mut Vec<u8>,
    /// Logical length: bytes written so far, `<= output.len()` between
    /// operations, possibly less while over-allocated.
    size: usize,
}

impl<'a> OutputArchive<'a> {
    /// Creates a saving archive that appends to `output`.
    pub fn new(output: &'a mut Vec<u8>) -> Self {
        let size = output.len();
        Self { output, size }
    }

    /// Saves one value as a top-level operation.
    ///
    /// On return — `Ok` or `Err` — the buffer length equals the total bytes
    /// written so far. A failed save may leave the bytes of sub-values that
    /// were encoded before the failure; the length is still exact.
    ///
    /// To save several values in one operation, pass a tuple: components
    /// are encoded left to right with no framing between them.
    pub fn save<T: Save>(&mut self, value: &T) -> Result<()> {
        let result = value.save(self);
        self.output.truncate(self.size);
        result
    }

    /// Appends raw bytes to the sink, growing it as needed.
    ///
    /// This is the single point every encoder funnels through; user
    /// `Save` impls normally dispatch field-by-field instead of calling it
    /// directly.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.size + bytes.len();
        if end > self.output.len() {
            self.output.resize(end * 3 / 2, 0);
        }
        self.output[self.size..end].copy_from_slice(bytes);
        self.size = end;
        Ok(())
    }

    /// Encodes a container length as the 32-bit wire prefix.
    pub(crate) fn write_len(&mut self, len: usize) -> Result<()> {
        let len = u32::try_from(len).map_err(|_| {
            PolyarcError::InvalidValue(format!(
                "container length {len} exceeds the 32-bit wire limit"
            ))
        })?;
        self.write_bytes(&len.to_ne_bytes())
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> usize {
        self.size
    }
}

impl Drop for OutputArchive<'_> {
    fn drop(&mut self) {
        // The sink must hold exactly the written bytes once the session
        // ends, even if the caller bypassed `save`.
        self.output.truncate(self.size);
    }
}

/// A loading archive over a borrowed byte slice.
///
/// Every read advances a cursor; a read past the end fails with
/// [`PolyarcError::OutOfRange`] and consumes nothing. The source is never
/// mutated, so several archives may read the same bytes independently.
#[derive(Debug)]
pub struct InputArchive<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> InputArchive<'a> {
    /// Creates a loading archive over `input`, cursor at byte zero.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    /// Loads one value as a top-level operation, in place.
    pub fn load<T: Load>(&mut self, value: &mut T) -> Result<()> {
        value.load(self)
    }

    /// Copies `dst.len()` bytes from the cursor and advances it.
    pub fn read_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        let end = self.offset + dst.len();
        if end > self.input.len() {
            return Err(PolyarcError::OutOfRange(format!(
                "requested {} bytes with {} remaining",
                dst.len(),
                self.input.len() - self.offset
            )));
        }
        dst.copy_from_slice(&self.input[self.offset..end]);
        self.offset = end;
        Ok(())
    }

    /// Decodes a 32-bit wire length prefix.
    pub(crate) fn read_len(&mut self) -> Result<usize> {
        let mut bytes = [0u8; 4];
        self.read_bytes(&mut bytes)?;
        Ok(u32::from_ne_bytes(bytes) as usize)
    }

    /// Current cursor position in bytes from the start of the source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes remaining between the cursor and the end of the source.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.offset
    }
}

/// A loading archive that consumes a caller-owned buffer front to back.
///
/// Each top-level [`load`](Self::load) reads through a fresh [`InputArchive`]
/// view and then erases the consumed prefix from the buffer — on failure as
/// well, so the caller may retry against the residual bytes.
///
/// ```rust
/// use polyarc::{OutputArchive, OwnedInputArchive};
///
/// let mut data = Vec::new();
/// OutputArchive::new(&mut data).save(&(7u16, 9u16))?;
///
/// let mut first = 0u16;
/// let mut input = OwnedInputArchive::new(&mut data);
/// input.load(&mut first)?;
/// assert_eq!(first, 7);
/// # drop(input);
/// assert_eq!(data.len(), 2); // the consumed prefix is gone
/// # Ok::<(), polyarc::PolyarcError>(())
/// ```
#[derive(Debug)]
pub struct OwnedInputArchive<'a> {
    input: &'a mut Vec<u8>,
}

impl<'a> OwnedInputArchive<'a> {
    /// Creates a consuming loader over `input`.
    pub fn new(input: &'a mut Vec<u8>) -> Self {
        Self { input }
    }

    /// Loads one value as a top-level operation, in place, then erases the
    /// consumed bytes from the front of the buffer.
    pub fn load<T: Load>(&mut self, value: &mut T) -> Result<()> {
        let mut view = InputArchive::new(self.input);
        let result = value.load(&mut view);
        let consumed = view.offset();
        self.input.drain(..consumed);
        result
    }

    /// Bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}
