//! The scalar marker trait used by the bulk fast path.
//!
//! A [`Scalar`] is a fixed-size value whose in-memory representation *is*
//! its wire representation: raw bytes in host byte order. Contiguous runs of
//! scalars are copied in a single pass instead of being dispatched
//! per-element.

use bytemuck::Pod;

/// Marker for types encoded as their raw in-memory bytes.
///
/// The `Pod` supertrait is what makes the bulk byte views sound: it
/// guarantees the type has no padding, no invalid bit patterns, and no drop
/// glue, so a `&[T]` can be reinterpreted as `&[u8]` (and back) without any
/// `unsafe` in this crate.
///
/// Implemented for the fixed-width integers and floats. `bool` is *not* a
/// scalar: not every byte is a valid `bool`, so boolean sequences take the
/// per-element path (the wire bytes are identical, one byte per value).
///
/// User types may opt in — a `#[repr(transparent)]` newtype over a scalar
/// that implements `Pod` qualifies — which extends the fast path and the
/// [`as_binary`](crate::as_binary) wrapper to them.
pub trait Scalar: Pod {}

impl Scalar for u8 {}
impl Scalar for u16 {}
impl Scalar for u32 {}
impl Scalar for u64 {}
impl Scalar for i8 {}
impl Scalar for i16 {}
impl Scalar for i32 {}
impl Scalar for i64 {}
impl Scalar for f32 {}
impl Scalar for f64 {}

/// Views a scalar slice as raw bytes, in host byte order.
pub(crate) fn as_bytes<T: Scalar>(items: &[T]) -> &[u8] {
    bytemuck::cast_slice(items)
}

/// Views a scalar slice as mutable raw bytes for in-place loads.
pub(crate) fn as_bytes_mut<T: Scalar>(items: &mut [T]) -> &mut [u8] {
    bytemuck::cast_slice_mut(items)
}
