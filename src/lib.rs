//! # Polyarc
//!
//! A compact binary serialization library for Rust with compile-time
//! dispatch and runtime polymorphic type registration.
//!
//! ## Overview
//!
//! Polyarc converts live object graphs into a dense byte sequence and
//! reconstructs them losslessly. It supports two operating modes:
//!
//! *   **Static mode:** both endpoints know the type. Nothing but the
//!     payload is written — a pair of `u32`s costs exactly eight bytes.
//! *   **Polymorphic mode:** an owning handle to a trait object is saved
//!     with a leading stable 64-bit identifier naming the concrete type, so
//!     the reader can reconstruct the right subtype without knowing it
//!     statically.
//!
//! ### Key properties
//!
//! *   **Compile-time dispatch:** every supported shape (scalars, strings,
//!     sequences, maps, sets, arrays, tuples, owning handles) is routed to
//!     its encoder by the trait system; there is no runtime format
//!     negotiation and no self-description on the wire.
//! *   **Contiguous fast path:** sequences of fixed-width scalars are
//!     copied in a single pass rather than element by element.
//! *   **Stable identifiers:** polymorphic types are named by the first 8
//!     bytes of the SHA-1 of a user-chosen string, computed at compile time
//!     by a `const fn`, so identifiers agree byte-for-byte across builds
//!     and platforms.
//! *   **No panics, no unsafe:** the library propagates every failure as a
//!     [`Result`] and performs its raw byte transmutes through `bytemuck`'s
//!     checked casts (enforced by the lints below).
//!
//! ## Usage
//!
//! ### Static serialization
//!
//! ```rust
//! use polyarc::{InputArchive, OutputArchive, Load, Save};
//!
//! #[derive(Save, Load, Default, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let mut data = Vec::new();
//! OutputArchive::new(&mut data).save(&Point { x: 1337, y: 1338 })?;
//!
//! let mut point = Point::default();
//! InputArchive::new(&data).load(&mut point)?;
//! assert_eq!(point, Point { x: 1337, y: 1338 });
//! # Ok::<(), polyarc::PolyarcError>(())
//! ```
//!
//! ### Polymorphic serialization
//!
//! ```rust
//! use polyarc::{
//!     make_id, register_types, InputArchive, Load, OutputArchive, Polymorphic, Save,
//! };
//!
//! #[derive(Save, Load, Default)]
//! struct Person { name: String }
//! impl Polymorphic for Person {}
//!
//! #[derive(Save, Load, Default)]
//! struct Student { person: Person, university: String }
//! impl Polymorphic for Student {}
//!
//! register_types! {
//!     Person  => make_id("v1::person"),
//!     Student => make_id("v1::student"),
//! }
//!
//! let student = Student {
//!     person: Person { name: "1337".into() },
//!     university: "1337University".into(),
//! };
//!
//! let handle: Box<dyn Polymorphic> = Box::new(student);
//! let mut data = Vec::new();
//! OutputArchive::new(&mut data).save(&handle)?;
//!
//! let mut loaded: Option<Box<dyn Polymorphic>> = None;
//! InputArchive::new(&data).load(&mut loaded)?;
//! let student = loaded
//!     .ok_or(polyarc::PolyarcError::NullHandle(String::new()))?
//!     .downcast::<Student>()?;
//! assert_eq!(student.university, "1337University");
//! # Ok::<(), polyarc::PolyarcError>(())
//! ```
//!
//! ## Wire format
//!
//! *   Fixed-width scalars: raw bytes, **host byte order**.
//! *   Booleans: one byte, `0` or `1`.
//! *   Resizable sequences and associative containers: `u32` length prefix,
//!     then the element payloads.
//! *   Fixed arrays, pairs, tuples: elements in order, no header.
//! *   Owning handles: the payload of the held value; polymorphic handles
//!     prepend the 64-bit identifier.
//!
//! The host-endian wire keeps encoding a straight memory copy; exchanging
//! archives between hosts of different endianness is not supported.
//!
//! ## Limits
//!
//! *   **Acyclic graphs only.** There is no object-identity tracking; a
//!     cyclic structure would recurse without bound, which is why shared
//!     ownership (`Rc`/`Arc`) is unsupported.
//! *   **Trusted input.** Lengths are honored as read; the library reports
//!     truncated or malformed input as errors but does not defend against
//!     adversarial buffers designed to exhaust memory.
//! *   **Single-threaded archives.** An archive mutably borrows its buffer
//!     for the session. The polymorphic registry, by contrast, is fully
//!     thread-safe: concurrent serialization and late registration are
//!     supported.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// --- PUBLIC API MODULES ---
pub mod api;
pub mod archive;
pub mod binary;
pub mod error;
pub mod ident;
pub mod polymorphic;
pub mod registry;
pub mod scalar;
pub mod serialize;

// Private modules
mod serialize_impls;

// --- RE-EXPORTS ---

pub use api::{from_bytes, from_bytes_into, to_bytes};
pub use archive::{InputArchive, OutputArchive, OwnedInputArchive};
pub use binary::{as_binary, as_binary_mut, Binary, BinaryMut};
pub use error::{PolyarcError, Result};
pub use ident::make_id;
pub use polymorphic::{as_polymorphic, AsPolymorphic, Polymorphic};
pub use registry::register;
pub use scalar::Scalar;
pub use serialize::{Load, Save};

// Re-export the derive macros so they are accessible as `polyarc::Save` /
// `polyarc::Load` next to the traits they implement.
pub use polyarc_derive::{Load, Save};
