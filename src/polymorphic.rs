//! Polymorphic serialization: trait objects with a wire identity.
//!
//! A type opts into polymorphic handling by implementing the [`Polymorphic`]
//! marker and being registered (see [`crate::registry`]). Saving a
//! `Box<dyn Polymorphic>` writes the type's stable 64-bit identifier
//! followed by its static payload; loading reads the identifier, constructs
//! the registered concrete type, and returns it behind the base trait.
//! Callers that expect a specific concrete type finish with
//! `downcast`.

use std::any::Any;

use crate::archive::{InputArchive, OutputArchive};
use crate::error::{PolyarcError, Result};
use crate::registry;
use crate::serialize::{Load, Save};

/// Marker for types that participate in polymorphic serialization.
///
/// The `Any` supertrait supplies the runtime type descriptor used to find
/// the registered identifier, and trait-object drop glue guarantees the
/// concrete destructor runs when a handle is dropped through the base.
///
/// ```rust
/// use polyarc::Polymorphic;
///
/// #[derive(Default)]
/// struct Circle { radius: f64 }
///
/// impl Polymorphic for Circle {}
/// ```
pub trait Polymorphic: Any {}

impl dyn Polymorphic {
    /// Whether the concrete type behind this reference is `T`.
    pub fn is<T: Polymorphic>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    /// Borrows the concrete object if it is a `T`.
    pub fn downcast_ref<T: Polymorphic>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Mutably borrows the concrete object if it is a `T`.
    pub fn downcast_mut<T: Polymorphic>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }

    /// Converts an owned polymorphic handle into its concrete type.
    ///
    /// This is the final step of a typed polymorphic load: the registry
    /// reconstructs the object behind the base, and the caller claims the
    /// static type it expects. The object is dropped if the conversion
    /// fails.
    ///
    /// # Errors
    ///
    /// [`PolyarcError::TypeMismatch`] if the held object is not a `T`.
    pub fn downcast<T: Polymorphic>(self: Box<Self>) -> Result<Box<T>> {
        let any: Box<dyn Any> = self;
        any.downcast::<T>().map_err(|_| {
            PolyarcError::TypeMismatch(format!(
                "loaded polymorphic object cannot be downcast to `{}`",
                std::any::type_name::<T>()
            ))
        })
    }
}

impl Save for Box<dyn Polymorphic> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        registry::encode(archive, &**self)
    }
}

impl Load for Box<dyn Polymorphic> {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        *self = registry::decode(archive)?;
        Ok(())
    }
}

impl Save for Option<Box<dyn Polymorphic>> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        match self {
            Some(object) => registry::encode(archive, &**object),
            None => Err(PolyarcError::NullHandle(
                "empty polymorphic owning handle".to_owned(),
            )),
        }
    }
}

impl Load for Option<Box<dyn Polymorphic>> {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        *self = Some(registry::decode(archive)?);
        Ok(())
    }
}

/// A borrowed value saved with its leading polymorphic identifier.
///
/// Produced by [`as_polymorphic`]; save-only. The encoding is byte-identical
/// to saving an owning polymorphic handle that holds the same object, which
/// lets a by-value sender interoperate with a handle-based receiver.
#[derive(Clone, Copy)]
pub struct AsPolymorphic<'a> {
    object: &'a dyn Polymorphic,
}

/// Wraps a value so it is saved with its polymorphic identifier.
///
/// ```rust,no_run
/// use polyarc::{as_polymorphic, OutputArchive, Polymorphic};
///
/// #[derive(Default)]
/// struct Circle { radius: f64 }
/// impl Polymorphic for Circle {}
/// # impl polyarc::Save for Circle {
/// #     fn save(&self, a: &mut OutputArchive<'_>) -> polyarc::Result<()> {
/// #         polyarc::Save::save(&self.radius, a)
/// #     }
/// # }
///
/// let mut data = Vec::new();
/// let mut out = OutputArchive::new(&mut data);
/// out.save(&as_polymorphic(&Circle { radius: 1.0 }))?;
/// # Ok::<(), polyarc::PolyarcError>(())
/// ```
pub fn as_polymorphic<T: Polymorphic>(object: &T) -> AsPolymorphic<'_> {
    AsPolymorphic { object }
}

impl Save for AsPolymorphic<'_> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        registry::encode(archive, self.object)
    }
}
