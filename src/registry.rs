//! The polymorphic type registry.
//!
//! One process-wide registry per archive direction, created lazily at first
//! use. Each maps the stable 64-bit identifier to an encode or decode
//! procedure, and the runtime type descriptor to the identifier. A
//! reader/writer lock protects both maps: serialization traffic takes the
//! read side, registration the write side, and the lock is always released
//! before a user serialize hook runs — so hooks may themselves register
//! further types without deadlocking.
//!
//! Registration is monotone. Entries are only ever added; a conflicting
//! re-registration is silently dropped and surfaces later, at first use of
//! the losing type, as [`PolyarcError::UndeclaredType`]. Registering the
//! same pair twice is a no-op, so registration calls may be repeated freely
//! (startup code, tests, hooks).

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use crate::archive::{InputArchive, OutputArchive};
use crate::error::{PolyarcError, Result};
use crate::polymorphic::Polymorphic;
use crate::serialize::{Load, Save};

/// Encode procedure: writes the concrete static payload of `object`.
type SaveFn = fn(&mut OutputArchive<'_>, &dyn Polymorphic) -> Result<()>;

/// Decode procedure: constructs the registered concrete type, loads into
/// it, and returns it behind the base.
type LoadFn = fn(&mut InputArchive<'_>) -> Result<Box<dyn Polymorphic>>;

/// Identifier and descriptor maps for one archive direction.
struct Registry<P> {
    /// identifier -> procedure
    methods: HashMap<u64, P>,
    /// runtime type descriptor -> identifier
    ids: HashMap<TypeId, u64>,
}

impl<P> Registry<P> {
    fn new() -> Self {
        Self {
            methods: HashMap::new(),
            ids: HashMap::new(),
        }
    }

    /// Insert-if-absent into both maps. First registration wins.
    fn insert(&mut self, id: u64, type_id: TypeId, method: P) {
        self.methods.entry(id).or_insert(method);
        self.ids.entry(type_id).or_insert(id);
    }
}

static OUTPUT_REGISTRY: LazyLock<RwLock<Registry<SaveFn>>> =
    LazyLock::new(|| RwLock::new(Registry::new()));

static INPUT_REGISTRY: LazyLock<RwLock<Registry<LoadFn>>> =
    LazyLock::new(|| RwLock::new(Registry::new()));

/// Registers `T` under `id` with both built-in archive directions.
///
/// The identifier is normally derived from a stable name with
/// [`make_id`](crate::make_id); the [`register_types!`](crate::register_types)
/// macro wraps this function for lists of types. Registration never fails:
/// conflicts are dropped silently and show up as
/// [`PolyarcError::UndeclaredType`] when the losing type is first
/// serialized.
pub fn register<T>(id: u64)
where
    T: Polymorphic + Save + Load + Default,
{
    let save_method: SaveFn = |archive, object| {
        // The registry routed here by concrete TypeId, so the downcast only
        // fails if a conflicting registration was dropped earlier.
        let concrete = object.downcast_ref::<T>().ok_or_else(|| {
            PolyarcError::UndeclaredType(format!(
                "encode procedure registered for a different type than `{}`",
                std::any::type_name::<T>()
            ))
        })?;
        concrete.save(archive)
    };

    let load_method: LoadFn = |archive| {
        let mut object = T::default();
        object.load(archive)?;
        Ok(Box::new(object) as Box<dyn Polymorphic>)
    };

    let type_id = TypeId::of::<T>();
    OUTPUT_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(id, type_id, save_method);
    INPUT_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(id, type_id, load_method);
}

/// Encodes a polymorphic object: identifier first, payload second.
///
/// The registry lock is released before any byte is written.
pub(crate) fn encode(archive: &mut OutputArchive<'_>, object: &dyn Polymorphic) -> Result<()> {
    let any: &dyn Any = object;
    let type_id = any.type_id();

    let (id, method) = {
        let registry = OUTPUT_REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let id = *registry.ids.get(&type_id).ok_or_else(|| {
            PolyarcError::UndeclaredType(
                "runtime type was never registered for polymorphic encoding".to_owned(),
            )
        })?;
        let method = *registry.methods.get(&id).ok_or_else(|| {
            PolyarcError::UndeclaredType(format!(
                "no encode procedure registered under identifier {id:#018x}"
            ))
        })?;
        (id, method)
    };

    id.save(archive)?;
    method(archive, object)
}

/// Decodes a polymorphic object: reads the identifier, constructs the
/// registered concrete type, loads its payload.
///
/// The registry lock is released before the construction procedure runs.
pub(crate) fn decode(archive: &mut InputArchive<'_>) -> Result<Box<dyn Polymorphic>> {
    let mut id = 0u64;
    id.load(archive)?;

    let method = {
        let registry = INPUT_REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        *registry.methods.get(&id).ok_or_else(|| {
            PolyarcError::UndeclaredType(format!(
                "no type registered under identifier {id:#018x}"
            ))
        })?
    };

    method(archive)
}

/// Registers a list of `Type => identifier` pairs with both built-in
/// archive directions.
///
/// Call during process startup (or anywhere before the first polymorphic
/// operation); repeated calls are no-ops.
///
/// ```rust,ignore
/// polyarc::register_types! {
///     Person  => polyarc::make_id("v1::person"),
///     Student => polyarc::make_id("v1::student"),
/// }
/// ```
#[macro_export]
macro_rules! register_types {
    ($($ty:ty => $id:expr),+ $(,)?) => {
        $( $crate::registry::register::<$ty>($id); )+
    };
}
