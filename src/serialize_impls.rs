//! `Save`/`Load` implementations for the built-in shapes.
//!
//! One section per dispatch rule: scalars, booleans, strings, resizable
//! sequences, associative containers, fixed arrays, tuples, and owning
//! handles. The polymorphic handles live in [`crate::polymorphic`]; the raw
//! byte wrapper lives in [`crate::binary`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use crate::archive::{InputArchive, OutputArchive};
use crate::error::{PolyarcError, Result};
use crate::scalar::{as_bytes, as_bytes_mut};
use crate::serialize::{Load, Save};

// --- Fundamental scalars ---

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Save for $ty {
            fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
                archive.write_bytes(&self.to_ne_bytes())
            }

            fn save_slice(items: &[Self], archive: &mut OutputArchive<'_>) -> Result<()> {
                archive.write_bytes(as_bytes(items))
            }
        }

        impl Load for $ty {
            fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
                let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                archive.read_bytes(&mut bytes)?;
                *self = <$ty>::from_ne_bytes(bytes);
                Ok(())
            }

            fn load_slice(items: &mut [Self], archive: &mut InputArchive<'_>) -> Result<()> {
                archive.read_bytes(as_bytes_mut(items))
            }
        }
    )*};
}

impl_scalar!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

// --- Booleans ---
//
// One byte on the wire. Not a `Scalar`: an arbitrary byte is not a valid
// `bool`, so sequences of booleans go element by element (same bytes,
// validated on the way in).

impl Save for bool {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        archive.write_bytes(&[u8::from(*self)])
    }
}

impl Load for bool {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let mut byte = [0u8; 1];
        archive.read_bytes(&mut byte)?;
        *self = byte[0] != 0;
        Ok(())
    }
}

// --- Strings ---

impl Save for String {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        archive.write_len(self.len())?;
        archive.write_bytes(self.as_bytes())
    }
}

impl Load for String {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let len = archive.read_len()?;
        let mut bytes = vec![0u8; len];
        archive.read_bytes(&mut bytes)?;
        *self = String::from_utf8(bytes).map_err(|e| {
            PolyarcError::InvalidValue(format!("string payload is not valid UTF-8: {e}"))
        })?;
        Ok(())
    }
}

// --- Resizable linear sequences ---

impl<T: Save> Save for Vec<T> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        archive.write_len(self.len())?;
        T::save_slice(self, archive)
    }
}

impl<T: Load + Default> Load for Vec<T> {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let len = archive.read_len()?;
        self.resize_with(len, T::default);
        T::load_slice(self, archive)
    }
}

impl<T: Save> Save for VecDeque<T> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        archive.write_len(self.len())?;
        for item in self {
            item.save(archive)?;
        }
        Ok(())
    }
}

impl<T: Load + Default> Load for VecDeque<T> {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let len = archive.read_len()?;
        self.resize_with(len, T::default);
        for item in self.iter_mut() {
            item.load(archive)?;
        }
        Ok(())
    }
}

// --- Keyed associative containers ---
//
// Header identical to sequences, entries dispatched as pairs. Loads build
// each entry in a default-constructed temporary and move it in; drop glue
// reclaims the temporary on every path.

impl<K: Save, V: Save, S> Save for HashMap<K, V, S> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        archive.write_len(self.len())?;
        for (key, value) in self {
            key.save(archive)?;
            value.save(archive)?;
        }
        Ok(())
    }
}

impl<K, V, S> Load for HashMap<K, V, S>
where
    K: Load + Default + Eq + Hash,
    V: Load + Default,
    S: BuildHasher,
{
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let len = archive.read_len()?;
        for _ in 0..len {
            let mut entry = <(K, V)>::default();
            entry.load(archive)?;
            self.insert(entry.0, entry.1);
        }
        Ok(())
    }
}

impl<K: Save, V: Save> Save for BTreeMap<K, V> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        archive.write_len(self.len())?;
        for (key, value) in self {
            key.save(archive)?;
            value.save(archive)?;
        }
        Ok(())
    }
}

impl<K, V> Load for BTreeMap<K, V>
where
    K: Load + Default + Ord,
    V: Load + Default,
{
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let len = archive.read_len()?;
        for _ in 0..len {
            let mut entry = <(K, V)>::default();
            entry.load(archive)?;
            self.insert(entry.0, entry.1);
        }
        Ok(())
    }
}

impl<T: Save, S> Save for HashSet<T, S> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        archive.write_len(self.len())?;
        for item in self {
            item.save(archive)?;
        }
        Ok(())
    }
}

impl<T, S> Load for HashSet<T, S>
where
    T: Load + Default + Eq + Hash,
    S: BuildHasher,
{
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let len = archive.read_len()?;
        for _ in 0..len {
            let mut item = T::default();
            item.load(archive)?;
            self.insert(item);
        }
        Ok(())
    }
}

impl<T: Save> Save for BTreeSet<T> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        archive.write_len(self.len())?;
        for item in self {
            item.save(archive)?;
        }
        Ok(())
    }
}

impl<T: Load + Default + Ord> Load for BTreeSet<T> {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let len = archive.read_len()?;
        for _ in 0..len {
            let mut item = T::default();
            item.load(archive)?;
            self.insert(item);
        }
        Ok(())
    }
}

// --- Fixed-size arrays ---
//
// The length is part of the type, so nothing is written for it.

impl<T: Save, const N: usize> Save for [T; N] {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        T::save_slice(self.as_slice(), archive)
    }
}

impl<T: Load, const N: usize> Load for [T; N] {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        T::load_slice(self.as_mut_slice(), archive)
    }
}

// --- Pairs and tuples ---
//
// Components in declaration order, no framing. A tuple passed to a
// top-level `save`/`load` therefore behaves as a batch of values.

macro_rules! impl_tuple {
    ($($idx:tt $name:ident),+) => {
        impl<$($name: Save),+> Save for ($($name,)+) {
            fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
                $( self.$idx.save(archive)?; )+
                Ok(())
            }
        }

        impl<$($name: Load),+> Load for ($($name,)+) {
            fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
                $( self.$idx.load(archive)?; )+
                Ok(())
            }
        }
    };
}

impl_tuple!(0 A);
impl_tuple!(0 A, 1 B);
impl_tuple!(0 A, 1 B, 2 C);
impl_tuple!(0 A, 1 B, 2 C, 3 D);
impl_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);
impl_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I);
impl_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J);
impl_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K);
impl_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K, 11 L);

// --- Owning handles, non-polymorphic ---

impl<T: Save> Save for Box<T> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        (**self).save(archive)
    }
}

impl<T: Load + Default> Load for Box<T> {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let mut value = T::default();
        value.load(archive)?;
        **self = value;
        Ok(())
    }
}

/// The nullable owning handle. `None` has no wire representation: saving it
/// is an error, and a load always installs a freshly constructed object.
impl<T: Save> Save for Option<Box<T>> {
    fn save(&self, archive: &mut OutputArchive<'_>) -> Result<()> {
        match self {
            Some(value) => (**value).save(archive),
            None => Err(PolyarcError::NullHandle(format!(
                "empty owning handle of type `{}`",
                std::any::type_name::<T>()
            ))),
        }
    }
}

impl<T: Load + Default> Load for Option<Box<T>> {
    fn load(&mut self, archive: &mut InputArchive<'_>) -> Result<()> {
        let mut value = T::default();
        value.load(archive)?;
        *self = Some(Box::new(value));
        Ok(())
    }
}
