//! Lookup tables supplied by the caller.

use indexmap::IndexMap;
use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    rc::Rc,
    sync::Arc,
};

/// The trait for abstracting the name-keyed tables of views and metrics.
pub trait SymbolTable {
    /// The value stored under each name.
    type Value;

    /// Return the value registered under `name`, if any.
    fn lookup(&self, name: &str) -> Option<&Self::Value>;
}

impl<K, V, S> SymbolTable for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    type Value = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<K, V> SymbolTable for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
{
    type Value = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<K, V, S> SymbolTable for IndexMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    type Value = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

/// An absent table, which contains no names at all.
impl<T> SymbolTable for Option<T>
where
    T: SymbolTable,
{
    type Value = T::Value;

    fn lookup(&self, name: &str) -> Option<&Self::Value> {
        self.as_ref()?.lookup(name)
    }
}

impl<T: ?Sized> SymbolTable for &T
where
    T: SymbolTable,
{
    type Value = T::Value;

    fn lookup(&self, name: &str) -> Option<&Self::Value> {
        (**self).lookup(name)
    }
}

impl<T: ?Sized> SymbolTable for Rc<T>
where
    T: SymbolTable,
{
    type Value = T::Value;

    fn lookup(&self, name: &str) -> Option<&Self::Value> {
        (**self).lookup(name)
    }
}

impl<T: ?Sized> SymbolTable for Arc<T>
where
    T: SymbolTable,
{
    type Value = T::Value;

    fn lookup(&self, name: &str) -> Option<&Self::Value> {
        (**self).lookup(name)
    }
}
