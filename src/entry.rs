//! Entry: key/value storage with an immutable-key public view.
//!
//! The key is a private field. Everything outside this module reads it
//! through `get_value`/`get_value_mut`/`key`, which only hand out `&K`.
//! Assignment reaches the key through `KeyValueMut`, a single-use view
//! mutably borrowed from the entry and consumed by the one assignment
//! that created it.

use core::fmt;

/// One key/value slot of an ordered container.
///
/// The key can be read but never written through any public accessor:
///
/// ```compile_fail
/// use keyed_entry::Entry;
///
/// let mut e: Entry<i32, String> = Entry::from_parts(1, "a".to_string());
/// let (key, _value) = e.get_value_mut();
/// *key = 2;
/// ```
///
/// Whole-entry assignment (`assign`, `assign_from`, `assign_pair`)
/// replaces the key by assigning to it in place rather than dropping
/// and rebuilding the entry.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

/// Mutable-key view of an `Entry`.
///
/// Only `Entry::ref_mut` creates one. Both assignment methods take
/// `self`, so a view performs exactly one assignment and the borrow of
/// the entry ends with it.
pub struct KeyValueMut<'a, K, V> {
    key: &'a mut K,
    value: &'a mut V,
}

impl<'a, K, V> KeyValueMut<'a, K, V> {
    /// Copy-assign both parts. `clone_from` lets the key reuse what it
    /// already owns (a `String` keeps its buffer).
    #[inline]
    pub(crate) fn assign_ref(self, key: &K, value: &V)
    where
        K: Clone,
        V: Clone,
    {
        self.key.clone_from(key);
        self.value.clone_from(value);
    }

    #[inline]
    pub(crate) fn assign_moved(self, (key, value): (K, V)) {
        *self.key = key;
        *self.value = value;
    }
}

impl<K, V> Entry<K, V> {
    /// Build an entry, converting each part from its own argument type.
    ///
    /// ```
    /// use keyed_entry::Entry;
    ///
    /// let e: Entry<u64, String> = Entry::new(3u32, "abc");
    /// assert_eq!(e.get_value(), (&3, &"abc".to_string()));
    /// ```
    #[inline]
    pub fn new(key: impl Into<K>, value: impl Into<V>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub const fn from_parts(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Build each part in place from its own constructor.
    #[inline]
    pub fn new_with<FK, FV>(make_key: FK, make_value: FV) -> Self
    where
        FK: FnOnce() -> K,
        FV: FnOnce() -> V,
    {
        Self {
            key: make_key(),
            value: make_value(),
        }
    }

    /// Immutable-key view of the stored pair.
    #[inline]
    pub fn get_value(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Immutable-key view of a mutable entry: the value is writable, the
    /// key is not.
    #[inline]
    pub fn get_value_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Move view: give up the entry and take both parts by value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) fn ref_mut(&mut self) -> KeyValueMut<'_, K, V> {
        KeyValueMut {
            key: &mut self.key,
            value: &mut self.value,
        }
    }

    /// Move-assign `source` onto this entry.
    #[inline]
    pub fn assign(&mut self, source: Self) -> &mut Self {
        self.ref_mut().assign_moved(source.into_parts());
        self
    }

    /// Copy-assign `source` onto this entry; `source` is unchanged.
    ///
    /// Key and value are assigned separately. If the value's clone
    /// panics the key has already been assigned.
    #[inline]
    pub fn assign_from(&mut self, source: &Self) -> &mut Self
    where
        K: Clone,
        V: Clone,
    {
        let (key, value) = source.get_value();
        self.ref_mut().assign_ref(key, value);
        self
    }

    /// Assign a standalone pair onto this entry: moved in when owned,
    /// copy-assigned when borrowed.
    ///
    /// Only pair-shaped arguments are accepted:
    ///
    /// ```compile_fail
    /// use keyed_entry::Entry;
    ///
    /// let mut e: Entry<i32, String> = Entry::default();
    /// e.assign_pair((1, "converted implicitly"));
    /// ```
    ///
    /// ```compile_fail
    /// use keyed_entry::Entry;
    ///
    /// let mut a: Entry<i32, String> = Entry::default();
    /// let b: Entry<i32, String> = Entry::default();
    /// a.assign_pair(b);
    /// ```
    #[inline]
    pub fn assign_pair<P>(&mut self, pair: P) -> &mut Self
    where
        P: PairSource<K, V>,
    {
        pair.assign_into(self.ref_mut());
        self
    }
}

impl<K: Clone, V: Clone> Clone for Entry<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry")
            .field(&self.key)
            .field(&self.value)
            .finish()
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

impl<K: Clone, V: Clone> From<&(K, V)> for Entry<K, V> {
    #[inline]
    fn from(pair: &(K, V)) -> Self {
        Self {
            key: pair.0.clone(),
            value: pair.1.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq<(K, V)> for Entry<K, V> {
    fn eq(&self, other: &(K, V)) -> bool {
        self.key == other.0 && self.value == other.1
    }
}

/// Argument types accepted by `Entry::assign_pair`: `(K, V)`,
/// `&(K, V)` and `&mut (K, V)`. Sealed.
pub trait PairSource<K, V>: sealed::Sealed<K, V> {}

impl<K, V> PairSource<K, V> for (K, V) {}
impl<K: Clone, V: Clone> PairSource<K, V> for &(K, V) {}
impl<K: Clone, V: Clone> PairSource<K, V> for &mut (K, V) {}

mod sealed {
    use super::KeyValueMut;

    pub trait Sealed<K, V> {
        fn assign_into(self, view: KeyValueMut<'_, K, V>);
    }

    impl<K, V> Sealed<K, V> for (K, V) {
        #[inline]
        fn assign_into(self, view: KeyValueMut<'_, K, V>) {
            view.assign_moved(self);
        }
    }

    impl<K: Clone, V: Clone> Sealed<K, V> for &(K, V) {
        #[inline]
        fn assign_into(self, view: KeyValueMut<'_, K, V>) {
            view.assign_ref(&self.0, &self.1);
        }
    }

    impl<K: Clone, V: Clone> Sealed<K, V> for &mut (K, V) {
        #[inline]
        fn assign_into(self, view: KeyValueMut<'_, K, V>) {
            view.assign_ref(&self.0, &self.1);
        }
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for Entry<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&(&self.key, &self.value), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for Entry<K, V>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <(K, V) as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}
