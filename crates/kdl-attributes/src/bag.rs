use std::collections::HashMap;

use crate::error::AttrError;
use crate::value::{AttrKind, AttrType, AttrValue};

/// Ordered mapping from attribute name to typed value.
///
/// Entries keep declaration order, which is also the order their nodes are
/// emitted in. The kind of a key is fixed by the first `set`; a later `set`
/// with another kind is rejected. Use [`AttributeBag::remove`] first to
/// re-tag a key on purpose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBag {
    entries: Vec<(String, AttrValue)>,
    index: HashMap<String, usize>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a default value while building a bag.
    ///
    /// # Panics
    ///
    /// Panics if `key` was already declared with a different kind.
    pub fn declare(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        let key = key.into();
        if let Err(err) = self.set(key.as_str(), value) {
            panic!("conflicting declarations: {err}");
        }
        self
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Result<Option<AttrValue>, AttrError> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&idx) => {
                let slot = &mut self.entries[idx].1;
                if slot.kind() != value.kind() {
                    return Err(AttrError::type_mismatch(key, slot.kind(), value.kind()));
                }
                Ok(Some(std::mem::replace(slot, value)))
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                Ok(None)
            }
        }
    }

    pub fn get<T: AttrType>(&self, key: &str) -> Result<T, AttrError> {
        let value = self.get_ref(key).ok_or_else(|| AttrError::not_found(key))?;
        T::from_attr(value).ok_or_else(|| AttrError::type_mismatch(key, T::KIND, value.kind()))
    }

    /// Like [`AttributeBag::get`], falling back to `default` when the key is
    /// absent or holds another kind.
    pub fn get_or<T: AttrType>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_ref(&self, key: &str) -> Option<&AttrValue> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn kind(&self, key: &str) -> Option<AttrKind> {
        self.get_ref(key).map(AttrValue::kind)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let idx = self.index.remove(key)?;
        let (_, value) = self.entries.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Overwrite an existing entry with a value of the same kind.
    pub(crate) fn replace_value(&mut self, key: &str, value: AttrValue) -> bool {
        match self.index.get(key) {
            Some(&idx) if self.entries[idx].1.kind() == value.kind() => {
                self.entries[idx].1 = value;
                true
            }
            _ => false,
        }
    }
}
