use std::fmt;

use crate::bag::AttributeBag;

/// Tag identifying which type an [`AttrValue`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKind {
    Text,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Bool,
    Double,
    Float,
    Nested,
    List,
}

impl AttrKind {
    pub fn name(self) -> &'static str {
        match self {
            AttrKind::Text => "text",
            AttrKind::Int32 => "i32",
            AttrKind::UInt32 => "u32",
            AttrKind::Int64 => "i64",
            AttrKind::UInt64 => "u64",
            AttrKind::Bool => "bool",
            AttrKind::Double => "f64",
            AttrKind::Float => "f32",
            AttrKind::Nested => "nested",
            AttrKind::List => "list",
        }
    }

    /// Composite kinds have no generic node mapping.
    pub fn is_composite(self) -> bool {
        matches!(self, AttrKind::Nested | AttrKind::List)
    }
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Bool(bool),
    Double(f64),
    Float(f32),
    /// Another object's attributes, serialized by a hand-written override.
    Nested(AttributeBag),
    List(Vec<AttributeBag>),
}

impl AttrValue {
    pub fn kind(&self) -> AttrKind {
        match self {
            AttrValue::Text(_) => AttrKind::Text,
            AttrValue::Int32(_) => AttrKind::Int32,
            AttrValue::UInt32(_) => AttrKind::UInt32,
            AttrValue::Int64(_) => AttrKind::Int64,
            AttrValue::UInt64(_) => AttrKind::UInt64,
            AttrValue::Bool(_) => AttrKind::Bool,
            AttrValue::Double(_) => AttrKind::Double,
            AttrValue::Float(_) => AttrKind::Float,
            AttrValue::Nested(_) => AttrKind::Nested,
            AttrValue::List(_) => AttrKind::List,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bag(&self) -> Option<&AttributeBag> {
        match self {
            AttrValue::Nested(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeBag]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Rust types stored under exactly one [`AttrKind`].
pub trait AttrType: Sized {
    const KIND: AttrKind;

    fn from_attr(value: &AttrValue) -> Option<Self>;
    fn into_attr(self) -> AttrValue;
}

macro_rules! impl_attr_type {
    ($ty:ty, $variant:ident) => {
        impl AttrType for $ty {
            const KIND: AttrKind = AttrKind::$variant;

            fn from_attr(value: &AttrValue) -> Option<Self> {
                match value {
                    AttrValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_attr(self) -> AttrValue {
                AttrValue::$variant(self)
            }
        }

        impl From<$ty> for AttrValue {
            fn from(value: $ty) -> Self {
                AttrValue::$variant(value)
            }
        }
    };
}

impl_attr_type!(String, Text);
impl_attr_type!(i32, Int32);
impl_attr_type!(u32, UInt32);
impl_attr_type!(i64, Int64);
impl_attr_type!(u64, UInt64);
impl_attr_type!(bool, Bool);
impl_attr_type!(f64, Double);
impl_attr_type!(f32, Float);
impl_attr_type!(AttributeBag, Nested);
impl_attr_type!(Vec<AttributeBag>, List);

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(AttrValue::from("x").kind(), AttrKind::Text);
        assert_eq!(AttrValue::from(1i32).kind(), AttrKind::Int32);
        assert_eq!(AttrValue::from(1u64).kind(), AttrKind::UInt64);
        assert_eq!(AttrValue::from(0.5f32).kind(), AttrKind::Float);
        assert_eq!(AttrValue::from(AttributeBag::new()).kind(), AttrKind::Nested);
        assert!(AttrKind::List.is_composite());
        assert!(!AttrKind::Double.is_composite());
    }

    #[test]
    fn from_attr_requires_exact_kind() {
        let value = AttrValue::Int32(25);
        assert_eq!(i32::from_attr(&value), Some(25));
        assert_eq!(i64::from_attr(&value), None);
        assert_eq!(u32::from_attr(&value), None);
        assert_eq!(String::from_attr(&value), None);
    }
}
