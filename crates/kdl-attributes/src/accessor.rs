use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

use kdl::KdlNode;

use crate::config::TreeConfig;
use crate::error::AttrError;
use crate::node_ext::KdlNodeExt;
use crate::text::AttrText;
use crate::value::{AttrKind, AttrValue};

/// Handle to one named child of a parent node.
///
/// `N` is `&KdlNode` on the read path and `&mut KdlNode` on the write path.
/// An accessor whose child could not be bound is null: it keeps the reason
/// and every read or write returns it.
#[derive(Debug)]
pub struct NodeAccessor<N> {
    name: String,
    target: Result<N, AttrError>,
}

impl<'a> NodeAccessor<&'a KdlNode> {
    /// Bind to the first child named `name`, without creating it.
    pub fn find(parent: impl Into<Option<&'a KdlNode>>, name: &str) -> Self {
        let target = match parent.into() {
            None => Err(null_target(name)),
            Some(parent) => parent
                .child(name)
                .ok_or_else(|| missing_element(name, parent.name_str())),
        };
        Self {
            name: name.to_string(),
            target,
        }
    }
}

impl<'a> NodeAccessor<&'a mut KdlNode> {
    /// Bind to the first child named `name`, appending it if absent.
    pub fn find_or_create(parent: impl Into<Option<&'a mut KdlNode>>, name: &str) -> Self {
        let target = match parent.into() {
            None => Err(null_target(name)),
            Some(parent) => Ok(parent.ensure_child(name)),
        };
        Self {
            name: name.to_string(),
            target,
        }
    }

    /// Bind mutably to an existing child named `name`.
    pub fn find_mut(parent: impl Into<Option<&'a mut KdlNode>>, name: &str) -> Self {
        let target = match parent.into() {
            None => Err(null_target(name)),
            Some(parent) => {
                let parent_name = parent.name_str().to_string();
                parent
                    .child_mut(name)
                    .ok_or_else(|| missing_element(name, parent_name))
            }
        };
        Self {
            name: name.to_string(),
            target,
        }
    }
}

fn null_target(name: &str) -> AttrError {
    tracing::debug!(node = name, "parent node is absent");
    AttrError::null_target(name)
}

fn missing_element(name: &str, parent: impl Into<String>) -> AttrError {
    let parent = parent.into();
    tracing::debug!(node = name, parent = %parent, "child node not found");
    AttrError::missing_element(name, parent)
}

impl<N: Deref<Target = KdlNode>> NodeAccessor<N> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_null(&self) -> bool {
        self.target.is_err()
    }

    pub fn node(&self) -> Option<&KdlNode> {
        self.target.as_deref().ok()
    }

    /// Why the accessor is null, if it is.
    pub fn error(&self) -> Option<&AttrError> {
        self.target.as_ref().err()
    }

    fn bound(&self) -> Result<&KdlNode, AttrError> {
        self.target.as_deref().map_err(|err| err.clone())
    }

    /// Parse the bound node's text as `T`.
    pub fn read<T: AttrText>(&self, config: &TreeConfig) -> Result<T, AttrError> {
        let node = self.bound()?;
        let text = node.text();
        let parsed = text.as_deref().and_then(|text| T::parse_text(text, config));
        match parsed {
            Some(value) => Ok(value),
            None => Err(AttrError::parse_failure(
                self.name.as_str(),
                text.map(Cow::into_owned),
                T::KIND,
            )),
        }
    }

    /// Read into `out`, leaving it untouched on failure.
    pub fn read_into<T: AttrText>(&self, out: &mut T, config: &TreeConfig) -> Result<(), AttrError> {
        *out = self.read(config)?;
        Ok(())
    }

    pub fn read_value(&self, kind: AttrKind, config: &TreeConfig) -> Result<AttrValue, AttrError> {
        match kind {
            AttrKind::Text => self.read::<String>(config).map(AttrValue::Text),
            AttrKind::Int32 => self.read::<i32>(config).map(AttrValue::Int32),
            AttrKind::UInt32 => self.read::<u32>(config).map(AttrValue::UInt32),
            AttrKind::Int64 => self.read::<i64>(config).map(AttrValue::Int64),
            AttrKind::UInt64 => self.read::<u64>(config).map(AttrValue::UInt64),
            AttrKind::Bool => self.read::<bool>(config).map(AttrValue::Bool),
            AttrKind::Double => self.read::<f64>(config).map(AttrValue::Double),
            AttrKind::Float => self.read::<f32>(config).map(AttrValue::Float),
            AttrKind::Nested | AttrKind::List => {
                Err(AttrError::unsupported(self.name.as_str(), kind))
            }
        }
    }
}

impl<N: DerefMut<Target = KdlNode>> NodeAccessor<N> {
    pub fn node_mut(&mut self) -> Option<&mut KdlNode> {
        self.target.as_deref_mut().ok()
    }

    /// Replace the bound node's text with the rendering of `value`.
    pub fn write<T: AttrText>(&mut self, value: &T, config: &TreeConfig) -> Result<(), AttrError> {
        let node = self.target.as_deref_mut().map_err(|err| err.clone())?;
        node.set_text(value.to_kdl(config.value_style));
        Ok(())
    }

    pub fn write_value(&mut self, value: &AttrValue, config: &TreeConfig) -> Result<(), AttrError> {
        match value {
            AttrValue::Text(v) => self.write(v, config),
            AttrValue::Int32(v) => self.write(v, config),
            AttrValue::UInt32(v) => self.write(v, config),
            AttrValue::Int64(v) => self.write(v, config),
            AttrValue::UInt64(v) => self.write(v, config),
            AttrValue::Bool(v) => self.write(v, config),
            AttrValue::Double(v) => self.write(v, config),
            AttrValue::Float(v) => self.write(v, config),
            AttrValue::Nested(_) | AttrValue::List(_) => {
                Err(AttrError::unsupported(self.name.as_str(), value.kind()))
            }
        }
    }
}

/// Write `value` into the child `name` of `parent`, creating the child.
pub fn serialize_field<T: AttrText>(
    parent: &mut KdlNode,
    name: &str,
    value: &T,
    config: &TreeConfig,
) -> Result<(), AttrError> {
    NodeAccessor::find_or_create(parent, name).write(value, config)
}

/// Read the child `name` of `parent` as `T`.
pub fn deserialize_field<'a, T: AttrText>(
    parent: impl Into<Option<&'a KdlNode>>,
    name: &str,
    config: &TreeConfig,
) -> Result<T, AttrError> {
    NodeAccessor::find(parent, name).read(config)
}
