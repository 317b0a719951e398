//! Objects backed by an [`AttributeBag`] that serialize to and from KDL
//! node trees, one child node per attribute.
//!
//! ```kdl
//! person {
//!     name "Alice"
//!     age "25"
//! }
//! ```

pub mod accessor;
pub mod bag;
pub mod config;
pub mod document;
pub mod error;
pub mod node_ext;
pub mod policy;
pub mod text;
pub mod traversal;
pub mod value;

pub use accessor::{NodeAccessor, deserialize_field, serialize_field};
pub use bag::AttributeBag;
pub use config::{BoolLiterals, TreeConfig, ValueStyle};
pub use document::{
    DocumentError, from_document, load_document, load_object, parse_document, parse_str,
    render_document, save_document, save_object, to_document, to_kdl_string,
};
pub use error::{AttrError, ErrorKind};
pub use kdl::{KdlDocument, KdlNode, KdlValue};
pub use node_ext::KdlNodeExt;
pub use policy::{ErrorPolicy, LogOnly, MandatoryFields};
pub use text::AttrText;
pub use traversal::{ReadOutcome, deserialize_attributes, read_attributes, serialize_attributes};
pub use value::{AttrKind, AttrType, AttrValue};

/// A type whose state lives in an [`AttributeBag`].
///
/// The provided `serialize`/`deserialize` walk the bag generically, with the
/// type itself as the [`ErrorPolicy`]. Types holding `Nested` or `List`
/// attributes override both to emit their own wrapping nodes.
pub trait Serializable: ErrorPolicy {
    fn attributes(&self) -> &AttributeBag;
    fn attributes_mut(&mut self) -> &mut AttributeBag;

    fn serialize(&self, node: &mut KdlNode, config: &TreeConfig) -> Result<bool, AttrError> {
        serialize_attributes(self.attributes(), node, config, self)
    }

    fn deserialize(&mut self, node: &KdlNode, config: &TreeConfig) -> Result<bool, AttrError> {
        let outcome = read_attributes(self.attributes(), node, config, &*self)?;
        Ok(outcome.apply(self.attributes_mut()))
    }

    fn get<T: AttrType>(&self, key: &str) -> Result<T, AttrError>
    where
        Self: Sized,
    {
        self.attributes().get(key)
    }

    fn get_or<T: AttrType>(&self, key: &str, default: T) -> T
    where
        Self: Sized,
    {
        self.attributes().get_or(key, default)
    }

    fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Result<Option<AttrValue>, AttrError>
    where
        Self: Sized,
    {
        self.attributes_mut().set(key, value)
    }
}

/// A bare bag logs every failure.
impl ErrorPolicy for AttributeBag {}

impl Serializable for AttributeBag {
    fn attributes(&self) -> &AttributeBag {
        self
    }

    fn attributes_mut(&mut self) -> &mut AttributeBag {
        self
    }
}

/// Serialize `value` into a new node named `name`.
pub fn to_node<T: Serializable + ?Sized>(
    value: &T,
    name: &str,
    config: &TreeConfig,
) -> Result<(KdlNode, bool), AttrError> {
    let mut node = KdlNode::new(name);
    let complete = value.serialize(&mut node, config)?;
    Ok((node, complete))
}

/// Build a fresh `T` and populate it from `node`.
pub fn from_node<T: Serializable + Default>(
    node: &KdlNode,
    config: &TreeConfig,
) -> Result<(T, bool), AttrError> {
    let mut value = T::default();
    let complete = value.deserialize(node, config)?;
    Ok((value, complete))
}
