use std::borrow::Cow;

use kdl::{KdlEntry, KdlNode, KdlValue};

/// Child lookup and text access on `KdlNode`.
///
/// A node's text is its first positional argument. Hand-written serializers
/// for composite attributes use these helpers to build wrapping nodes.
pub trait KdlNodeExt {
    fn name_str(&self) -> &str;
    fn arg(&self, index: usize) -> Option<&KdlValue>;
    fn text(&self) -> Option<Cow<'_, str>>;
    fn set_text(&mut self, value: KdlValue);
    fn child(&self, name: &str) -> Option<&KdlNode>;
    fn child_mut(&mut self, name: &str) -> Option<&mut KdlNode>;
    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a KdlNode> + 'a;
    /// First child named `name`, appended if absent.
    fn ensure_child(&mut self, name: &str) -> &mut KdlNode;
    /// Always appends a new child, even if one with the same name exists.
    fn append_child(&mut self, name: &str) -> &mut KdlNode;
}

impl KdlNodeExt for KdlNode {
    fn name_str(&self) -> &str {
        self.name().value()
    }

    fn arg(&self, index: usize) -> Option<&KdlValue> {
        self.entries()
            .iter()
            .filter(|entry| entry.name().is_none())
            .nth(index)
            .map(|entry| entry.value())
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        match self.arg(0)? {
            KdlValue::String(s) => Some(Cow::Borrowed(s.as_str())),
            KdlValue::Integer(n) => Some(Cow::Owned(n.to_string())),
            KdlValue::Float(f) => Some(Cow::Owned(f.to_string())),
            KdlValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            KdlValue::Null => None,
        }
    }

    fn set_text(&mut self, value: KdlValue) {
        match arg_entry_index(self, 0) {
            Some(idx) => update_entry_value(&mut self.entries_mut()[idx], value),
            None => self.entries_mut().insert(0, KdlEntry::new(value)),
        }
    }

    fn child(&self, name: &str) -> Option<&KdlNode> {
        self.children().and_then(|doc| doc.get(name))
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut KdlNode> {
        self.children_mut()
            .as_mut()
            .and_then(|doc| doc.get_mut(name))
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a KdlNode> + 'a {
        self.iter_children()
            .filter(move |child| child.name_str() == name)
    }

    fn ensure_child(&mut self, name: &str) -> &mut KdlNode {
        let doc = self.ensure_children();
        let idx = match doc.nodes().iter().position(|node| node.name_str() == name) {
            Some(idx) => idx,
            None => {
                tracing::debug!(node = name, "creating child node");
                doc.nodes_mut().push(KdlNode::new(name));
                doc.nodes().len() - 1
            }
        };
        &mut doc.nodes_mut()[idx]
    }

    fn append_child(&mut self, name: &str) -> &mut KdlNode {
        let nodes = self.ensure_children().nodes_mut();
        nodes.push(KdlNode::new(name));
        let last = nodes.len() - 1;
        &mut nodes[last]
    }
}

pub fn arg_entry_index(node: &KdlNode, index: usize) -> Option<usize> {
    node.entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.name().is_none())
        .nth(index)
        .map(|(idx, _)| idx)
}

pub fn update_entry_value(entry: &mut KdlEntry, value: KdlValue) {
    entry.set_value(value.clone());
    if let Some(fmt) = entry.format_mut() {
        fmt.value_repr = value.to_string();
    }
}
