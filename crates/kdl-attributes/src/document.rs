//! Whole-document glue: parse, render, and load/save objects from files.

use std::path::Path;

use kdl::{KdlDocument, KdlNode};

use crate::config::TreeConfig;
use crate::error::AttrError;
use crate::Serializable;

/// Errors that can occur while loading or saving a document.
#[derive(Debug)]
pub enum DocumentError {
    Io(std::io::Error),
    Parse(kdl::KdlError),
    MissingRoot { name: String },
    Attribute(AttrError),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::Io(err) => write!(f, "io error: {err}"),
            DocumentError::Parse(err) => write!(f, "parse error: {err}"),
            DocumentError::MissingRoot { name } => write!(f, "root node '{name}' not found"),
            DocumentError::Attribute(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Io(err) => Some(err),
            DocumentError::Parse(err) => Some(err),
            DocumentError::Attribute(err) => Some(err),
            DocumentError::MissingRoot { .. } => None,
        }
    }
}

impl From<std::io::Error> for DocumentError {
    fn from(err: std::io::Error) -> Self {
        DocumentError::Io(err)
    }
}

impl From<kdl::KdlError> for DocumentError {
    fn from(err: kdl::KdlError) -> Self {
        DocumentError::Parse(err)
    }
}

impl From<AttrError> for DocumentError {
    fn from(err: AttrError) -> Self {
        DocumentError::Attribute(err)
    }
}

pub fn parse_document(contents: &str) -> Result<KdlDocument, DocumentError> {
    Ok(contents.parse()?)
}

/// Render with canonical indentation.
pub fn render_document(doc: &KdlDocument) -> String {
    let mut doc = doc.clone();
    doc.autoformat();
    doc.to_string()
}

pub fn load_document(path: &Path) -> Result<KdlDocument, DocumentError> {
    let contents = std::fs::read_to_string(path)?;
    parse_document(&contents)
}

pub fn save_document(path: &Path, doc: &KdlDocument) -> Result<(), DocumentError> {
    std::fs::write(path, render_document(doc))?;
    Ok(())
}

/// Serialize `value` as the single root node `root_name` of a new document.
///
/// The flag is false when some attribute could not be written.
pub fn to_document<T: Serializable + ?Sized>(
    value: &T,
    root_name: &str,
    config: &TreeConfig,
) -> Result<(KdlDocument, bool), AttrError> {
    let mut root = KdlNode::new(root_name);
    let complete = value.serialize(&mut root, config)?;
    let mut doc = KdlDocument::new();
    doc.nodes_mut().push(root);
    Ok((doc, complete))
}

/// Populate `value` from the top-level node `root_name` of `doc`.
pub fn from_document<T: Serializable + ?Sized>(
    doc: &KdlDocument,
    root_name: &str,
    value: &mut T,
    config: &TreeConfig,
) -> Result<bool, DocumentError> {
    let root = doc.get(root_name).ok_or_else(|| DocumentError::MissingRoot {
        name: root_name.to_string(),
    })?;
    Ok(value.deserialize(root, config)?)
}

pub fn to_kdl_string<T: Serializable + ?Sized>(
    value: &T,
    root_name: &str,
    config: &TreeConfig,
) -> Result<String, AttrError> {
    let (doc, complete) = to_document(value, root_name, config)?;
    if !complete {
        tracing::debug!(root = root_name, "rendering a partially serialized object");
    }
    Ok(render_document(&doc))
}

pub fn parse_str<T: Serializable + ?Sized>(
    contents: &str,
    root_name: &str,
    value: &mut T,
    config: &TreeConfig,
) -> Result<bool, DocumentError> {
    let doc = parse_document(contents)?;
    from_document(&doc, root_name, value, config)
}

/// Serialize `value` and write it to `path`.
///
/// The file is written even when some attributes failed; the returned flag
/// reports whether every attribute made it.
pub fn save_object<T: Serializable + ?Sized>(
    path: &Path,
    root_name: &str,
    value: &T,
    config: &TreeConfig,
) -> Result<bool, DocumentError> {
    let (doc, complete) = to_document(value, root_name, config)?;
    save_document(path, &doc)?;
    tracing::debug!(path = %path.display(), complete, "saved document");
    Ok(complete)
}

pub fn load_object<T: Serializable + ?Sized>(
    path: &Path,
    root_name: &str,
    value: &mut T,
    config: &TreeConfig,
) -> Result<bool, DocumentError> {
    let doc = load_document(path)?;
    let complete = from_document(&doc, root_name, value, config)?;
    tracing::debug!(path = %path.display(), complete, "loaded document");
    Ok(complete)
}
