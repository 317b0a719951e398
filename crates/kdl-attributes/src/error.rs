use std::fmt;

use crate::value::AttrKind;

#[derive(Debug, Clone, PartialEq)]
pub struct AttrError {
    pub key: Option<String>,
    pub node: Option<String>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    NotFound,
    TypeMismatch {
        expected: AttrKind,
        actual: AttrKind,
    },
    MissingElement {
        parent: String,
    },
    ParseFailure {
        text: Option<String>,
        target: AttrKind,
    },
    NullTarget,
    Unsupported {
        kind: AttrKind,
    },
    Mandatory {
        source: Box<AttrError>,
    },
    Custom(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "attribute not found"),
            ErrorKind::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {expected}, found {actual}")
            }
            ErrorKind::MissingElement { parent } => {
                write!(f, "child node not found under '{parent}'")
            }
            ErrorKind::ParseFailure {
                text: Some(text),
                target,
            } => write!(f, "cannot read '{text}' as {target}"),
            ErrorKind::ParseFailure { text: None, target } => {
                write!(f, "node has no text to read as {target}")
            }
            ErrorKind::NullTarget => write!(f, "parent node is absent"),
            ErrorKind::Unsupported { kind } => {
                write!(f, "{kind} attributes need a hand-written serializer")
            }
            ErrorKind::Mandatory { source } => {
                write!(f, "mandatory attribute could not be populated: {}", source.kind)
            }
            ErrorKind::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for AttrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            Some(ref key) => write!(f, "attribute '{key}'")?,
            None => write!(f, "attribute")?,
        }

        if let Some(ref node) = self.node {
            if self.key.as_deref() != Some(node.as_str()) {
                write!(f, " (node '{node}')")?;
            }
        }

        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for AttrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Mandatory { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl AttrError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            node: None,
            kind: ErrorKind::NotFound,
        }
    }

    pub fn type_mismatch(key: impl Into<String>, expected: AttrKind, actual: AttrKind) -> Self {
        Self {
            key: Some(key.into()),
            node: None,
            kind: ErrorKind::TypeMismatch { expected, actual },
        }
    }

    pub fn missing_element(name: impl Into<String>, parent: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: Some(name.clone()),
            node: Some(name),
            kind: ErrorKind::MissingElement {
                parent: parent.into(),
            },
        }
    }

    pub fn parse_failure(name: impl Into<String>, text: Option<String>, target: AttrKind) -> Self {
        let name = name.into();
        Self {
            key: Some(name.clone()),
            node: Some(name),
            kind: ErrorKind::ParseFailure { text, target },
        }
    }

    pub fn null_target(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: Some(name.clone()),
            node: Some(name),
            kind: ErrorKind::NullTarget,
        }
    }

    pub fn unsupported(key: impl Into<String>, kind: AttrKind) -> Self {
        Self {
            key: Some(key.into()),
            node: None,
            kind: ErrorKind::Unsupported { kind },
        }
    }

    /// Escalate `source` as a failure of a required attribute.
    pub fn mandatory(key: impl Into<String>, source: AttrError) -> Self {
        Self {
            key: Some(key.into()),
            node: source.node.clone(),
            kind: ErrorKind::Mandatory {
                source: Box::new(source),
            },
        }
    }

    pub fn custom(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            node: None,
            kind: ErrorKind::Custom(message.into()),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn is_mandatory(&self) -> bool {
        matches!(self.kind, ErrorKind::Mandatory { .. })
    }
}
