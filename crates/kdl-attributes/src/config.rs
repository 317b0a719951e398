/// How primitive values are written into a node's argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    /// Every value becomes a KDL string: `age "25"`.
    Text,
    /// Numbers and booleans become native KDL scalars: `age 25`.
    Native,
}

/// Which spellings are accepted when reading a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolLiterals {
    /// Only `true` and `false`.
    Strict,
    /// Also `True`/`TRUE`, `False`/`FALSE` and integers (non-zero is true).
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    pub value_style: ValueStyle,
    pub bool_literals: BoolLiterals,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            value_style: ValueStyle::Text,
            bool_literals: BoolLiterals::Lenient,
        }
    }
}

impl TreeConfig {
    pub fn native() -> Self {
        Self {
            value_style: ValueStyle::Native,
            ..Self::default()
        }
    }

    pub fn with_bool_literals(mut self, bool_literals: BoolLiterals) -> Self {
        self.bool_literals = bool_literals;
        self
    }
}
