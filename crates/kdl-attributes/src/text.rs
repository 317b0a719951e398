//! Canonical text rendering and parsing for the primitive attribute kinds.

use kdl::KdlValue;

use crate::config::{BoolLiterals, TreeConfig, ValueStyle};
use crate::value::AttrType;

/// Primitive kinds that map onto a node's text.
pub trait AttrText: AttrType {
    /// Locale-independent text form, as stored in a node.
    fn render(&self) -> String;

    fn parse_text(text: &str, config: &TreeConfig) -> Option<Self>;

    fn to_kdl(&self, style: ValueStyle) -> KdlValue {
        let _ = style;
        KdlValue::String(self.render())
    }
}

impl AttrText for String {
    fn render(&self) -> String {
        self.clone()
    }

    fn parse_text(text: &str, _config: &TreeConfig) -> Option<Self> {
        Some(text.to_string())
    }
}

impl AttrText for bool {
    fn render(&self) -> String {
        let word = if *self { "true" } else { "false" };
        word.to_string()
    }

    fn parse_text(text: &str, config: &TreeConfig) -> Option<Self> {
        match text.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ if config.bool_literals == BoolLiterals::Strict => None,
            "True" | "TRUE" => Some(true),
            "False" | "FALSE" => Some(false),
            other => parse_integer::<i64>(other).map(|n| n != 0),
        }
    }

    fn to_kdl(&self, style: ValueStyle) -> KdlValue {
        match style {
            ValueStyle::Text => KdlValue::String(self.render()),
            ValueStyle::Native => KdlValue::Bool(*self),
        }
    }
}

trait FromRadix: Sized + std::str::FromStr {
    fn from_hex(digits: &str) -> Option<Self>;
}

fn parse_integer<T: FromRadix>(text: &str) -> Option<T> {
    let text = text.trim();
    match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(digits) => T::from_hex(digits),
        None => text.parse().ok(),
    }
}

macro_rules! impl_integer_text {
    ($ty:ty) => {
        impl FromRadix for $ty {
            fn from_hex(digits: &str) -> Option<Self> {
                <$ty>::from_str_radix(digits, 16).ok()
            }
        }

        impl AttrText for $ty {
            fn render(&self) -> String {
                self.to_string()
            }

            fn parse_text(text: &str, _config: &TreeConfig) -> Option<Self> {
                parse_integer(text)
            }

            fn to_kdl(&self, style: ValueStyle) -> KdlValue {
                match style {
                    ValueStyle::Text => KdlValue::String(self.render()),
                    ValueStyle::Native => KdlValue::Integer(i128::from(*self)),
                }
            }
        }
    };
}

impl_integer_text!(i32);
impl_integer_text!(u32);
impl_integer_text!(i64);
impl_integer_text!(u64);

fn render_float(rendered: String, finite: bool) -> String {
    if !finite || rendered.contains('.') || rendered.contains('e') || rendered.contains('E') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

impl AttrText for f64 {
    fn render(&self) -> String {
        render_float(self.to_string(), self.is_finite())
    }

    fn parse_text(text: &str, _config: &TreeConfig) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_kdl(&self, style: ValueStyle) -> KdlValue {
        match style {
            ValueStyle::Text => KdlValue::String(self.render()),
            ValueStyle::Native => KdlValue::Float(*self),
        }
    }
}

impl AttrText for f32 {
    fn render(&self) -> String {
        render_float(self.to_string(), self.is_finite())
    }

    fn parse_text(text: &str, _config: &TreeConfig) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_kdl(&self, style: ValueStyle) -> KdlValue {
        match style {
            ValueStyle::Text => KdlValue::String(self.render()),
            ValueStyle::Native => KdlValue::Float(f64::from(*self)),
        }
    }
}
