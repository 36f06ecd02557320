use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::value::{Complex, Number};

/// Numeric subkinds a `TypeDescriptor::Number` can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberKind {
    Integer,
    Unsigned,
    Float,
    /// Parsed from and formatted to text rather than a fixed-width machine type.
    Complex,
}

impl NumberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberKind::Integer => "integer",
            NumberKind::Unsigned => "unsigned",
            NumberKind::Float => "float",
            NumberKind::Complex => "complex",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes the semantic type of a value at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    String,
    Number(NumberKind),
    Boolean,
    /// A type the built-in descriptors know nothing about, named by its owner.
    Custom(String),
}

impl TypeDescriptor {
    pub fn is_string(&self) -> bool {
        matches!(self, TypeDescriptor::String)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, TypeDescriptor::Number(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, TypeDescriptor::Boolean)
    }

    /// The numeric subkind, or `None` for non-numeric descriptors.
    pub fn number_kind(&self) -> Option<NumberKind> {
        match self {
            TypeDescriptor::Number(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Parse `text` as a number of the given kind.
    ///
    /// Only string descriptors carry this primitive; any other descriptor
    /// reports the pair as unsupported.
    pub fn to_number(&self, text: &str, kind: NumberKind) -> Result<Number, ConversionError> {
        let target = TypeDescriptor::Number(kind);
        if !self.is_string() {
            return Err(ConversionError::Unsupported { from: self.clone(), to: target });
        }

        let trimmed = text.trim();
        let parsed = match kind {
            NumberKind::Integer => trimmed
                .parse::<i64>()
                .map(Number::Integer)
                .map_err(|e| e.to_string()),
            NumberKind::Unsigned => trimmed
                .parse::<u64>()
                .map(Number::Unsigned)
                .map_err(|e| e.to_string()),
            NumberKind::Float => parse_real(trimmed)
                .map(Number::Float)
                .ok_or_else(|| "invalid or out-of-range float".to_string()),
            NumberKind::Complex => parse_complex(trimmed)
                .map(Number::Complex)
                .ok_or_else(|| "invalid complex number syntax".to_string()),
        };

        parsed.map_err(|reason| ConversionError::MalformedInput {
            value: text.to_string(),
            target,
            reason,
        })
    }

    /// Format a number as text. Only string descriptors carry this primitive.
    pub fn format_number(&self, number: &Number) -> Result<String, ConversionError> {
        if !self.is_string() {
            return Err(ConversionError::Unsupported {
                from: TypeDescriptor::Number(number.kind()),
                to: self.clone(),
            });
        }
        Ok(number.to_string())
    }

    /// Parse a boolean literal. Only boolean descriptors carry this primitive.
    ///
    /// Accepts `true`/`false`, `t`/`f`, `1`/`0`, `yes`/`no` and `on`/`off`,
    /// ignoring case and surrounding whitespace.
    pub fn to_boolean(&self, text: &str) -> Result<bool, ConversionError> {
        if !self.is_boolean() {
            return Err(ConversionError::Unsupported {
                from: TypeDescriptor::String,
                to: self.clone(),
            });
        }

        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "on" => Ok(true),
            "false" | "f" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConversionError::MalformedInput {
                value: text.to_string(),
                target: TypeDescriptor::Boolean,
                reason: "unrecognized boolean literal".to_string(),
            }),
        }
    }

    /// Format a boolean as text. Only string descriptors carry this primitive.
    pub fn format_boolean(&self, value: bool) -> Result<String, ConversionError> {
        if !self.is_string() {
            return Err(ConversionError::Unsupported {
                from: TypeDescriptor::Boolean,
                to: self.clone(),
            });
        }
        Ok(if value { "true" } else { "false" }.to_string())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::String => f.write_str("string"),
            TypeDescriptor::Number(kind) => write!(f, "number<{}>", kind),
            TypeDescriptor::Boolean => f.write_str("boolean"),
            TypeDescriptor::Custom(name) => f.write_str(name),
        }
    }
}

// Accepts "42", "-1.5", "2i", "-i", "3+4i", "1e3-2.5i", optionally wrapped in parentheses.
fn parse_complex(text: &str) -> Option<Complex> {
    let text = text
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(text);
    if text.is_empty() {
        return None;
    }

    let Some(body) = text.strip_suffix('i') else {
        return parse_real(text).map(|re| Complex::new(re, 0.0));
    };

    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

    match split {
        Some(i) => {
            let re = parse_real(&body[..i])?;
            let im = parse_imaginary(&body[i..])?;
            Some(Complex::new(re, im))
        }
        None => parse_imaginary(body).map(|im| Complex::new(0.0, im)),
    }
}

fn parse_real(text: &str) -> Option<f64> {
    if text.is_empty() || text.contains(char::is_whitespace) {
        return None;
    }
    let value = text.parse::<f64>().ok()?;
    // Out-of-range literals such as "1e400" parse to infinity; only explicit
    // inf/nan spellings may produce a non-finite value.
    if value.is_finite() || is_non_finite_literal(text) {
        Some(value)
    } else {
        None
    }
}

fn is_non_finite_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|literal| unsigned.eq_ignore_ascii_case(literal))
}

fn parse_imaginary(text: &str) -> Option<f64> {
    match text {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        _ => parse_real(text),
    }
}
