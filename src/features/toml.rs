//! Support for TOML documents as expression contexts.
//!
//! [`toml::Value`] implements [`ContextValue`] and [`Context`],
//! and [`toml::Table`] can be used as the root of a context.
//! Dates and times are treated as strings.

use crate::context::{impl_context_for_value, sequence_index};
use crate::{Context, ContextValue, Segment, Span, ValueKind};

/// Parse a TOML document to use as a context.
///
/// # Example
/// ```rust
/// # use resolvable::{toml, resolves};
/// let context = toml::from_str("[user]\nname = \"X\"\n").unwrap();
/// assert!(resolves("user.name", &context));
/// ```
pub fn from_str(data: &str) -> Result<toml::Table, Error> {
	Ok(toml::from_str(data)?)
}

/// Parse a TOML document to use as a context.
pub fn from_slice(data: &[u8]) -> Result<toml::Table, Error> {
	from_str(std::str::from_utf8(data)?)
}

/// Parse a TOML document and scan the spans of a text snapshot against it.
///
/// See [`scan()`][crate::scan] for the classification rules.
pub fn scan_str(text: &str, spans: &[Span], data: &str) -> Result<Vec<Segment>, Error> {
	let context = from_str(data)?;
	Ok(crate::scan(text, spans, &context))
}

/// Error for parsing TOML context data.
#[derive(Debug)]
pub enum Error {
	/// The input contains invalid UTF-8.
	InvalidUtf8(std::str::Utf8Error),

	/// An error occurred while parsing TOML.
	Toml(toml::de::Error),
}

impl From<std::str::Utf8Error> for Error {
	#[inline]
	fn from(other: std::str::Utf8Error) -> Self {
		Self::InvalidUtf8(other)
	}
}

impl From<toml::de::Error> for Error {
	#[inline]
	fn from(other: toml::de::Error) -> Self {
		Self::Toml(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidUtf8(e) => std::fmt::Display::fmt(e, f),
			Self::Toml(e) => std::fmt::Display::fmt(e, f),
		}
	}
}

impl ContextValue for toml::Value {
	fn kind(&self) -> ValueKind {
		match self {
			Self::Boolean(_) => ValueKind::Bool,
			Self::Integer(_) | Self::Float(_) => ValueKind::Number,
			Self::String(_) | Self::Datetime(_) => ValueKind::String,
			Self::Array(_) => ValueKind::Sequence,
			Self::Table(_) => ValueKind::Mapping,
		}
	}

	fn child(&self, key: &str) -> Option<&Self> {
		match self {
			Self::Table(map) => map.get(key),
			Self::Array(seq) => seq.get(sequence_index(key)?),
			_ => None,
		}
	}

	fn entries(&self) -> Vec<(String, &Self)> {
		match self {
			Self::Table(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
			Self::Array(seq) => seq.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
			_ => Vec::new(),
		}
	}

	fn len(&self) -> usize {
		match self {
			Self::Table(map) => map.len(),
			Self::Array(seq) => seq.len(),
			_ => 0,
		}
	}

	fn preview(&self) -> String {
		match self {
			Self::Boolean(x) => x.to_string(),
			Self::Integer(x) => x.to_string(),
			Self::Float(x) => x.to_string(),
			Self::String(x) => x.clone(),
			Self::Datetime(x) => x.to_string(),
			Self::Array(_) | Self::Table(_) => self.kind().type_name().into(),
		}
	}
}

impl_context_for_value!(toml::Value);

impl Context for toml::Table {
	type Value = toml::Value;

	#[inline]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		toml::Table::get(self, key)
	}

	fn keys(&self) -> Vec<String> {
		toml::Table::keys(self).cloned().collect()
	}
}
