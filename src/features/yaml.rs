//! Support for YAML documents as expression contexts.
//!
//! [`serde_yaml::Value`] implements [`ContextValue`] and [`Context`].
//! Tagged values behave like the value they wrap.
//! Mapping keys that are numbers or booleans are matched by their string form,
//! other non-string keys are not reachable from a path.

use crate::context::{impl_context_for_value, sequence_index};
use crate::{ContextValue, Segment, Span, ValueKind};

/// Parse a YAML document to use as a context.
///
/// The root of the document must be a mapping.
///
/// # Example
/// ```rust
/// # use resolvable::{yaml, resolves};
/// let context = yaml::from_str("user:\n  name: X\n").unwrap();
/// assert!(resolves("user.name", &context));
/// ```
pub fn from_str(data: &str) -> Result<serde_yaml::Value, Error> {
	check_root(serde_yaml::from_str(data)?)
}

/// Parse a YAML document to use as a context.
///
/// The root of the document must be a mapping.
pub fn from_slice(data: &[u8]) -> Result<serde_yaml::Value, Error> {
	check_root(serde_yaml::from_slice(data)?)
}

/// Parse a YAML document and scan the spans of a text snapshot against it.
///
/// See [`scan()`][crate::scan] for the classification rules.
pub fn scan_str(text: &str, spans: &[Span], data: &str) -> Result<Vec<Segment>, Error> {
	let context = from_str(data)?;
	Ok(crate::scan(text, spans, &context))
}

fn check_root(value: serde_yaml::Value) -> Result<serde_yaml::Value, Error> {
	match value.kind() {
		ValueKind::Mapping => Ok(value),
		kind => Err(Error::RootNotMapping(kind)),
	}
}

/// Error for parsing YAML context data.
#[derive(Debug)]
pub enum Error {
	/// An error occured while parsing YAML.
	Yaml(serde_yaml::Error),

	/// The root of the document is not a mapping.
	RootNotMapping(ValueKind),
}

impl From<serde_yaml::Error> for Error {
	#[inline]
	fn from(other: serde_yaml::Error) -> Self {
		Self::Yaml(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::Yaml(e) => std::fmt::Display::fmt(e, f),
			Error::RootNotMapping(kind) => write!(f, "Context root must be a mapping, got {}", kind.type_name()),
		}
	}
}

/// Get the path key for a mapping key, if it can be named in a path.
fn key_string(key: &serde_yaml::Value) -> Option<String> {
	match key {
		serde_yaml::Value::String(x) => Some(x.clone()),
		serde_yaml::Value::Number(x) => Some(x.to_string()),
		serde_yaml::Value::Bool(x) => Some(x.to_string()),
		serde_yaml::Value::Tagged(x) => key_string(&x.value),
		_ => None,
	}
}

impl ContextValue for serde_yaml::Value {
	fn kind(&self) -> ValueKind {
		match self {
			Self::Null => ValueKind::Null,
			Self::Bool(_) => ValueKind::Bool,
			Self::Number(_) => ValueKind::Number,
			Self::String(_) => ValueKind::String,
			Self::Sequence(_) => ValueKind::Sequence,
			Self::Mapping(_) => ValueKind::Mapping,
			Self::Tagged(tagged) => tagged.value.kind(),
		}
	}

	fn child(&self, key: &str) -> Option<&Self> {
		match self {
			Self::Mapping(map) => map
				.iter()
				.find(|(k, _)| key_string(k).as_deref() == Some(key))
				.map(|(_, v)| v),
			Self::Sequence(seq) => seq.get(sequence_index(key)?),
			Self::Tagged(tagged) => tagged.value.child(key),
			_ => None,
		}
	}

	fn entries(&self) -> Vec<(String, &Self)> {
		match self {
			Self::Mapping(map) => map.iter().filter_map(|(k, v)| Some((key_string(k)?, v))).collect(),
			Self::Sequence(seq) => seq.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
			Self::Tagged(tagged) => tagged.value.entries(),
			_ => Vec::new(),
		}
	}

	fn preview(&self) -> String {
		match self {
			Self::Null => "null".into(),
			Self::Bool(x) => x.to_string(),
			Self::Number(x) => x.to_string(),
			Self::String(x) => x.clone(),
			Self::Sequence(_) | Self::Mapping(_) => self.kind().type_name().into(),
			Self::Tagged(tagged) => tagged.value.preview(),
		}
	}
}

impl_context_for_value!(serde_yaml::Value);
