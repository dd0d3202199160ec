//! Support for JSON documents as expression contexts.
//!
//! [`serde_json::Value`] implements [`ContextValue`] and [`Context`],
//! and [`serde_json::Map`] can be used as the root of a context.

use crate::context::{impl_context_for_value, sequence_index};
use crate::{Context, ContextValue, Segment, Span, ValueKind};

/// Parse a JSON document to use as a context.
///
/// The root of the document must be an object.
///
/// # Example
/// ```rust
/// # use resolvable::{json, resolves};
/// let context = json::from_str(r#"{"user": {"name": "X"}}"#).unwrap();
/// assert!(resolves("user.name", &context));
/// assert!(json::from_str("[1, 2]").is_err());
/// ```
pub fn from_str(data: &str) -> Result<serde_json::Value, Error> {
	check_root(serde_json::from_str(data)?)
}

/// Parse a JSON document to use as a context.
///
/// The root of the document must be an object.
pub fn from_slice(data: &[u8]) -> Result<serde_json::Value, Error> {
	check_root(serde_json::from_slice(data)?)
}

/// Parse a JSON document and scan the spans of a text snapshot against it.
///
/// See [`scan()`][crate::scan] for the classification rules.
pub fn scan_str(text: &str, spans: &[Span], data: &str) -> Result<Vec<Segment>, Error> {
	let context = from_str(data)?;
	Ok(crate::scan(text, spans, &context))
}

fn check_root(value: serde_json::Value) -> Result<serde_json::Value, Error> {
	match value.kind() {
		ValueKind::Mapping => Ok(value),
		kind => Err(Error::RootNotObject(kind)),
	}
}

/// Error for parsing JSON context data.
#[derive(Debug)]
pub enum Error {
	/// An error occurred while parsing JSON.
	Json(serde_json::Error),

	/// The root of the document is not an object.
	RootNotObject(ValueKind),
}

impl From<serde_json::Error> for Error {
	#[inline]
	fn from(other: serde_json::Error) -> Self {
		Self::Json(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json(e) => std::fmt::Display::fmt(e, f),
			Self::RootNotObject(kind) => write!(f, "Context root must be an object, got {}", kind.type_name()),
		}
	}
}

impl ContextValue for serde_json::Value {
	fn kind(&self) -> ValueKind {
		match self {
			Self::Null => ValueKind::Null,
			Self::Bool(_) => ValueKind::Bool,
			Self::Number(_) => ValueKind::Number,
			Self::String(_) => ValueKind::String,
			Self::Array(_) => ValueKind::Sequence,
			Self::Object(_) => ValueKind::Mapping,
		}
	}

	fn child(&self, key: &str) -> Option<&Self> {
		match self {
			Self::Object(map) => map.get(key),
			Self::Array(seq) => seq.get(sequence_index(key)?),
			_ => None,
		}
	}

	fn entries(&self) -> Vec<(String, &Self)> {
		match self {
			Self::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
			Self::Array(seq) => seq.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
			_ => Vec::new(),
		}
	}

	fn len(&self) -> usize {
		match self {
			Self::Object(map) => map.len(),
			Self::Array(seq) => seq.len(),
			_ => 0,
		}
	}

	fn preview(&self) -> String {
		match self {
			Self::Null => "null".into(),
			Self::Bool(x) => x.to_string(),
			Self::Number(x) => x.to_string(),
			Self::String(x) => x.clone(),
			Self::Array(_) | Self::Object(_) => self.kind().type_name().into(),
		}
	}
}

impl_context_for_value!(serde_json::Value);

impl Context for serde_json::Map<String, serde_json::Value> {
	type Value = serde_json::Value;

	#[inline]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		serde_json::Map::get(self, key)
	}

	fn keys(&self) -> Vec<String> {
		serde_json::Map::keys(self).cloned().collect()
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use assert2::{assert, check, let_assert};
	use serde_json::json;

	use super::*;
	use crate::{complete, resolves, CompletionOptions, ResolvableState};

	#[test]
	fn resolve_in_json() {
		let context = json!({
			"$json": { "name": "Alice", "items": [{ "id": 1 }], "manager": null },
			"count": 0,
		});
		check!(resolves("$json.name", &context));
		check!(resolves("$json.items.0.id", &context));
		check!(resolves("$json.manager", &context));
		check!(resolves("count", &context));
		check!(!resolves("$json.manager.name", &context));
		check!(!resolves("$json.items.1", &context));
		check!(!resolves("$json.name.length", &context));
	}

	#[test]
	fn json_map_as_root() {
		let_assert!(serde_json::Value::Object(map) = json!({ "user": { "name": "X" } }));
		check!(resolves("user.name", &map));
		check!(!resolves("user.age", &map));
		check!(Context::keys(&map) == ["user"]);
	}

	#[test]
	fn test_from_str() {
		let_assert!(Ok(context) = from_str(r#"{ "user": { "name": "X" } }"#));
		check!(resolves("user.name", &context));

		let_assert!(Ok(context) = from_slice(b"{}"));
		check!(!resolves("user", &context));
	}

	#[test]
	fn root_must_be_an_object() {
		let_assert!(Err(Error::RootNotObject(ValueKind::Sequence)) = from_str("[1, 2]"));
		let_assert!(Err(e) = from_str("null"));
		assert!(e.to_string() == "Context root must be an object, got null");
		let_assert!(Err(Error::Json(_)) = from_str("{ nope"));
	}

	#[test]
	fn test_scan_str() {
		let text = "Hello {{ user.name }} and {{ user.age }}";
		let spans = crate::find_resolvables(text);
		let_assert!(Ok(segments) = scan_str(text, &spans, r#"{ "user": { "name": "X" } }"#));
		let states: Vec<_> = segments.iter().map(|s| s.state).collect();
		assert!(states == [ResolvableState::Valid, ResolvableState::Unresolved]);
	}

	#[test]
	fn previews() {
		check!(json!(null).preview() == "null");
		check!(json!(12).preview() == "12");
		check!(json!(0.25).preview() == "0.25");
		check!(json!("text").preview() == "text");
		check!(json!([1]).preview() == "array");
		check!(json!({}).preview() == "object");
	}

	#[test]
	fn complete_json() {
		let context = json!({ "$json": { "user": { "name": "X", "age": 3 } } });
		let_assert!(Some(completions) = complete("{{ $json.user.n", &context, &CompletionOptions::default()));
		check!(completions.from == 14);
		let_assert!([option] = completions.options.as_slice());
		check!(option.label == "name");
		check!(option.info == "string: X");
	}
}
