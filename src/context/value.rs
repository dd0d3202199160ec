use std::collections::BTreeMap;

use super::{sequence_index, ContextValue, ValueKind};

/// The mapping type used by [`Value::Mapping`].
pub type Mapping = BTreeMap<String, Value>;

/// A tagged value for building contexts without a serialization format.
///
/// With the `serde` feature, `Value` can be deserialized from any self-describing format.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// An explicit null.
	#[default]
	Null,

	/// A boolean.
	Bool(bool),

	/// A signed integer.
	Integer(i64),

	/// A floating point number.
	Float(f64),

	/// A string.
	String(String),

	/// An ordered list of values.
	Sequence(Vec<Value>),

	/// A mapping from string keys to values.
	Mapping(Mapping),
}

impl Value {
	/// Create a mapping value from key-value pairs.
	///
	/// # Example
	/// ```rust
	/// # use resolvable::{resolves, Value};
	/// let user = Value::mapping([("name", "X")]);
	/// let context = Value::mapping([("user", user)]);
	/// assert!(resolves("user.name", &context));
	/// ```
	pub fn mapping<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}

	/// Get the value as a string slice, if it is a string.
	#[inline]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(x) => Some(x),
			_ => None,
		}
	}

	/// Get the value as a mapping, if it is a mapping.
	#[inline]
	pub fn as_mapping(&self) -> Option<&Mapping> {
		match self {
			Self::Mapping(x) => Some(x),
			_ => None,
		}
	}

	/// Check if the value is null.
	#[inline]
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}

impl ContextValue for Value {
	fn kind(&self) -> ValueKind {
		match self {
			Self::Null => ValueKind::Null,
			Self::Bool(_) => ValueKind::Bool,
			Self::Integer(_) | Self::Float(_) => ValueKind::Number,
			Self::String(_) => ValueKind::String,
			Self::Sequence(_) => ValueKind::Sequence,
			Self::Mapping(_) => ValueKind::Mapping,
		}
	}

	fn child(&self, key: &str) -> Option<&Self> {
		match self {
			Self::Mapping(map) => map.get(key),
			Self::Sequence(seq) => seq.get(sequence_index(key)?),
			_ => None,
		}
	}

	fn entries(&self) -> Vec<(String, &Self)> {
		match self {
			Self::Mapping(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
			Self::Sequence(seq) => seq.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
			_ => Vec::new(),
		}
	}

	fn len(&self) -> usize {
		match self {
			Self::Mapping(map) => map.len(),
			Self::Sequence(seq) => seq.len(),
			_ => 0,
		}
	}

	fn preview(&self) -> String {
		match self {
			Self::Null => "null".into(),
			Self::Bool(x) => x.to_string(),
			Self::Integer(x) => x.to_string(),
			Self::Float(x) => x.to_string(),
			Self::String(x) => x.clone(),
			Self::Sequence(_) | Self::Mapping(_) => self.kind().type_name().into(),
		}
	}
}

super::impl_context_for_value!(Value);

impl From<bool> for Value {
	#[inline]
	fn from(other: bool) -> Self {
		Self::Bool(other)
	}
}

impl From<i32> for Value {
	#[inline]
	fn from(other: i32) -> Self {
		Self::Integer(other.into())
	}
}

impl From<i64> for Value {
	#[inline]
	fn from(other: i64) -> Self {
		Self::Integer(other)
	}
}

impl From<u32> for Value {
	#[inline]
	fn from(other: u32) -> Self {
		Self::Integer(other.into())
	}
}

impl From<f64> for Value {
	#[inline]
	fn from(other: f64) -> Self {
		Self::Float(other)
	}
}

impl From<&str> for Value {
	#[inline]
	fn from(other: &str) -> Self {
		Self::String(other.to_owned())
	}
}

impl From<String> for Value {
	#[inline]
	fn from(other: String) -> Self {
		Self::String(other)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	#[inline]
	fn from(other: Vec<T>) -> Self {
		Self::Sequence(other.into_iter().map(Into::into).collect())
	}
}

impl From<Mapping> for Value {
	#[inline]
	fn from(other: Mapping) -> Self {
		Self::Mapping(other)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::mapping(iter)
	}
}
