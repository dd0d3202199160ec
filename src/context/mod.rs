//! Data contexts and dotted path resolution.
//!
//! A context is the nested data that expressions are validated against.
//! The root of a context implements [`Context`], every nested node implements [`ContextValue`].
//!
//! The crate provides its own tagged [`Value`] model,
//! and implements the traits for standard maps and key-value lists with [`ContextValue`] values.
//! With the `json`, `yaml` and `toml` features, the value types of those formats can be used directly.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Implement [`Context`] for a [`ContextValue`] type by treating the value as the root node.
macro_rules! impl_context_for_value {
	($ty:ty) => {
		impl $crate::Context for $ty {
			type Value = $ty;

			#[inline]
			fn get(&self, key: &str) -> Option<&Self::Value> {
				$crate::ContextValue::child(self, key)
			}

			fn keys(&self) -> Vec<String> {
				$crate::ContextValue::entries(self)
					.into_iter()
					.map(|(key, _)| key)
					.collect()
			}
		}
	};
}

pub(crate) use impl_context_for_value;

mod value;
pub use value::*;

/// The shape of a node in a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	/// A mapping from string keys to values.
	Mapping,

	/// An ordered list of values.
	Sequence,

	/// A string, or a string-like value such as a date.
	String,

	/// An integer or floating point number.
	Number,

	/// A boolean.
	Bool,

	/// An explicit null.
	Null,
}

impl ValueKind {
	/// The type name as shown in completion info.
	pub const fn type_name(self) -> &'static str {
		match self {
			Self::Mapping => "object",
			Self::Sequence => "array",
			Self::String => "string",
			Self::Number => "number",
			Self::Bool => "boolean",
			Self::Null => "null",
		}
	}

	/// Check if values of this kind have children.
	pub const fn is_container(self) -> bool {
		matches!(self, Self::Mapping | Self::Sequence)
	}
}

/// A node in a nested data context.
pub trait ContextValue {
	/// Get the shape of the node.
	fn kind(&self) -> ValueKind;

	/// Get a direct child of the node.
	///
	/// Mappings return the value for the key.
	/// Sequences return the element if `key` is a canonical decimal index (see [`sequence_index()`]).
	/// Every other node returns `None`.
	fn child(&self, key: &str) -> Option<&Self>;

	/// Get all direct children of the node with their keys, in iteration order.
	///
	/// Sequences use their indices as keys.
	/// Nodes without children return an empty list.
	fn entries(&self) -> Vec<(String, &Self)>;

	/// Get the number of direct children.
	fn len(&self) -> usize {
		self.entries().len()
	}

	/// Check if the node has no children.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// A short human readable rendering of the node.
	///
	/// Strings are rendered without quotes.
	/// Containers render as their type name.
	fn preview(&self) -> String;
}

/// Trait for types that can be used as the root of a data context.
pub trait Context {
	/// The type of the nodes in the context.
	type Value: ContextValue;

	/// Get a value at the root of the context.
	fn get(&self, key: &str) -> Option<&Self::Value>;

	/// Get all keys at the root of the context, in iteration order.
	fn keys(&self) -> Vec<String>;
}

/// Parse a sequence index from a path segment.
///
/// Only canonical decimal indices are accepted: no sign, no leading zeros, no whitespace.
///
/// # Example
/// ```rust
/// # use resolvable::context::sequence_index;
/// assert_eq!(sequence_index("0"), Some(0));
/// assert_eq!(sequence_index("12"), Some(12));
/// assert_eq!(sequence_index("012"), None);
/// assert_eq!(sequence_index("[0]"), None);
/// ```
pub fn sequence_index(key: &str) -> Option<usize> {
	let bytes = key.as_bytes();
	if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
		return None;
	}
	if bytes.len() > 1 && bytes[0] == b'0' {
		return None;
	}
	key.parse().ok()
}

/// Look up the value at a dotted path.
///
/// The first path segment is looked up at the root of the context,
/// each following segment in the value found so far.
///
/// Returns `None` as soon as a segment can not be found,
/// including when an intermediate value is null or a primitive.
/// Bracket syntax like `items[0]` gets no special treatment, use `items.0` instead.
///
/// # Example
/// ```rust
/// # use resolvable::{lookup, Value};
/// let context = Value::mapping([("user", Value::mapping([("name", "X")]))]);
/// assert_eq!(lookup("user.name", &context), Some(&Value::from("X")));
/// assert_eq!(lookup("user.age", &context), None);
/// ```
pub fn lookup<'a, C>(path: &str, context: &'a C) -> Option<&'a C::Value>
where
	C: Context + ?Sized,
{
	let mut parts = path.split('.');
	let mut current = context.get(parts.next()?)?;
	for part in parts {
		current = current.child(part)?;
	}
	Some(current)
}

/// Check if a dotted path names a value in the context.
///
/// See [`lookup()`] for the resolution rules.
///
/// # Example
/// ```rust
/// # use resolvable::{resolves, Value};
/// let context = Value::mapping([("a", Value::mapping([("b", Value::mapping([("c", 1)]))]))]);
/// assert!(resolves("a.b.c", &context));
/// assert!(!resolves("a.b.x", &context));
/// assert!(!resolves("a", &Value::Mapping(Default::default())));
/// ```
#[inline]
pub fn resolves<C>(path: &str, context: &C) -> bool
where
	C: Context + ?Sized,
{
	lookup(path, context).is_some()
}

/// A context without any values.
///
/// Every non-empty expression is unresolved against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl Context for EmptyContext {
	type Value = Value;

	#[inline]
	fn get(&self, _key: &str) -> Option<&Self::Value> {
		None
	}

	#[inline]
	fn keys(&self) -> Vec<String> {
		Vec::new()
	}
}

/// Allow using key-value [`slice`]s as [`Context`]s.
///
/// # Example
/// ```rust
/// # use resolvable::{resolves, Value};
/// let context = [("user", Value::mapping([("name", "X")]))];
/// assert!(resolves("user.name", &context[..]));
/// assert!(!resolves("account", &context[..]));
/// ```
impl<K, V> Context for [(K, V)]
where
	K: Borrow<str>,
	V: ContextValue,
{
	type Value = V;

	fn get(&self, key: &str) -> Option<&Self::Value> {
		self.iter().find_map(|(k, v)| (k.borrow() == key).then_some(v))
	}

	fn keys(&self) -> Vec<String> {
		self.iter().map(|(k, _)| k.borrow().to_owned()).collect()
	}
}

/// Allow using key-value [`arrays`](`array`) as [`Context`]s.
impl<K, V, const N: usize> Context for [(K, V); N]
where
	K: Borrow<str>,
	V: ContextValue,
{
	type Value = V;

	#[inline(always)]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		Context::get(self.as_slice(), key)
	}

	#[inline(always)]
	fn keys(&self) -> Vec<String> {
		Context::keys(self.as_slice())
	}
}

/// Allow using key-value [`Vec`]s as [`Context`]s.
impl<K, V> Context for Vec<(K, V)>
where
	K: Borrow<str>,
	V: ContextValue,
{
	type Value = V;

	#[inline(always)]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		Context::get(self.as_slice(), key)
	}

	#[inline(always)]
	fn keys(&self) -> Vec<String> {
		Context::keys(self.as_slice())
	}
}

impl<T> Context for &'_ T
where
	T: ?Sized + Context,
{
	type Value = T::Value;

	#[inline(always)]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		T::get(self, key)
	}

	#[inline(always)]
	fn keys(&self) -> Vec<String> {
		T::keys(self)
	}
}

impl<T> Context for &'_ mut T
where
	T: ?Sized + Context,
{
	type Value = T::Value;

	#[inline(always)]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		T::get(self, key)
	}

	#[inline(always)]
	fn keys(&self) -> Vec<String> {
		T::keys(self)
	}
}

impl<T> Context for std::boxed::Box<T>
where
	T: ?Sized + Context,
{
	type Value = T::Value;

	#[inline(always)]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		T::get(self, key)
	}

	#[inline(always)]
	fn keys(&self) -> Vec<String> {
		T::keys(self)
	}
}

impl<T> Context for std::rc::Rc<T>
where
	T: ?Sized + Context,
{
	type Value = T::Value;

	#[inline(always)]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		T::get(self, key)
	}

	#[inline(always)]
	fn keys(&self) -> Vec<String> {
		T::keys(self)
	}
}

impl<T> Context for std::sync::Arc<T>
where
	T: ?Sized + Context,
{
	type Value = T::Value;

	#[inline(always)]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		T::get(self, key)
	}

	#[inline(always)]
	fn keys(&self) -> Vec<String> {
		T::keys(self)
	}
}

impl<V: ContextValue> Context for BTreeMap<&str, V> {
	type Value = V;

	#[inline]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		BTreeMap::get(self, key)
	}

	fn keys(&self) -> Vec<String> {
		BTreeMap::keys(self).map(|k| (*k).to_owned()).collect()
	}
}

impl<V: ContextValue> Context for BTreeMap<String, V> {
	type Value = V;

	#[inline]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		BTreeMap::get(self, key)
	}

	fn keys(&self) -> Vec<String> {
		BTreeMap::keys(self).cloned().collect()
	}
}

impl<V: ContextValue, S: BuildHasher> Context for HashMap<&str, V, S> {
	type Value = V;

	#[inline]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		HashMap::get(self, key)
	}

	fn keys(&self) -> Vec<String> {
		HashMap::keys(self).map(|k| (*k).to_owned()).collect()
	}
}

impl<V: ContextValue, S: BuildHasher> Context for HashMap<String, V, S> {
	type Value = V;

	#[inline]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		HashMap::get(self, key)
	}

	fn keys(&self) -> Vec<String> {
		HashMap::keys(self).cloned().collect()
	}
}
