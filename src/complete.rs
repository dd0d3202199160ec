//! Completion of `$root.path` expressions against a context.
//!
//! Completion looks at the text before the cursor.
//! If it ends in a `$` followed by letters, digits, underscores and dots,
//! the context is searched for keys that can continue the path:
//!
//! * `$` offers every root key,
//! * `$us` offers the root keys starting with `us`,
//! * `$user.na` offers the keys of `user` starting with `na`.
//!
//! Root keys are offered with a single leading `$`, whether or not the key in the context has one.
//! When completing nested paths, the root is looked up as `$user` first and as `user` second.

use crate::{Context, ContextValue, ValueKind};

/// Options for [`complete()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct CompletionOptions {
	/// The maximum number of characters of a primitive value to show in the completion info.
	pub max_preview_chars: usize,

	/// Match the typed prefix case sensitively.
	pub case_sensitive: bool,
}

impl Default for CompletionOptions {
	fn default() -> Self {
		Self {
			max_preview_chars: 50,
			case_sensitive: false,
		}
	}
}

/// The type of a completion option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CompletionKind {
	/// A root variable of the context.
	Variable,

	/// A nested mapping.
	Object,

	/// A nested sequence.
	Array,

	/// A nested string.
	String,

	/// A nested number.
	Number,

	/// A nested boolean.
	Boolean,

	/// A nested null.
	Null,
}

impl CompletionKind {
	/// The lowercase name of the kind.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Variable => "variable",
			Self::Object => "object",
			Self::Array => "array",
			Self::String => "string",
			Self::Number => "number",
			Self::Boolean => "boolean",
			Self::Null => "null",
		}
	}
}

impl From<ValueKind> for CompletionKind {
	fn from(other: ValueKind) -> Self {
		match other {
			ValueKind::Mapping => Self::Object,
			ValueKind::Sequence => Self::Array,
			ValueKind::String => Self::String,
			ValueKind::Number => Self::Number,
			ValueKind::Bool => Self::Boolean,
			ValueKind::Null => Self::Null,
		}
	}
}

/// A single completion option.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Completion {
	/// The text to insert.
	pub label: String,

	/// The type of the completed value.
	#[cfg_attr(feature = "serde", serde(rename = "type"))]
	pub kind: CompletionKind,

	/// A short description of the completed value.
	pub info: String,
}

/// The result of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Completions {
	/// Byte offset where the inserted label replaces the typed text.
	pub from: usize,

	/// The matching options.
	pub options: Vec<Completion>,
}

/// Complete the `$root.path` expression that ends at the cursor.
///
/// `before_cursor` is the text of the buffer up to the cursor,
/// so `from` in the result is a byte offset into the buffer as well.
///
/// Returns `None` if the text before the cursor does not end in a `$` path,
/// if a nested path does not lead to a mapping or sequence,
/// or if no key matches the typed prefix.
/// A bare `$` always returns the root keys, even if there are none.
///
/// # Example
/// ```rust
/// # use resolvable::{complete, CompletionOptions, Value};
/// let context = Value::mapping([("user", Value::mapping([("name", "X"), ("age", "3")]))]);
/// let completions = complete("{{ $user.na", &context, &CompletionOptions::default()).unwrap();
/// assert_eq!(completions.from, 9);
/// assert_eq!(completions.options[0].label, "name");
/// assert_eq!(completions.options[0].info, "string: X");
/// ```
pub fn complete<C>(before_cursor: &str, context: &C, options: &CompletionOptions) -> Option<Completions>
where
	C: Context + ?Sized,
{
	let from = path_start(before_cursor)?;
	let word = &before_cursor[from..];

	if word == "$" {
		let options = context.keys().iter().map(|key| root_completion(key)).collect();
		return Some(Completions { from, options });
	}

	if let Some((root, rest)) = word[1..].split_once('.') {
		let (path, partial) = match rest.rsplit_once('.') {
			Some((path, partial)) => (Some(path), partial),
			None => (None, rest),
		};

		// A `$root` that can not be completed gives way to `root`.
		let mut target = match context.get(&format!("${root}")) {
			Some(value) if value.kind().is_container() => value,
			dollar_root => context.get(root).or(dollar_root)?,
		};
		// `$root..partial` completes the root itself.
		if let Some(path) = path.filter(|path| !path.is_empty()) {
			for part in path.split('.') {
				target = target.child(part)?;
			}
		}
		if !target.kind().is_container() {
			tracing::trace!("complete: ${}.{} is not an object or array", root, path.unwrap_or(""));
			return None;
		}

		let options: Vec<_> = target
			.entries()
			.into_iter()
			.filter(|(key, _)| matches_prefix(key, partial, options.case_sensitive))
			.map(|(key, value)| nested_completion(key, value, options))
			.collect();
		if options.is_empty() {
			return None;
		}
		return Some(Completions {
			from: before_cursor.len() - partial.len(),
			options,
		});
	}

	let typed = &word[1..];
	let options: Vec<_> = context
		.keys()
		.iter()
		.filter(|key| matches_prefix(clean_root_key(key), typed, options.case_sensitive))
		.map(|key| root_completion(key))
		.collect();
	if options.is_empty() {
		return None;
	}
	Some(Completions { from, options })
}

/// Find the byte offset of the `$` that starts the path ending at the end of `text`.
fn path_start(text: &str) -> Option<usize> {
	let bytes = text.as_bytes();
	let mut start = bytes.len();
	while start > 0 && is_path_byte(bytes[start - 1]) {
		start -= 1;
	}
	if start > 0 && bytes[start - 1] == b'$' {
		Some(start - 1)
	} else {
		None
	}
}

fn is_path_byte(c: u8) -> bool {
	c.is_ascii_alphanumeric() || c == b'_' || c == b'.'
}

fn clean_root_key(key: &str) -> &str {
	key.strip_prefix('$').unwrap_or(key)
}

fn matches_prefix(key: &str, prefix: &str, case_sensitive: bool) -> bool {
	if case_sensitive {
		key.starts_with(prefix)
	} else {
		key.to_lowercase().starts_with(&prefix.to_lowercase())
	}
}

fn root_completion(key: &str) -> Completion {
	let key = clean_root_key(key);
	Completion {
		label: format!("${key}"),
		kind: CompletionKind::Variable,
		info: format!("Root variable: {key}"),
	}
}

fn nested_completion<V>(key: String, value: &V, options: &CompletionOptions) -> Completion
where
	V: ContextValue + ?Sized,
{
	let kind = value.kind();
	let info = match kind {
		ValueKind::Mapping => format!("Object with {} properties", value.len()),
		ValueKind::Sequence => format!("Array with {} items", value.len()),
		_ => {
			let preview: String = value.preview().chars().take(options.max_preview_chars).collect();
			format!("{}: {}", kind.type_name(), preview)
		},
	};
	Completion {
		label: key,
		kind: kind.into(),
		info,
	}
}
