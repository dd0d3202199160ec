//! Scanning, validation and highlight reconciliation for `{{ ... }}` expressions in a text buffer.
//!
//! Editors for workflow parameters let users embed expressions like `{{ $json.user.name }}` in plain text.
//! This library classifies each expression against a data context, so the editor can paint it:
//!
//! * `valid` if the dotted path resolves in the context,
//! * `unresolved` if it does not,
//! * `invalid` if the expression is empty.
//!
//! # Features
//!
//! * Scan a text snapshot with the expression spans reported by the editor, or find them with [`find_resolvables()`].
//! * Resolve dotted paths against the crate's own [`Value`], standard maps, or JSON, YAML and TOML documents.
//! * Keep highlight markers in sync across buffer and context changes with the [`Highlighter`].
//! * Offer `$root.path` completions from the context with [`complete()`].
//! * Check spans against the span source contract and render the offending source line with [`check_boundaries()`].
//!
//! # Examples
//!
//! The [`scan()`] function classifies every span of a text snapshot.
//!
//! ```
//! # use resolvable::{find_resolvables, scan, ResolvableState, Value};
//! let context = Value::mapping([("user", Value::mapping([("name", "X")]))]);
//! let text = "Hello {{ user.name }}, you have {{ inbox.count }} messages {{ }}";
//! let segments = scan(text, &find_resolvables(text), &context);
//!
//! let states: Vec<_> = segments.iter().map(|s| s.state).collect();
//! assert_eq!(states, [ResolvableState::Valid, ResolvableState::Unresolved, ResolvableState::Invalid]);
//! assert_eq!(segments[0].expression(text), "user.name");
//! ```
//!
//! A [`Highlighter`] remembers the previous scan and emits the marker changes for the editor.
//!
//! ```
//! # use resolvable::{Highlighter, MarkerSet, Span, ResolvableState, Value};
//! let mut highlighter = Highlighter::new();
//! let mut markers = MarkerSet::new();
//!
//! let context = Value::mapping([("user", Value::mapping([("name", "X")]))]);
//! highlighter.on_text_change("{{ user.name }}", &context).apply_to(&mut markers);
//! assert_eq!(markers.get(Span::new(0, 15)), Some(ResolvableState::Valid));
//!
//! highlighter.on_context_change(&Value::Null).apply_to(&mut markers);
//! assert_eq!(markers.get(Span::new(0, 15)), Some(ResolvableState::Unresolved));
//! ```
//!
//! With the `json` feature, JSON documents can be used as a context directly.
//!
//! ```
//! # #[cfg(feature = "json")]
//! # {
//! # use resolvable::{complete, resolves, CompletionOptions};
//! let context = serde_json::json!({ "$json": { "name": "Alice", "age": 31 } });
//! assert!(resolves("$json.name", &context));
//!
//! let completions = complete("{{ $json.a", &context, &CompletionOptions::default()).unwrap();
//! assert_eq!(completions.options[0].label, "age");
//! assert_eq!(completions.options[0].info, "number: 31");
//! # }
//! ```
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]
#![warn(missing_docs, missing_debug_implementations)]

pub mod error;
pub use error::Error;

pub mod context;
pub use context::{lookup, resolves, Context, ContextValue, EmptyContext, Mapping, Value, ValueKind};

mod segment;
pub use segment::*;

pub mod scan;
pub use scan::{check_boundaries, classify, expression_content, find_resolvables, scan, unwrap_expression};

pub mod highlight;
pub use highlight::{Highlighter, MarkerDiff, MarkerSet, MarkerSink};

pub mod complete;
pub use complete::{complete, Completion, CompletionKind, CompletionOptions, Completions};

mod features;
#[allow(unused_imports)]
pub use features::*;
