//! Classification of expression spans against a context.

use crate::{resolves, Context, ResolvableState, Segment, Span};

mod lexer;
pub use lexer::*;

/// The opening delimiter of an expression.
pub const OPEN: &str = "{{";

/// The closing delimiter of an expression.
pub const CLOSE: &str = "}}";

/// Scan the spans of a text snapshot and classify each one against a context.
///
/// Each span must cover one `{{ ... }}` region of `text`, including the delimiters.
/// The result contains one resolvable segment per span, in the same order:
///
/// * an empty expression is [`Invalid`][ResolvableState::Invalid],
/// * an expression that [resolves][crate::resolves] in the context is [`Valid`][ResolvableState::Valid],
/// * any other expression is [`Unresolved`][ResolvableState::Unresolved].
///
/// Spans without extractable content (see [`expression_content()`]) are invalid.
/// This function never fails and has no side effects.
///
/// # Example
/// ```rust
/// # use resolvable::{scan, ResolvableState, Span, Value};
/// let context = Value::mapping([("user", Value::mapping([("name", "X")]))]);
/// let text = "Hello {{ user.name }} from {{ user.city }}";
/// let segments = scan(text, &[Span::new(6, 21), Span::new(27, 42)], &context);
/// assert_eq!(segments[0].state, ResolvableState::Valid);
/// assert_eq!(segments[1].state, ResolvableState::Unresolved);
/// ```
pub fn scan<C>(text: &str, spans: &[Span], context: &C) -> Vec<Segment>
where
	C: Context + ?Sized,
{
	spans
		.iter()
		.map(|&span| Segment::resolvable(span, classify(expression_content(text, span), context)))
		.collect()
}

/// Classify a single trimmed expression against a context.
pub fn classify<C>(expression: &str, context: &C) -> ResolvableState
where
	C: Context + ?Sized,
{
	if expression.is_empty() {
		ResolvableState::Invalid
	} else if resolves(expression, context) {
		ResolvableState::Valid
	} else {
		ResolvableState::Unresolved
	}
}

/// Get the trimmed expression inside the delimiters of a span.
///
/// The end of the span is clamped to the end of the text.
/// A leading `{{` and a trailing `}}` are removed where present, then surrounding whitespace is trimmed.
///
/// Returns an empty string if the span ends before it starts,
/// starts past the end of the text,
/// is shorter than the two delimiters,
/// or does not lie on character boundaries.
///
/// # Example
/// ```rust
/// # use resolvable::{expression_content, Span};
/// assert_eq!(expression_content("a {{ b.c }} d", Span::new(2, 11)), "b.c");
/// assert_eq!(expression_content("{{}}", Span::new(0, 4)), "");
/// ```
pub fn expression_content(text: &str, span: Span) -> &str {
	let to = span.to.min(text.len());
	let source = match text.get(span.from..to) {
		Some(x) => x,
		None => return "",
	};
	if source.len() < OPEN.len() + CLOSE.len() {
		return "";
	}
	let inner = source.strip_prefix(OPEN).unwrap_or(source);
	let inner = inner.strip_suffix(CLOSE).unwrap_or(inner);
	inner.trim()
}

/// Strip the `={{` prefix and `}}` suffix of a stored expression value.
///
/// Values that are not wrapped are only trimmed.
///
/// # Example
/// ```rust
/// # use resolvable::unwrap_expression;
/// assert_eq!(unwrap_expression("={{ $json.name }}"), "$json.name");
/// assert_eq!(unwrap_expression("plain"), "plain");
/// ```
pub fn unwrap_expression(value: &str) -> &str {
	let value = value.strip_prefix("=").and_then(|x| x.strip_prefix(OPEN)).unwrap_or(value);
	let value = value.strip_suffix(CLOSE).unwrap_or(value);
	value.trim()
}
