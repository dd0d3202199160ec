use memchr::memmem;

use super::{CLOSE, OPEN};
use crate::error::{self, Error};
use crate::Span;

/// Find all `{{ ... }}` regions in a text.
///
/// A region starts at a `{{` and ends after the first `}}` that follows it.
/// Everything in between, including further `{{`, is part of the expression.
/// An unterminated `{{` does not produce a span.
///
/// The returned spans are ordered, do not overlap and include both delimiters,
/// so they can be passed directly to [`scan()`][crate::scan].
///
/// # Example
/// ```rust
/// # use resolvable::{find_resolvables, Span};
/// let spans = find_resolvables("Hi {{ user.name }}, {{ }} and {{ unterminated");
/// assert_eq!(spans, [Span::new(3, 18), Span::new(20, 25)]);
/// ```
pub fn find_resolvables(text: &str) -> Vec<Span> {
	let source = text.as_bytes();
	let open = memmem::Finder::new(OPEN);
	let close = memmem::Finder::new(CLOSE);

	let mut spans = Vec::new();
	let mut finger = 0;
	while finger < source.len() {
		let from = match open.find(&source[finger..]) {
			Some(x) => finger + x,
			None => break,
		};
		let content_start = from + OPEN.len();
		let to = match close.find(&source[content_start..]) {
			Some(x) => content_start + x + CLOSE.len(),
			None => break,
		};
		spans.push(Span::new(from, to));
		finger = to;
	}
	spans
}

/// Check that a list of spans satisfies the span source contract for a text.
///
/// The contract requires that every span:
///
/// * ends within the text,
/// * does not end before it starts,
/// * lies on character boundaries,
/// * starts at or after the end of the previous span,
/// * starts with `{{` and ends with `}}`, without the delimiters overlapping.
///
/// The zero-width `(0, 0)` span that some editors report for an empty document is accepted.
///
/// [`scan()`][crate::scan] does not require this check:
/// it classifies spans that break the contract as invalid.
/// Hosts can use it to surface errors in their span source.
///
/// # Example
/// ```rust
/// # use resolvable::{check_boundaries, find_resolvables, Span};
/// let text = "Hello {{user.name}}";
/// assert!(check_boundaries(text, &find_resolvables(text)).is_ok());
///
/// let error = check_boundaries(text, &[Span::new(6, 20)]).unwrap_err();
/// assert_eq!(error.to_string(), "Span 6..20 is out of bounds for text of length 19");
/// ```
pub fn check_boundaries(text: &str, spans: &[Span]) -> Result<(), Error> {
	let mut previous_end = 0;
	for span in spans {
		if span.is_sentinel() {
			continue;
		}
		if span.to < span.from {
			return Err(error::InvertedSpan {
				from: span.from,
				to: span.to,
			}
			.into());
		}
		if span.to > text.len() {
			return Err(error::OutOfBounds {
				from: span.from,
				to: span.to,
				len: text.len(),
			}
			.into());
		}
		for position in [span.from, span.to] {
			if !text.is_char_boundary(position) {
				return Err(error::NotCharBoundary { position }.into());
			}
		}
		if span.from < previous_end {
			return Err(error::Overlapping {
				position: span.from,
				previous_end,
			}
			.into());
		}

		let source = &text[span.range()];
		if source.len() < OPEN.len() + CLOSE.len() || !source.starts_with(OPEN) || !source.ends_with(CLOSE) {
			return Err(error::MissingDelimiters {
				position: span.from,
				len: source.len(),
			}
			.into());
		}
		previous_end = span.to;
	}
	Ok(())
}
