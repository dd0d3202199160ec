//! Reconciliation of highlight markers with the latest scan.
//!
//! The [`Highlighter`] keeps the segments of the last scan.
//! On every buffer or context change it scans again and returns a [`MarkerDiff`]:
//! every previous segment is retracted as plaintext, then every new segment is added.
//! Applying the diff to a [`MarkerSink`] makes its markers match the new scan.

use std::collections::HashMap;

use crate::{find_resolvables, scan, Context, Segment, Span};

mod markers;
pub use markers::*;

/// The marker changes needed to go from one scan to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
	/// Segments of the previous scan to retract, as plaintext.
	pub remove: Vec<Segment>,

	/// Resolvable segments of the new scan to add.
	///
	/// Every segment has `from < to`, so the `(0, 0)` span is never added.
	/// No two segments have the same span.
	pub add: Vec<Segment>,
}

impl MarkerDiff {
	/// Check if the diff does not change anything.
	pub fn is_empty(&self) -> bool {
		self.remove.is_empty() && self.add.is_empty()
	}

	/// Apply the diff to a marker sink.
	///
	/// All removals are applied before the first addition.
	pub fn apply_to<S>(&self, sink: &mut S)
	where
		S: MarkerSink + ?Sized,
	{
		for segment in &self.remove {
			sink.remove_marker(segment.span());
		}
		for segment in &self.add {
			sink.add_marker(segment.span(), segment.state);
		}
	}
}

/// Keeps highlight markers in sync with a text buffer and its context.
///
/// The highlighter remembers the last text snapshot, its spans and the resulting segments.
/// The context is not stored: it is passed in on every change.
///
/// # Example
/// ```rust
/// # use resolvable::{Highlighter, MarkerSet, ResolvableState, Span, Value};
/// let mut highlighter = Highlighter::new();
/// let mut markers = MarkerSet::new();
///
/// let context = Value::mapping([("user", Value::mapping([("name", "X")]))]);
/// highlighter.on_text_change("Hello {{ user.name }}", &context).apply_to(&mut markers);
/// assert_eq!(markers.get(Span::new(6, 21)), Some(ResolvableState::Valid));
///
/// let context = Value::mapping([("account", 1)]);
/// highlighter.on_context_change(&context).apply_to(&mut markers);
/// assert_eq!(markers.get(Span::new(6, 21)), Some(ResolvableState::Unresolved));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
	text: String,
	spans: Vec<Span>,
	previous: Vec<Segment>,
}

impl Highlighter {
	/// Create a highlighter for an empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the text of the last buffer snapshot.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Get the spans of the last buffer snapshot.
	pub fn spans(&self) -> &[Span] {
		&self.spans
	}

	/// Get the segments of the last scan.
	pub fn segments(&self) -> &[Segment] {
		&self.previous
	}

	/// Reconcile after the buffer changed.
	///
	/// `spans` must be the spans of `text`, as reported by the span source of the editor.
	pub fn on_buffer_change<C>(&mut self, text: &str, spans: &[Span], context: &C) -> MarkerDiff
	where
		C: Context + ?Sized,
	{
		self.text.clear();
		self.text.push_str(text);
		self.spans.clear();
		self.spans.extend_from_slice(spans);
		self.reconcile(context)
	}

	/// Reconcile after the buffer changed, finding the spans with [`find_resolvables()`].
	pub fn on_text_change<C>(&mut self, text: &str, context: &C) -> MarkerDiff
	where
		C: Context + ?Sized,
	{
		let spans = find_resolvables(text);
		self.on_buffer_change(text, &spans, context)
	}

	/// Reconcile after the context was replaced.
	///
	/// The last buffer snapshot is scanned again against the new context.
	pub fn on_context_change<C>(&mut self, context: &C) -> MarkerDiff
	where
		C: Context + ?Sized,
	{
		self.reconcile(context)
	}

	/// Scan the stored snapshot and replace the previous segments.
	fn reconcile<C>(&mut self, context: &C) -> MarkerDiff
	where
		C: Context + ?Sized,
	{
		let segments = scan(&self.text, &self.spans, context);

		let remove: Vec<Segment> = self
			.previous
			.iter()
			.filter(|segment| segment.is_resolvable())
			.map(|segment| segment.into_plaintext())
			.collect();

		let mut add: Vec<Segment> = Vec::with_capacity(segments.len());
		let mut index: HashMap<Span, usize> = HashMap::with_capacity(segments.len());
		for segment in &segments {
			if segment.span().is_sentinel() {
				tracing::trace!("Highlighter: skipping [0-0] segment");
				continue;
			}
			if segment.from >= segment.to {
				tracing::trace!("Highlighter: skipping empty or inverted segment [{}-{}]", segment.from, segment.to);
				continue;
			}
			match index.get(&segment.span()) {
				Some(&i) => add[i] = *segment,
				None => {
					index.insert(segment.span(), add.len());
					add.push(*segment);
				},
			}
		}

		tracing::debug!(
			"Highlighter: retracting {} markers, applying {} markers",
			remove.len(),
			add.len()
		);
		for segment in &add {
			tracing::trace!("Highlighter: [{}-{}] is {}", segment.from, segment.to, segment.state);
		}

		self.previous = segments;
		MarkerDiff { remove, add }
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use assert2::{assert, check, let_assert};

	use super::*;
	use crate::{EmptyContext, ResolvableState, SegmentKind, Value};

	fn user() -> Value {
		Value::mapping([("user", Value::mapping([("name", "X")]))])
	}

	#[test]
	fn first_change_only_adds() {
		let mut highlighter = Highlighter::new();
		let diff = highlighter.on_buffer_change("Hello {{user.name}}", &[Span::new(6, 19)], &user());
		check!(diff.remove.is_empty());
		assert!(diff.add == [Segment::resolvable(Span::new(6, 19), ResolvableState::Valid)]);
		check!(highlighter.segments() == diff.add.as_slice());
	}

	#[test]
	fn previous_segments_are_retracted_as_plaintext() {
		let mut highlighter = Highlighter::new();
		highlighter.on_text_change("{{ user }} {{ }}", &user());
		let diff = highlighter.on_text_change("{{ user }}", &user());

		check!(diff.remove.len() == 2);
		for segment in &diff.remove {
			check!(segment.kind == SegmentKind::Plaintext);
		}
		check!(diff.remove[0].span() == Span::new(0, 10));
		check!(diff.remove[1].span() == Span::new(11, 16));
		check!(diff.add.len() == 1);
	}

	#[test]
	fn removing_all_expressions() {
		let mut highlighter = Highlighter::new();
		let mut markers = MarkerSet::new();
		highlighter.on_text_change("{{ user }}", &user()).apply_to(&mut markers);
		check!(markers.len() == 1);

		let diff = highlighter.on_text_change("user", &user());
		check!(diff.add.is_empty());
		diff.apply_to(&mut markers);
		check!(markers.is_empty());
		check!(highlighter.segments().is_empty());
	}

	#[test]
	fn context_round_trip() {
		let first = user();
		let second = Value::mapping([("user", Value::mapping([("age", 3)]))]);
		let text = "Hi {{ user.name }}";
		let span = Span::new(3, 18);

		let mut highlighter = Highlighter::new();
		let mut markers = MarkerSet::new();
		highlighter.on_buffer_change(text, &[span], &first).apply_to(&mut markers);
		check!(markers.get(span) == Some(ResolvableState::Valid));

		let diff = highlighter.on_context_change(&second);
		check!(diff.remove == [Segment::resolvable(span, ResolvableState::Valid).into_plaintext()]);
		check!(diff.add == [Segment::resolvable(span, ResolvableState::Unresolved)]);
		diff.apply_to(&mut markers);
		check!(markers.get(span) == Some(ResolvableState::Unresolved));
		check!(highlighter.segments()[0].state == ResolvableState::Unresolved);

		highlighter.on_context_change(&first).apply_to(&mut markers);
		check!(markers.get(span) == Some(ResolvableState::Valid));
		check!(markers.len() == 1);
		check!(highlighter.text() == text);
	}

	#[test]
	fn sentinel_is_never_added() {
		let mut highlighter = Highlighter::new();
		let diff = highlighter.on_buffer_change("", &[Span::new(0, 0)], &EmptyContext);
		check!(diff.add.is_empty());
		check!(highlighter.segments().len() == 1);

		let text = "{{a}}";
		let diff = highlighter.on_buffer_change(text, &[Span::new(0, 0), Span::new(0, 5)], &EmptyContext);
		let_assert!([added] = diff.add.as_slice());
		check!(added.span() == Span::new(0, 5));
		check!(added.state == ResolvableState::Unresolved);
	}

	#[test]
	fn empty_and_inverted_spans_are_never_added() {
		let mut highlighter = Highlighter::new();
		let mut markers = MarkerSet::new();
		let spans = [Span::new(3, 3), Span::new(5, 2), Span::new(2, 7)];
		let diff = highlighter.on_buffer_change("ab{{a}}", &spans, &EmptyContext);
		let_assert!([added] = diff.add.as_slice());
		check!(added.span() == Span::new(2, 7));
		check!(highlighter.segments().len() == 3);

		diff.apply_to(&mut markers);
		check!(markers.len() == 1);
		for (span, _) in markers.iter() {
			check!(span.from < span.to);
		}
	}

	#[test]
	fn duplicate_spans_collapse() {
		let mut highlighter = Highlighter::new();
		let spans = [Span::new(0, 5), Span::new(0, 5)];
		let diff = highlighter.on_buffer_change("{{a}}", &spans, &EmptyContext);
		check!(diff.add.len() == 1);
		check!(highlighter.segments().len() == 2);
	}

	#[test]
	fn markers_follow_every_change() {
		let context = user();
		let edits = [
			"",
			"{{",
			"{{ user",
			"{{ user }}",
			"{{ user.name }} and {{ }}",
			"x {{ user.name }} and {{ user.nope }}",
			"plain text",
		];

		let mut highlighter = Highlighter::new();
		let mut markers = MarkerSet::new();
		for text in edits {
			highlighter.on_text_change(text, &context).apply_to(&mut markers);
			let expected: Vec<Segment> = highlighter.segments().iter().copied().filter(|s| s.from < s.to).collect();
			assert!(markers.segments() == expected, "after {text:?}");
		}
	}

	#[test]
	fn diff_applies_removals_first() {
		#[derive(Default)]
		struct Log(Vec<String>);

		impl MarkerSink for Log {
			fn add_marker(&mut self, span: Span, state: ResolvableState) {
				self.0.push(format!("add {}-{} {}", span.from, span.to, state));
			}

			fn remove_marker(&mut self, span: Span) {
				self.0.push(format!("remove {}-{}", span.from, span.to));
			}
		}

		let mut highlighter = Highlighter::new();
		highlighter.on_text_change("{{ a }}", &EmptyContext);
		let mut log = Log::default();
		highlighter.on_text_change("{{ a }}", &EmptyContext).apply_to(&mut log);
		assert!(log.0 == ["remove 0-7", "add 0-7 unresolved"]);
	}

	#[test]
	fn empty_diff() {
		let mut highlighter = Highlighter::new();
		check!(highlighter.on_context_change(&user()).is_empty());
		check!(highlighter.on_text_change("no expressions", &user()).is_empty());
	}
}
