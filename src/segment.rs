//! Spans and classified segments of a text buffer.

/// The byte range of one `{{ ... }}` region in a text snapshot, including both delimiters.
///
/// Spans are produced by a span source: either the syntax tree of the surrounding editor,
/// or [`find_resolvables()`][crate::find_resolvables].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
	/// Byte offset of the opening `{{`.
	pub from: usize,

	/// Byte offset just past the closing `}}`.
	pub to: usize,
}

impl Span {
	/// Create a new span.
	#[inline]
	pub const fn new(from: usize, to: usize) -> Self {
		Self { from, to }
	}

	/// Check if this is the zero-width `(0, 0)` span some editors report for an empty document.
	#[inline]
	pub const fn is_sentinel(&self) -> bool {
		self.from == 0 && self.to == 0
	}

	/// Get the span as a byte range.
	#[inline]
	pub const fn range(&self) -> std::ops::Range<usize> {
		self.from..self.to
	}
}

impl From<(usize, usize)> for Span {
	#[inline]
	fn from((from, to): (usize, usize)) -> Self {
		Self { from, to }
	}
}

impl From<std::ops::Range<usize>> for Span {
	#[inline]
	fn from(range: std::ops::Range<usize>) -> Self {
		Self {
			from: range.start,
			to: range.end,
		}
	}
}

/// What a segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SegmentKind {
	/// An expression span.
	Resolvable,

	/// Text that is no longer an expression.
	///
	/// Only used to retract a stale highlight.
	Plaintext,
}

/// The resolution state of an expression span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResolvableState {
	/// The expression names a value in the context.
	Valid,

	/// The expression is empty.
	Invalid,

	/// Resolution has not finished yet.
	///
	/// Never produced by [`scan()`][crate::scan], which resolves synchronously.
	/// Reserved for hosts that resolve expressions asynchronously.
	Pending,

	/// The expression does not name a value in the context.
	Unresolved,
}

impl ResolvableState {
	/// All states, in declaration order.
	pub const ALL: [Self; 4] = [Self::Valid, Self::Invalid, Self::Pending, Self::Unresolved];

	/// The lowercase name of the state.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Valid => "valid",
			Self::Invalid => "invalid",
			Self::Pending => "pending",
			Self::Unresolved => "unresolved",
		}
	}

	/// The CSS class a renderer uses for markers in this state.
	pub const fn css_class(self) -> &'static str {
		match self {
			Self::Valid => "cm-valid-resolvable",
			Self::Invalid => "cm-invalid-resolvable",
			Self::Pending => "cm-pending-resolvable",
			Self::Unresolved => "cm-unresolved-resolvable",
		}
	}
}

impl std::fmt::Display for ResolvableState {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The CSS class for plain text between expressions.
pub const PLAINTEXT_CSS_CLASS: &str = "cm-plaintext";

/// A classified range of a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
	/// Byte offset of the start of the segment.
	pub from: usize,

	/// Byte offset just past the end of the segment.
	pub to: usize,

	/// Whether the segment is an expression or a retracted one.
	pub kind: SegmentKind,

	/// The resolution state.
	///
	/// Only meaningful when `kind` is [`SegmentKind::Resolvable`].
	pub state: ResolvableState,
}

impl Segment {
	/// Create a resolvable segment for a span.
	#[inline]
	pub const fn resolvable(span: Span, state: ResolvableState) -> Self {
		Self {
			from: span.from,
			to: span.to,
			kind: SegmentKind::Resolvable,
			state,
		}
	}

	/// Get the span covered by the segment.
	#[inline]
	pub const fn span(&self) -> Span {
		Span::new(self.from, self.to)
	}

	/// Turn the segment into a plaintext segment at the same position.
	#[inline]
	pub const fn into_plaintext(self) -> Self {
		Self {
			kind: SegmentKind::Plaintext,
			..self
		}
	}

	/// Check if the segment is a resolvable expression.
	#[inline]
	pub const fn is_resolvable(&self) -> bool {
		matches!(self.kind, SegmentKind::Resolvable)
	}

	/// The CSS class a renderer uses for this segment.
	pub const fn css_class(&self) -> &'static str {
		match self.kind {
			SegmentKind::Resolvable => self.state.css_class(),
			SegmentKind::Plaintext => PLAINTEXT_CSS_CLASS,
		}
	}

	/// Get the source text of the segment, including delimiters.
	///
	/// Returns `None` if the segment does not lie on character boundaries of `text`.
	#[inline]
	pub fn source<'a>(&self, text: &'a str) -> Option<&'a str> {
		text.get(self.from..self.to)
	}

	/// Get the trimmed expression inside the delimiters.
	///
	/// Returns an empty string if the segment has no extractable content.
	#[inline]
	pub fn expression<'a>(&self, text: &'a str) -> &'a str {
		crate::scan::expression_content(text, self.span())
	}

	/// Write the source line containing the segment with the segment underlined.
	///
	/// Only the part of the segment on its first line is underlined.
	/// The highlighting ends with a newline.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, text: &str) -> std::fmt::Result {
		if text.get(self.from..self.to).is_none() {
			return Err(std::fmt::Error);
		}
		let start = crate::error::line_start(text.as_bytes(), self.from);
		let end = crate::error::line_end(text.as_bytes(), self.from);
		let line = &text[start..end];
		let range = self.from - start..self.to.min(end) - start;
		write!(f, "  {}\n  ", line)?;
		crate::error::write_underline(f, line, range)?;
		writeln!(f)
	}

	/// Get the source line containing the segment with the segment underlined.
	///
	/// Returns an empty string if the segment does not lie on character boundaries of `text`.
	pub fn source_highlighting(&self, text: &str) -> String {
		let mut output = String::new();
		if self.write_source_highlighting(&mut output, text).is_err() {
			output.clear();
		}
		output
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use assert2::{assert, check};

	use super::*;

	#[test]
	fn sentinel_span() {
		check!(Span::new(0, 0).is_sentinel());
		check!(!Span::new(0, 4).is_sentinel());
		check!(!Span::new(3, 3).is_sentinel());
	}

	#[test]
	fn plaintext_keeps_position_and_state() {
		let segment = Segment::resolvable(Span::new(6, 20), ResolvableState::Valid);
		let plain = segment.into_plaintext();
		check!(plain.from == 6);
		check!(plain.to == 20);
		check!(plain.kind == SegmentKind::Plaintext);
		check!(plain.state == ResolvableState::Valid);
		check!(!plain.is_resolvable());
		check!(plain.css_class() == "cm-plaintext");
	}

	#[test]
	fn css_classes() {
		let classes: Vec<_> = ResolvableState::ALL.iter().map(|s| s.css_class()).collect();
		assert!(classes == [
			"cm-valid-resolvable",
			"cm-invalid-resolvable",
			"cm-pending-resolvable",
			"cm-unresolved-resolvable",
		]);
	}

	#[test]
	fn expression_text() {
		let text = "Hello {{ user.name }}!";
		let segment = Segment::resolvable(Span::new(6, 21), ResolvableState::Valid);
		check!(segment.source(text) == Some("{{ user.name }}"));
		check!(segment.expression(text) == "user.name");
	}

	#[test]
	fn source_highlighting() {
		let text = "first line\nHello {{ user.age }}!\nlast";
		let segment = Segment::resolvable(Span::new(17, 31), ResolvableState::Unresolved);
		assert!(segment.source_highlighting(text) == concat!(
			"  Hello {{ user.age }}!\n",
			"        ^^^^^^^^^^^^^^\n",
		));
	}

	#[test]
	fn source_highlighting_wide_characters() {
		let text = "　　{{x}}";
		let segment = Segment::resolvable(Span::new(6, 11), ResolvableState::Unresolved);
		assert!(segment.source_highlighting(text) == concat!(
			"  　　{{x}}\n",
			"      ^^^^^\n",
		));
	}

	#[test]
	fn source_highlighting_out_of_bounds() {
		let segment = Segment::resolvable(Span::new(2, 40), ResolvableState::Invalid);
		check!(segment.source_highlighting("{{}}") == "");
	}
}
