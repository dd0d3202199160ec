//! Module containing error details.
//!
//! Scanning, resolving and reconciling never fail.
//! The errors in this module describe spans that break the contract of a span source,
//! as reported by [`check_boundaries()`][crate::check_boundaries].

/// A span list that violates the span source contract.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum Error {
	/// A span extends past the end of the text.
	OutOfBounds(OutOfBounds),

	/// A span ends before it starts.
	InvertedSpan(InvertedSpan),

	/// A span boundary falls inside a multi-byte UTF-8 sequence.
	NotCharBoundary(NotCharBoundary),

	/// A span starts before the previous span ends.
	Overlapping(Overlapping),

	/// A span does not start with `{{` or does not end with `}}`.
	MissingDelimiters(MissingDelimiters),
}

impl From<OutOfBounds> for Error {
	fn from(other: OutOfBounds) -> Self {
		Self::OutOfBounds(other)
	}
}

impl From<InvertedSpan> for Error {
	fn from(other: InvertedSpan) -> Self {
		Self::InvertedSpan(other)
	}
}

impl From<NotCharBoundary> for Error {
	fn from(other: NotCharBoundary) -> Self {
		Self::NotCharBoundary(other)
	}
}

impl From<Overlapping> for Error {
	fn from(other: Overlapping) -> Self {
		Self::Overlapping(other)
	}
}

impl From<MissingDelimiters> for Error {
	fn from(other: MissingDelimiters) -> Self {
		Self::MissingDelimiters(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::OutOfBounds(e) => e.fmt(f),
			Self::InvertedSpan(e) => e.fmt(f),
			Self::NotCharBoundary(e) => e.fmt(f),
			Self::Overlapping(e) => e.fmt(f),
			Self::MissingDelimiters(e) => e.fmt(f),
		}
	}
}

/// A span extends past the end of the text.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct OutOfBounds {
	/// The start of the span.
	pub from: usize,

	/// The end of the span.
	pub to: usize,

	/// The length of the text in bytes.
	pub len: usize,
}

impl std::error::Error for OutOfBounds {}

impl std::fmt::Display for OutOfBounds {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Span {}..{} is out of bounds for text of length {}", self.from, self.to, self.len)
	}
}

/// A span ends before it starts.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct InvertedSpan {
	/// The start of the span.
	pub from: usize,

	/// The end of the span.
	pub to: usize,
}

impl std::error::Error for InvertedSpan {}

impl std::fmt::Display for InvertedSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Span {}..{} ends before it starts", self.from, self.to)
	}
}

/// A span boundary falls inside a multi-byte UTF-8 sequence.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct NotCharBoundary {
	/// The byte offset of the offending boundary.
	pub position: usize,
}

impl std::error::Error for NotCharBoundary {}

impl std::fmt::Display for NotCharBoundary {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Span boundary {} is not on a character boundary", self.position)
	}
}

/// A span starts before the previous span ends.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct Overlapping {
	/// The start of the offending span.
	pub position: usize,

	/// The end of the previous span.
	pub previous_end: usize,
}

impl std::error::Error for Overlapping {}

impl std::fmt::Display for Overlapping {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Span at {} overlaps the previous span ending at {}", self.position, self.previous_end)
	}
}

/// A span does not start with `{{` or does not end with `}}`.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct MissingDelimiters {
	/// The start of the span.
	pub position: usize,

	/// The length of the span in bytes.
	pub len: usize,
}

impl std::error::Error for MissingDelimiters {}

impl std::fmt::Display for MissingDelimiters {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Span is not delimited by '{{{{' and '}}}}'")
	}
}

impl Error {
	/// Get the range in the source text that contains the error.
	///
	/// The range is clamped to the end of the text for out of bounds spans.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		match &self {
			Self::OutOfBounds(e) => e.from.min(e.len)..e.len,
			Self::InvertedSpan(e) => e.to..e.from,
			Self::NotCharBoundary(e) => e.position..e.position,
			Self::Overlapping(e) => e.position..e.previous_end,
			Self::MissingDelimiters(e) => e.position..e.position + e.len,
		}
	}

	/// Get the line of source that contains the error.
	///
	/// # Panics
	/// May panic if the source text is not the original source that contains the error.
	pub fn source_line<'a>(&self, source: &'a str) -> &'a str {
		let position = self.source_range().start;
		let start = line_start(source.as_bytes(), position);
		let end = line_end(source.as_bytes(), position);
		&source[start..end]
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the source line exceeds 60 characters in width.
	/// For more control over this behaviour, consider using [`Self::source_range()`] and [`Self::source_line()`] instead.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		use unicode_width::UnicodeWidthStr;

		let range = self.source_range();
		if !source.is_char_boundary(range.start) {
			return Err(std::fmt::Error);
		}
		let start = line_start(source.as_bytes(), range.start);
		let end = line_end(source.as_bytes(), range.start);
		let line = &source[start..end];
		if line.width() > 60 {
			return Ok(());
		}

		// Underline at least one column, and never past the end of the line.
		let underline_end = range.end.clamp(range.start, end);
		let underline_end = if underline_end == range.start {
			next_char_boundary(source, range.start).min(end)
		} else {
			underline_end
		};
		if !source.is_char_boundary(underline_end) {
			return Err(std::fmt::Error);
		}

		write!(f, "  {}\n  ", line)?;
		write_underline(f, line, range.start - start..underline_end - start)?;
		if underline_end == range.start {
			write!(f, "^")?;
		}
		writeln!(f)
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	/// If the error does not point into `source`, an empty string is returned.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		if self.write_source_highlighting(&mut output, source).is_err() {
			output.clear();
		}
		output
	}
}

/// Find the next character boundary after `position`, or the end of the text.
fn next_char_boundary(source: &str, position: usize) -> usize {
	source[position..]
		.chars()
		.next()
		.map_or(source.len(), |c| position + c.len_utf8())
}

pub(crate) fn line_start(source: &[u8], position: usize) -> usize {
	match source[..position].iter().rposition(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => line_end + 1,
		None => 0,
	}
}

pub(crate) fn line_end(source: &[u8], position: usize) -> usize {
	match source[position..].iter().position(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => position + line_end,
		None => source.len(),
	}
}

pub(crate) fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	let carets = line[range].width();
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use assert2::{assert, check};

	use super::*;

	#[test]
	fn display() {
		let e = Error::from(OutOfBounds { from: 6, to: 20, len: 19 });
		check!(e.to_string() == "Span 6..20 is out of bounds for text of length 19");

		let e = Error::from(MissingDelimiters { position: 0, len: 4 });
		check!(e.to_string() == "Span is not delimited by '{{' and '}}'");

		let e = Error::from(Overlapping { position: 3, previous_end: 8 });
		check!(e.to_string() == "Span at 3 overlaps the previous span ending at 8");
	}

	#[test]
	fn highlight_missing_delimiters() {
		let source = "Hello {user}} and more";
		let e = Error::from(MissingDelimiters { position: 6, len: 7 });
		assert!(e.source_highlighting(source) == concat!(
			"  Hello {user}} and more\n",
			"        ^^^^^^^\n",
		));
	}

	#[test]
	fn highlight_out_of_bounds() {
		let source = "Hello {{user.name}}";
		let e = Error::from(OutOfBounds { from: 6, to: 20, len: 19 });
		assert!(e.source_highlighting(source) == concat!(
			"  Hello {{user.name}}\n",
			"        ^^^^^^^^^^^^^\n",
		));
	}

	#[test]
	fn highlight_at_end_of_text() {
		let source = "abc";
		let e = Error::from(OutOfBounds { from: 9, to: 12, len: 3 });
		assert!(e.source_highlighting(source) == concat!(
			"  abc\n",
			"     ^\n",
		));
	}

	#[test]
	fn highlight_on_second_line() {
		let source = "one\n{{a}}{{b}}";
		let e = Error::from(Overlapping { position: 6, previous_end: 9 });
		assert!(e.source_highlighting(source) == concat!(
			"  {{a}}{{b}}\n",
			"    ^^^\n",
		));
	}

	#[test]
	fn highlight_not_char_boundary() {
		let source = "❤{{x}}";
		let e = Error::from(NotCharBoundary { position: 1 });
		check!(e.source_highlighting(source) == "");
	}

	#[test]
	fn long_lines_are_not_highlighted() {
		let source = format!("{}{{{{x}}}}", "a".repeat(70));
		let e = Error::from(MissingDelimiters { position: 70, len: 5 });
		check!(e.source_highlighting(&source) == "");
	}
}
