use std::collections::BTreeMap;

use crate::{ResolvableState, Segment, Span};

/// A renderer that paints highlight markers over ranges of the buffer.
///
/// Markers are keyed by their span.
/// Both operations must be idempotent:
/// adding a marker replaces any marker with the same span,
/// and removing a marker that does not exist does nothing.
pub trait MarkerSink {
	/// Add a marker for a span in the given state.
	fn add_marker(&mut self, span: Span, state: ResolvableState);

	/// Remove the marker for a span.
	fn remove_marker(&mut self, span: Span);
}

impl<T> MarkerSink for &'_ mut T
where
	T: ?Sized + MarkerSink,
{
	#[inline(always)]
	fn add_marker(&mut self, span: Span, state: ResolvableState) {
		T::add_marker(self, span, state)
	}

	#[inline(always)]
	fn remove_marker(&mut self, span: Span) {
		T::remove_marker(self, span)
	}
}

/// An in-memory collection of markers.
///
/// This is the reference implementation of [`MarkerSink`].
/// Markers are ordered by their position in the buffer.
/// Only spans with `from < to` are stored, so the `(0, 0)` span is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
	markers: BTreeMap<Span, ResolvableState>,
}

impl MarkerSet {
	/// Create an empty marker set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the number of markers.
	pub fn len(&self) -> usize {
		self.markers.len()
	}

	/// Check if there are no markers.
	pub fn is_empty(&self) -> bool {
		self.markers.is_empty()
	}

	/// Get the state of the marker for a span.
	pub fn get(&self, span: Span) -> Option<ResolvableState> {
		self.markers.get(&span).copied()
	}

	/// Get the marker that covers a byte offset, if any.
	pub fn marker_at(&self, offset: usize) -> Option<(Span, ResolvableState)> {
		let (&span, &state) = self.markers.range(..=Span::new(offset, usize::MAX)).next_back()?;
		(offset < span.to).then_some((span, state))
	}

	/// Iterate over all markers in buffer order.
	pub fn iter(&self) -> impl Iterator<Item = (Span, ResolvableState)> + '_ {
		self.markers.iter().map(|(&span, &state)| (span, state))
	}

	/// Get all markers as resolvable segments in buffer order.
	pub fn segments(&self) -> Vec<Segment> {
		self.iter().map(|(span, state)| Segment::resolvable(span, state)).collect()
	}

	/// Remove all markers.
	pub fn clear(&mut self) {
		self.markers.clear();
	}
}

impl MarkerSink for MarkerSet {
	fn add_marker(&mut self, span: Span, state: ResolvableState) {
		if span.is_sentinel() {
			tracing::trace!("MarkerSet: skipping [0-0] marker");
			return;
		}
		if span.from >= span.to {
			tracing::trace!("MarkerSet: skipping empty or inverted marker [{}-{}]", span.from, span.to);
			return;
		}
		if let Some(old) = self.markers.insert(span, state) {
			tracing::trace!("MarkerSet: replaced marker [{}-{}] ({} -> {})", span.from, span.to, old, state);
		}
	}

	fn remove_marker(&mut self, span: Span) {
		self.markers.remove(&span);
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use assert2::{assert, check};

	use super::*;
	use ResolvableState::*;

	#[test]
	fn add_and_remove_are_idempotent() {
		let mut set = MarkerSet::new();
		set.add_marker(Span::new(2, 8), Valid);
		set.add_marker(Span::new(2, 8), Valid);
		check!(set.len() == 1);

		set.add_marker(Span::new(2, 8), Unresolved);
		check!(set.len() == 1);
		check!(set.get(Span::new(2, 8)) == Some(Unresolved));

		set.remove_marker(Span::new(2, 8));
		set.remove_marker(Span::new(2, 8));
		check!(set.is_empty());
	}

	#[test]
	fn removal_is_keyed_by_both_ends() {
		let mut set = MarkerSet::new();
		set.add_marker(Span::new(0, 5), Valid);
		set.add_marker(Span::new(5, 10), Invalid);
		set.remove_marker(Span::new(0, 10));
		set.remove_marker(Span::new(5, 9));
		check!(set.len() == 2);
	}

	#[test]
	fn sentinel_is_never_stored() {
		let mut set = MarkerSet::new();
		set.add_marker(Span::new(0, 0), Valid);
		check!(set.is_empty());
	}

	#[test]
	fn empty_and_inverted_spans_are_never_stored() {
		let mut set = MarkerSet::new();
		set.add_marker(Span::new(4, 4), Invalid);
		set.add_marker(Span::new(9, 2), Invalid);
		check!(set.is_empty());
	}

	#[test]
	fn markers_in_buffer_order() {
		let mut set = MarkerSet::new();
		set.add_marker(Span::new(10, 15), Invalid);
		set.add_marker(Span::new(0, 5), Valid);
		assert!(set.segments() == [
			Segment::resolvable(Span::new(0, 5), Valid),
			Segment::resolvable(Span::new(10, 15), Invalid),
		]);
	}

	#[test]
	fn marker_at_offset() {
		let mut set = MarkerSet::new();
		set.add_marker(Span::new(0, 5), Valid);
		set.add_marker(Span::new(10, 15), Unresolved);
		check!(set.marker_at(0) == Some((Span::new(0, 5), Valid)));
		check!(set.marker_at(4) == Some((Span::new(0, 5), Valid)));
		check!(set.marker_at(5) == None);
		check!(set.marker_at(12) == Some((Span::new(10, 15), Unresolved)));
		check!(set.marker_at(15) == None);
		check!(set.marker_at(7) == None);
		check!(set.marker_at(100) == None);
	}
}
