use serde::{
	de::{Error, MapAccess, SeqAccess, Visitor},
	Deserialize,
	Deserializer,
	Serialize,
	Serializer,
};

use crate::{Mapping, Value};

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a null, boolean, number, string, sequence or map")
	}

	fn visit_unit<E>(self) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Value::Null)
	}

	fn visit_none<E>(self) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Value::Null)
	}

	fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
	where
		D: Deserializer<'de>,
	{
		Value::deserialize(deserializer)
	}

	fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Value::Bool(v))
	}

	fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Value::Integer(v))
	}

	fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
	where
		E: Error,
	{
		// Integers that do not fit an i64 degrade to floats, like JavaScript numbers.
		match i64::try_from(v) {
			Ok(v) => Ok(Value::Integer(v)),
			Err(_) => Ok(Value::Float(v as f64)),
		}
	}

	fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Value::Float(v))
	}

	fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Value::String(v.to_owned()))
	}

	fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
	where
		E: Error,
	{
		Ok(Value::String(v))
	}

	fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
	where
		A: SeqAccess<'de>,
	{
		let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(value) = seq.next_element()? {
			values.push(value);
		}
		Ok(Value::Sequence(values))
	}

	fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut mapping = Mapping::new();
		while let Some((key, value)) = map.next_entry::<String, Value>()? {
			mapping.insert(key, value);
		}
		Ok(Value::Mapping(mapping))
	}
}

impl Serialize for Value {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(x) => serializer.serialize_bool(*x),
			Self::Integer(x) => serializer.serialize_i64(*x),
			Self::Float(x) => serializer.serialize_f64(*x),
			Self::String(x) => serializer.serialize_str(x),
			Self::Sequence(x) => serializer.collect_seq(x),
			Self::Mapping(x) => serializer.collect_map(x),
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(ValueVisitor)
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use assert2::{assert, let_assert};
	use serde_test::{assert_de_tokens, assert_tokens, Token};

	use crate::{CompletionOptions, ResolvableState, Segment, SegmentKind, Span, Value};

	#[test]
	fn value_ser_de() {
		assert_tokens(&Value::Null, &[Token::Unit]);
		assert_tokens(&Value::Bool(true), &[Token::Bool(true)]);
		assert_tokens(&Value::Integer(-3), &[Token::I64(-3)]);
		assert_tokens(&Value::Float(1.5), &[Token::F64(1.5)]);
		assert_tokens(&Value::from("X"), &[Token::Str("X")]);
		assert_tokens(&Value::from(vec![1, 2]), &[
			Token::Seq { len: Some(2) },
			Token::I64(1),
			Token::I64(2),
			Token::SeqEnd,
		]);
		assert_tokens(&Value::mapping([("user", Value::mapping([("name", "X")]))]), &[
			Token::Map { len: Some(1) },
			Token::Str("user"),
			Token::Map { len: Some(1) },
			Token::Str("name"),
			Token::Str("X"),
			Token::MapEnd,
			Token::MapEnd,
		]);
	}

	#[test]
	fn value_de_other_tokens() {
		assert_de_tokens(&Value::Integer(7), &[Token::U8(7)]);
		assert_de_tokens(&Value::Null, &[Token::None]);
		assert_de_tokens(&Value::Bool(false), &[Token::Some, Token::Bool(false)]);
		assert_de_tokens(&Value::Float(u64::MAX as f64), &[Token::U64(u64::MAX)]);
		assert_de_tokens(&Value::from("x"), &[Token::String("x")]);
	}

	#[test]
	fn value_from_json() {
		let_assert!(Ok(value) = serde_json::from_str::<Value>(r#"{"user": {"tags": ["a", null], "age": 3.5}}"#));
		assert!(value == Value::mapping([
			("user", Value::mapping([
				("tags", Value::from(vec![Value::from("a"), Value::Null])),
				("age", Value::from(3.5)),
			])),
		]));
	}

	#[test]
	fn segment_ser_de() {
		let segment = Segment::resolvable(Span::new(6, 19), ResolvableState::Valid);
		assert_tokens(&segment, &[
			Token::Struct { name: "Segment", len: 4 },
			Token::Str("from"),
			Token::U64(6),
			Token::Str("to"),
			Token::U64(19),
			Token::Str("kind"),
			Token::UnitVariant { name: "SegmentKind", variant: "resolvable" },
			Token::Str("state"),
			Token::UnitVariant { name: "ResolvableState", variant: "valid" },
			Token::StructEnd,
		]);

		let segment = segment.into_plaintext();
		let_assert!(Ok(json) = serde_json::to_string(&segment));
		assert!(json == r#"{"from":6,"to":19,"kind":"plaintext","state":"valid"}"#);
		assert!(segment.kind == SegmentKind::Plaintext);
	}

	#[test]
	fn span_ser_de() {
		assert_tokens(&Span::new(0, 4), &[
			Token::Struct { name: "Span", len: 2 },
			Token::Str("from"),
			Token::U64(0),
			Token::Str("to"),
			Token::U64(4),
			Token::StructEnd,
		]);
	}

	#[test]
	fn completion_options_from_json() {
		let_assert!(Ok(options) = serde_json::from_str::<CompletionOptions>(r#"{"max-preview-chars": 10}"#));
		assert!(options == CompletionOptions { max_preview_chars: 10, case_sensitive: false });

		let_assert!(Ok(options) = serde_json::from_str::<CompletionOptions>("{}"));
		assert!(options == CompletionOptions::default());
	}
}
