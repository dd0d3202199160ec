use indexmap::IndexMap;

use crate::{Context, ContextValue};

impl<V: ContextValue> Context for IndexMap<&str, V> {
	type Value = V;

	#[inline]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		IndexMap::get(self, key)
	}

	fn keys(&self) -> Vec<String> {
		IndexMap::keys(self).map(|k| (*k).to_owned()).collect()
	}
}

impl<V: ContextValue> Context for IndexMap<String, V> {
	type Value = V;

	#[inline]
	fn get(&self, key: &str) -> Option<&Self::Value> {
		IndexMap::get(self, key)
	}

	fn keys(&self) -> Vec<String> {
		IndexMap::keys(self).cloned().collect()
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use indexmap::IndexMap;
	use assert2::{assert, check, let_assert};

	use crate::{complete, resolves, CompletionOptions, Context, Value};

	#[test]
	fn test_resolves() {
		let mut map: IndexMap<String, Value> = IndexMap::new();
		map.insert("user".into(), Value::mapping([("name", "X")]));
		check!(resolves("user.name", &map));
		check!(!resolves("user.age", &map));

		let mut map: IndexMap<&str, Value> = IndexMap::new();
		map.insert("user", Value::mapping([("name", "X")]));
		check!(resolves("user.name", &map));
		check!(!resolves("account", &map));
	}

	#[test]
	fn root_keys_keep_insertion_order() {
		let mut map: IndexMap<&str, Value> = IndexMap::new();
		map.insert("zeta", Value::Null);
		map.insert("$alpha", Value::Null);
		assert!(Context::keys(&map) == ["zeta", "$alpha"]);

		let_assert!(Some(completions) = complete("$", &map, &CompletionOptions::default()));
		let labels: Vec<_> = completions.options.iter().map(|c| c.label.as_str()).collect();
		assert!(labels == ["$zeta", "$alpha"]);
	}
}
