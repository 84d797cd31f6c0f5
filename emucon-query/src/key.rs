//! Query keys and key families.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Identity of one cache slot: a kind, the resource identifiers, and the
/// canonical JSON of the query options.
///
/// Equal inputs always build equal keys. Option objects are serialized with
/// sorted keys and without `null` fields, so `{limit: 5, prefix: None}` and
/// `{limit: 5}` share a slot, and empty options add no segment at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(kind: &str) -> Self {
        Self(vec![kind.to_string()])
    }

    /// Append an identifier segment.
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.0.push(value.into());
        self
    }

    /// Append the canonical form of an options struct.
    pub fn options<T: Serialize + ?Sized>(mut self, options: &T) -> Self {
        match serde_json::to_value(options) {
            Ok(value) => {
                let value = canonical(value);
                let empty = match &value {
                    Value::Null => true,
                    Value::Object(map) => map.is_empty(),
                    _ => false,
                };
                if !empty {
                    self.0.push(value.to_string());
                }
            }
            Err(e) => tracing::warn!(error = %e, kind = self.kind(), "query options not serializable"),
        }
        self
    }

    pub fn kind(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// `true` when `family`'s segments are a prefix of this key's.
    pub fn starts_with(&self, family: &QueryKey) -> bool {
        self.0.starts_with(&family.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" / "))
    }
}

fn canonical(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, canonical(v)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonical).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_drop_nulls_and_sort_keys() {
        let a = QueryKey::new("log-groups").options(&json!({"prefix": "/aws", "limit": 5, "nextToken": null}));
        let b = QueryKey::new("log-groups").options(&json!({"limit": 5, "prefix": "/aws"}));
        assert_eq!(a, b);
        assert_eq!(a.segments()[1], r#"{"limit":5,"prefix":"/aws"}"#);
    }

    #[test]
    fn test_empty_options_add_no_segment() {
        let key = QueryKey::new("tables").options(&json!({"exclusiveStartKey": null}));
        assert_eq!(key, QueryKey::new("tables"));
    }

    #[test]
    fn test_family_membership_is_prefix() {
        let family = QueryKey::new("log-events").segment("/aws/lambda/f");
        let key = QueryKey::new("log-events")
            .segment("/aws/lambda/f")
            .options(&json!({"startFromHead": false}));
        let other = QueryKey::new("log-events").segment("/aws/lambda/g");

        assert!(key.starts_with(&family));
        assert!(key.starts_with(&QueryKey::new("log-events")));
        assert!(!other.starts_with(&family));
        assert!(!family.starts_with(&key));
    }

    #[test]
    fn test_identifier_is_not_split() {
        let key = QueryKey::new("log-streams").segment("/a/b");
        assert_eq!(key.segments().len(), 2);
        assert!(!QueryKey::new("log-streams").segment("/a").segment("b").eq(&key));
    }
}
