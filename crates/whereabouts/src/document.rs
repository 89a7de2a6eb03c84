//! Condition documents and the merge rule.
//!
//! A [`ConditionDocument`] maps field names to predicate specifications.
//! Documents are built by folding predicates left to right; when two
//! predicates target the same field, the later one replaces the earlier.
//! The same rule applies to nested documents at every depth.

use std::collections::btree_map::{self, BTreeMap};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::predicate::{FieldPredicate, PredicateSpec};

/// Declarative condition document handed to a lookup consumer.
///
/// # Example
///
/// ```
/// use whereabouts::{ConditionDocument, FieldPredicate};
///
/// let doc = ConditionDocument::merge([
///     Some(FieldPredicate::equals("id", 1i64)),
///     None,
///     Some(FieldPredicate::contains("first_name", "vini")),
/// ]);
///
/// assert_eq!(doc.len(), 2);
/// assert!(doc.contains_field("id"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionDocument {
    fields: BTreeMap<String, PredicateSpec>,
}

impl ConditionDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        ConditionDocument::default()
    }

    /// Folds optional predicates into one document.
    ///
    /// Absent entries are discarded. On a field-name collision the later
    /// predicate overwrites the earlier one; the two are never combined.
    pub fn merge<I>(predicates: I) -> Self
    where
        I: IntoIterator<Item = Option<FieldPredicate>>,
    {
        predicates.into_iter().flatten().collect()
    }

    /// Inserts a predicate, returning the specification it replaced.
    pub fn insert(&mut self, predicate: FieldPredicate) -> Option<PredicateSpec> {
        let (field, spec) = predicate.into_parts();
        let kind = spec.kind();
        let replaced = self.fields.insert(field.clone(), spec);
        if let Some(previous) = &replaced {
            tracing::debug!(
                field = %field,
                previous = previous.kind(),
                current = kind,
                "later predicate overwrote earlier one"
            );
        }
        replaced
    }

    /// Merges every entry of `other` into this document.
    ///
    /// Entries of `other` win on collision. Nested values are replaced
    /// wholesale, not merged.
    pub fn extend_from(&mut self, other: ConditionDocument) {
        self.extend(other);
    }

    /// Returns the specification for a field.
    pub fn get(&self, field: &str) -> Option<&PredicateSpec> {
        self.fields.get(field)
    }

    /// Returns `true` if the document has a predicate for `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(field, spec)` pairs in field order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PredicateSpec> {
        self.fields.iter()
    }

    /// Number of fields in the document.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the document has no predicates.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts the document to a JSON value.
    ///
    /// Builds the value directly, so it cannot fail. Non-finite numbers
    /// become `null`, as serde_json does for them.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(field, spec)| (field.clone(), spec.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl FromIterator<FieldPredicate> for ConditionDocument {
    fn from_iter<I: IntoIterator<Item = FieldPredicate>>(iter: I) -> Self {
        let mut doc = ConditionDocument::new();
        doc.extend(iter);
        doc
    }
}

impl Extend<FieldPredicate> for ConditionDocument {
    fn extend<I: IntoIterator<Item = FieldPredicate>>(&mut self, iter: I) {
        for predicate in iter {
            self.insert(predicate);
        }
    }
}

impl IntoIterator for ConditionDocument {
    type Item = FieldPredicate;
    type IntoIter = std::iter::Map<
        btree_map::IntoIter<String, PredicateSpec>,
        fn((String, PredicateSpec)) -> FieldPredicate,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.fields
            .into_iter()
            .map(into_predicate as fn((String, PredicateSpec)) -> FieldPredicate)
    }
}

fn into_predicate((field, spec): (String, PredicateSpec)) -> FieldPredicate {
    FieldPredicate { field, spec }
}

impl<'a> IntoIterator for &'a ConditionDocument {
    type Item = (&'a String, &'a PredicateSpec);
    type IntoIter = btree_map::Iter<'a, String, PredicateSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Serialize for ConditionDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, spec) in &self.fields {
            map.serialize_entry(field, spec)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Zone;
    use serde_json::json;

    #[test]
    fn merge_discards_absent() {
        let doc = ConditionDocument::merge([None, Some(FieldPredicate::equals("id", 1i64)), None]);
        assert_eq!(doc.fields().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let doc = ConditionDocument::merge(Vec::<Option<FieldPredicate>>::new());
        assert!(doc.is_empty());
        assert_eq!(doc.to_json(), json!({}));
    }

    #[test]
    fn later_predicate_wins() {
        let doc = ConditionDocument::merge([
            Some(FieldPredicate::equals("name", "first")),
            Some(FieldPredicate::contains("name", "second")),
        ]);
        assert_eq!(doc.len(), 1);
        assert_eq!(
            doc.get("name"),
            Some(&PredicateSpec::Contains("second".to_string()))
        );
    }

    #[test]
    fn collision_is_shallow() {
        let first = FieldPredicate::nested(
            "likes",
            [Some(FieldPredicate::equals("music", "classic"))],
        );
        let second = FieldPredicate::nested(
            "likes",
            [Some(FieldPredicate::contains("movies", "t"))],
        );
        let doc = ConditionDocument::merge([Some(first), Some(second)]);
        assert_eq!(
            doc.to_json(),
            json!({"likes": {"movies": {"contains": "t"}}})
        );
    }

    #[test]
    fn insert_returns_replaced_spec() {
        let mut doc = ConditionDocument::new();
        assert_eq!(doc.insert(FieldPredicate::equals("id", 1i64)), None);
        let replaced = doc.insert(FieldPredicate::equals("id", 2i64));
        assert_eq!(replaced, Some(PredicateSpec::Equals(1i64.into())));
        assert_eq!(doc.to_json(), json!({"id": {"equals": 2}}));
    }

    #[test]
    fn extend_from_overwrites() {
        let mut base = ConditionDocument::merge([
            Some(FieldPredicate::equals("id", 1i64)),
            Some(FieldPredicate::contains("first_name", "a")),
        ]);
        let other = ConditionDocument::merge([Some(FieldPredicate::contains("first_name", "b"))]);
        base.extend_from(other);
        assert_eq!(
            base.to_json(),
            json!({"id": {"equals": 1}, "first_name": {"contains": "b"}})
        );
    }

    #[test]
    fn serialize_matches_to_json() {
        let instant = "2024-01-15T10:00:00Z".parse().unwrap();
        let doc = ConditionDocument::merge([
            Some(FieldPredicate::equals("id", 1i64)),
            Some(FieldPredicate::range("createdAt", Zone::Utc.day_range(instant))),
            Some(FieldPredicate::nested(
                "likes",
                [Some(FieldPredicate::equals("music", "classic"))],
            )),
        ]);
        assert_eq!(serde_json::to_value(&doc).unwrap(), doc.to_json());
    }

    #[test]
    fn to_json_maps_non_finite_to_null() {
        let doc = ConditionDocument::merge([
            Some(FieldPredicate::equals("ratio", f64::NAN)),
            Some(FieldPredicate::nested(
                "stats",
                [Some(FieldPredicate::equals("max", f64::INFINITY))],
            )),
        ]);
        let expected = json!({"ratio": {"equals": null}, "stats": {"max": {"equals": null}}});
        assert_eq!(doc.to_json(), expected);
        assert_eq!(serde_json::to_value(&doc).unwrap(), expected);
    }

    #[test]
    fn into_iter_yields_predicates() {
        let doc = ConditionDocument::merge([
            Some(FieldPredicate::contains("b", "2")),
            Some(FieldPredicate::contains("a", "1")),
        ]);
        let fields: Vec<String> = doc.into_iter().map(|p| p.field).collect();
        assert_eq!(fields, vec!["a".to_string(), "b".to_string()]);
    }
}
