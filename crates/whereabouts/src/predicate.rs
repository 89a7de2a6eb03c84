//! Field predicates.
//!
//! A [`FieldPredicate`] is one field's match rule: the field name plus a
//! [`PredicateSpec`] describing how that field must match.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::document::ConditionDocument;
use crate::op::Op;
use crate::range::DayRange;
use crate::value::Literal;

/// A single field predicate.
///
/// # Example
///
/// ```
/// use whereabouts::{FieldPredicate, PredicateSpec};
///
/// let predicate = FieldPredicate::contains("first_name", "vini");
/// assert_eq!(predicate.field, "first_name");
/// assert!(matches!(predicate.spec, PredicateSpec::Contains(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPredicate {
    /// The field name the predicate applies to.
    pub field: String,
    /// How the field must match.
    pub spec: PredicateSpec,
}

impl FieldPredicate {
    /// Creates a predicate from its parts.
    pub fn new(field: impl Into<String>, spec: PredicateSpec) -> Self {
        FieldPredicate {
            field: field.into(),
            spec,
        }
    }

    /// Creates an exact-match predicate.
    pub fn equals(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(field, PredicateSpec::Equals(value.into()))
    }

    /// Creates a substring predicate.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, PredicateSpec::Contains(value.into()))
    }

    /// Creates a date-range predicate.
    pub fn range(field: impl Into<String>, range: DayRange) -> Self {
        Self::new(field, PredicateSpec::Range(range))
    }

    /// Creates a nested predicate from the merge of `subpredicates`.
    ///
    /// Absent sub-predicates are skipped. The result is produced even if
    /// every child is absent, with an empty inner document.
    pub fn nested<I>(field: impl Into<String>, subpredicates: I) -> Self
    where
        I: IntoIterator<Item = Option<FieldPredicate>>,
    {
        Self::new(
            field,
            PredicateSpec::Nested(ConditionDocument::merge(subpredicates)),
        )
    }

    /// Splits the predicate into its field name and specification.
    pub fn into_parts(self) -> (String, PredicateSpec) {
        (self.field, self.spec)
    }
}

/// How a field must match.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateSpec {
    /// Exact match against a string or number.
    Equals(Literal),
    /// Substring match.
    Contains(String),
    /// Calendar-day range, both bounds always present.
    Range(DayRange),
    /// A condition document over sub-fields.
    Nested(ConditionDocument),
}

impl PredicateSpec {
    /// Returns the name of the predicate kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PredicateSpec::Equals(_) => "equals",
            PredicateSpec::Contains(_) => "contains",
            PredicateSpec::Range(_) => "range",
            PredicateSpec::Nested(_) => "nested",
        }
    }

    /// Converts the specification to JSON, mirroring its `Serialize` impl.
    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            PredicateSpec::Equals(value) => single_entry(Op::Equals, value.to_json()),
            PredicateSpec::Contains(value) => single_entry(Op::Contains, value.as_str().into()),
            PredicateSpec::Range(range) => {
                let mut map = serde_json::Map::with_capacity(2);
                map.insert(Op::Gte.as_str().to_string(), range.gte_iso().into());
                map.insert(Op::Lt.as_str().to_string(), range.lt_iso().into());
                serde_json::Value::Object(map)
            }
            PredicateSpec::Nested(doc) => doc.to_json(),
        }
    }
}

fn single_entry(op: Op, value: serde_json::Value) -> serde_json::Value {
    let mut map = serde_json::Map::with_capacity(1);
    map.insert(op.as_str().to_string(), value);
    serde_json::Value::Object(map)
}

impl Serialize for PredicateSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PredicateSpec::Equals(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(Op::Equals.as_str(), value)?;
                map.end()
            }
            PredicateSpec::Contains(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(Op::Contains.as_str(), value)?;
                map.end()
            }
            PredicateSpec::Range(range) => range.serialize(serializer),
            PredicateSpec::Nested(doc) => doc.serialize(serializer),
        }
    }
}
