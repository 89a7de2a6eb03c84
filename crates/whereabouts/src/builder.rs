//! Accumulating condition builder.
//!
//! The [`ConditionBuilder`] provides a fluent API that collects predicates in
//! construction order and folds them into a [`ConditionDocument`] on
//! [`build`](ConditionBuilder::build). All predicate rules come from
//! [`Assembler`]; the builder only records the order.

use chrono::{DateTime, TimeZone};

use crate::assembler::Assembler;
use crate::config::AssemblerConfig;
use crate::document::ConditionDocument;
use crate::predicate::FieldPredicate;
use crate::value::Literal;

/// Fluent builder for one condition document.
///
/// `build` consumes the builder, so the accumulated predicates cannot leak
/// into a second document.
///
/// # Example
///
/// ```
/// use whereabouts::{AssemblerConfig, ConditionBuilder, Zone};
///
/// let config = AssemblerConfig::new().zone(Zone::Utc);
///
/// let likes = ConditionBuilder::with_config(config)
///     .with_equals("music", Some("classic"))
///     .with_contains("movies", Some("t"))
///     .build();
///
/// let conditions = ConditionBuilder::with_config(config)
///     .with_equals("id", Some(1i64))
///     .with_contains("first_name", Some("vinicius"))
///     .with_contains("last_name", None::<&str>)
///     .with_nested("likes", [likes])
///     .build();
///
/// assert_eq!(conditions.len(), 3);
/// assert!(!conditions.contains_field("last_name"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConditionBuilder {
    assembler: Assembler,
    predicates: Vec<FieldPredicate>,
}

impl ConditionBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        ConditionBuilder::default()
    }

    /// Creates a builder with the given configuration.
    pub fn with_config(config: AssemblerConfig) -> Self {
        Self::from_assembler(Assembler::new(config))
    }

    /// Creates a builder sharing an existing assembler's configuration.
    pub fn from_assembler(assembler: Assembler) -> Self {
        ConditionBuilder {
            assembler,
            predicates: Vec::new(),
        }
    }

    // ========================================================================
    // Predicate methods
    // ========================================================================

    /// Adds an exact-match predicate if the value is present.
    pub fn with_equals<V>(self, field: &str, value: Option<V>) -> Self
    where
        V: Into<Literal>,
    {
        let predicate = self.assembler.equals(field, value);
        self.with_predicate(predicate)
    }

    /// Adds a substring predicate if the value is present.
    pub fn with_contains<S>(self, field: &str, value: Option<S>) -> Self
    where
        S: AsRef<str>,
    {
        let predicate = self.assembler.contains(field, value);
        self.with_predicate(predicate)
    }

    /// Adds a calendar-day range predicate if the value is present.
    pub fn with_date<Tz>(self, field: &str, value: Option<DateTime<Tz>>) -> Self
    where
        Tz: TimeZone,
    {
        let predicate = self.assembler.date_range(field, value);
        self.with_predicate(predicate)
    }

    /// Adds a nested predicate whose inner document merges `documents`
    /// left to right.
    pub fn with_nested<I>(self, field: &str, documents: I) -> Self
    where
        I: IntoIterator<Item = ConditionDocument>,
    {
        let mut inner = ConditionDocument::new();
        for document in documents {
            inner.extend_from(document);
        }
        let predicate = self.assembler.nested_document(field, inner);
        self.with_predicate(predicate)
    }

    /// Adds a pre-built predicate; `None` is ignored.
    pub fn with_predicate(mut self, predicate: Option<FieldPredicate>) -> Self {
        self.predicates.extend(predicate);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Folds the recorded predicates into a document, last write wins.
    pub fn build(self) -> ConditionDocument {
        self.predicates.into_iter().collect()
    }
}
