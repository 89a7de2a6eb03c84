//! Stateless predicate assembly.
//!
//! The [`Assembler`] turns optional filter values into optional predicates.
//! Every method is pure: absent values yield `None`, present values yield a
//! predicate keyed by the given field. [`ConditionBuilder`](crate::ConditionBuilder)
//! delegates to these methods, so both construction styles share one set of
//! rules.

use chrono::{DateTime, TimeZone, Utc};

use crate::config::{AssemblerConfig, NestedPolicy};
use crate::document::ConditionDocument;
use crate::predicate::{FieldPredicate, PredicateSpec};
use crate::value::Literal;

/// Per-call predicate assembler.
///
/// # Example
///
/// ```
/// use whereabouts::{Assembler, AssemblerConfig, Zone};
///
/// let asm = Assembler::new(AssemblerConfig::new().zone(Zone::Utc));
/// let doc = asm.build([
///     asm.equals("id", Some(1i64)),
///     asm.contains("first_name", Some("vinicius")),
///     asm.contains("last_name", None::<&str>),
///     asm.nested("likes", [asm.equals("music", Some("classic"))]),
/// ]);
///
/// assert_eq!(doc.fields().collect::<Vec<_>>(), ["first_name", "id", "likes"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assembler {
    config: AssemblerConfig,
}

impl Assembler {
    /// Creates an assembler with the given configuration.
    pub fn new(config: AssemblerConfig) -> Self {
        Assembler { config }
    }

    /// Exact-match predicate, or `None` if the value is absent.
    pub fn equals<V>(&self, field: &str, value: Option<V>) -> Option<FieldPredicate>
    where
        V: Into<Literal>,
    {
        let value = value.map(Into::into);
        match value {
            Some(literal) if self.config.presence.admits(&literal) => {
                Some(FieldPredicate::equals(field, literal))
            }
            _ => omitted(field),
        }
    }

    /// Substring predicate, or `None` if the value is absent.
    pub fn contains<S>(&self, field: &str, value: Option<S>) -> Option<FieldPredicate>
    where
        S: AsRef<str>,
    {
        match value {
            Some(s) if self.config.presence.admits_str(s.as_ref()) => {
                Some(FieldPredicate::contains(field, s.as_ref()))
            }
            _ => omitted(field),
        }
    }

    /// Calendar-day range predicate, or `None` if the value is absent.
    ///
    /// The day is the one containing `value` in the configured zone.
    pub fn date_range<Tz>(&self, field: &str, value: Option<DateTime<Tz>>) -> Option<FieldPredicate>
    where
        Tz: TimeZone,
    {
        let Some(instant) = value else {
            return omitted(field);
        };
        let range = self.config.zone.day_range(instant.with_timezone(&Utc));
        Some(FieldPredicate::range(field, range))
    }

    /// Nested predicate over the merge of `subpredicates`.
    ///
    /// With [`NestedPolicy::Always`] this is `Some` even when every child is
    /// absent. With [`NestedPolicy::OmitEmpty`] an empty inner document
    /// yields `None`.
    pub fn nested<I>(&self, field: &str, subpredicates: I) -> Option<FieldPredicate>
    where
        I: IntoIterator<Item = Option<FieldPredicate>>,
    {
        self.wrap_nested(field, ConditionDocument::merge(subpredicates))
    }

    /// Nested predicate over an already-built inner document.
    pub fn nested_document(&self, field: &str, inner: ConditionDocument) -> Option<FieldPredicate> {
        self.wrap_nested(field, inner)
    }

    /// Merges optional predicates into one document, last write wins.
    pub fn build<I>(&self, predicates: I) -> ConditionDocument
    where
        I: IntoIterator<Item = Option<FieldPredicate>>,
    {
        ConditionDocument::merge(predicates)
    }

    fn wrap_nested(&self, field: &str, inner: ConditionDocument) -> Option<FieldPredicate> {
        if inner.is_empty() && self.config.nested == NestedPolicy::OmitEmpty {
            return omitted(field);
        }
        Some(FieldPredicate::new(field, PredicateSpec::Nested(inner)))
    }
}

fn omitted(field: &str) -> Option<FieldPredicate> {
    tracing::trace!(field, "filter value absent, predicate omitted");
    None
}
