//! The lookup consumer seam.
//!
//! This module provides the [`LookupConsumer`] trait which data-access layers
//! implement to receive finished condition documents.

use crate::document::ConditionDocument;
use crate::predicate::FieldPredicate;

/// Trait for components that execute a finished condition document.
///
/// The consumer receives exactly one merged document per lookup. Callers
/// holding several optional predicates use [`find_merged`](Self::find_merged),
/// which merges them first.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
/// use whereabouts::{ConditionDocument, FieldPredicate, LookupConsumer};
///
/// struct FieldCounter;
///
/// impl LookupConsumer for FieldCounter {
///     type Output = usize;
///     type Error = Infallible;
///
///     fn find(&self, conditions: ConditionDocument) -> Result<usize, Infallible> {
///         Ok(conditions.len())
///     }
/// }
///
/// let count = FieldCounter
///     .find_merged([
///         Some(FieldPredicate::equals("id", 1i64)),
///         Some(FieldPredicate::equals("id", 2i64)),
///         None,
///     ])
///     .unwrap();
/// assert_eq!(count, 1);
/// ```
pub trait LookupConsumer {
    /// What a lookup produces.
    type Output;

    /// The error type for lookups.
    type Error;

    /// Performs a lookup with one merged condition document.
    ///
    /// The document is moved into the consumer; the caller cannot alter it
    /// afterwards.
    fn find(&self, conditions: ConditionDocument) -> Result<Self::Output, Self::Error>;

    /// Merges optional predicates, last write wins, then performs a lookup.
    fn find_merged<I>(&self, predicates: I) -> Result<Self::Output, Self::Error>
    where
        I: IntoIterator<Item = Option<FieldPredicate>>,
        Self: Sized,
    {
        self.find(ConditionDocument::merge(predicates))
    }
}

impl<C: LookupConsumer + ?Sized> LookupConsumer for &C {
    type Output = C::Output;
    type Error = C::Error;

    fn find(&self, conditions: ConditionDocument) -> Result<Self::Output, Self::Error> {
        (**self).find(conditions)
    }
}
