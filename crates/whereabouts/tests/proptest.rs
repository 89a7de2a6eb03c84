//! Property-based tests for whereabouts using proptest.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use proptest::prelude::*;
use whereabouts::{
    Assembler, AssemblerConfig, ConditionBuilder, ConditionDocument, FieldPredicate, Presence,
    Zone,
};

// ============================================================================
// Test helpers
// ============================================================================

fn utc() -> Assembler {
    Assembler::new(AssemblerConfig::new().zone(Zone::Utc))
}

// 1970-01-01 .. 2200-01-01, in milliseconds
fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..7_258_118_400_000).prop_map(|ms| DateTime::from_timestamp_millis(ms).unwrap())
}

fn offset_strategy() -> impl Strategy<Value = Zone> {
    (-14i32 * 60..=14 * 60).prop_map(|minutes| {
        Zone::Fixed(FixedOffset::east_opt(minutes * 60).unwrap())
    })
}

#[derive(Debug, Clone)]
enum Input {
    Equals(String, i64),
    Contains(String, String),
    Date(String, DateTime<Utc>),
}

fn input_strategy() -> impl Strategy<Value = Input> {
    let field = "[a-c]";
    prop_oneof![
        (field, -3i64..3).prop_map(|(f, v)| Input::Equals(f, v)),
        (field, "[a-z]{0,3}").prop_map(|(f, v)| Input::Contains(f, v)),
        (field, instant_strategy()).prop_map(|(f, v)| Input::Date(f, v)),
    ]
}

fn assemble(asm: &Assembler, input: &Input) -> Option<FieldPredicate> {
    match input {
        Input::Equals(f, v) => asm.equals(f, Some(*v)),
        Input::Contains(f, v) => asm.contains(f, Some(v)),
        Input::Date(f, v) => asm.date_range(f, Some(*v)),
    }
}

fn record(builder: ConditionBuilder, input: &Input) -> ConditionBuilder {
    match input {
        Input::Equals(f, v) => builder.with_equals(f, Some(*v)),
        Input::Contains(f, v) => builder.with_contains(f, Some(v)),
        Input::Date(f, v) => builder.with_date(f, Some(*v)),
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Any two instants of the same UTC day produce the same bounds.
    #[test]
    fn day_range_is_idempotent_within_a_day(
        base in instant_strategy(),
        shift in 0i64..86_400_000,
    ) {
        let range = Zone::Utc.day_range(base);
        let start = range.gte;
        let other = start + TimeDelta::milliseconds(shift);
        prop_assert_eq!(Zone::Utc.day_range(other), range);
    }

    /// Bounds contain the instant and span the day minus one millisecond.
    #[test]
    fn day_range_contains_instant(instant in instant_strategy(), zone in offset_strategy()) {
        let range = zone.day_range(instant);
        prop_assert!(range.gte <= instant);
        prop_assert!(instant <= range.lt);
        prop_assert_eq!(range.lt - range.gte, TimeDelta::milliseconds(86_399_999));
    }

    /// Rendered bounds are UTC with millisecond precision.
    #[test]
    fn day_range_renders_iso_utc(instant in instant_strategy(), zone in offset_strategy()) {
        let range = zone.day_range(instant);
        for rendered in [range.gte_iso(), range.lt_iso()] {
            prop_assert_eq!(rendered.len(), 24);
            prop_assert!(rendered.ends_with('Z'));
        }
        prop_assert!(range.lt_iso().ends_with(":59.999Z"));
    }

    /// The merged document holds one key per distinct present field, and
    /// each key maps to the last predicate supplied for it.
    #[test]
    fn merge_is_last_write_wins(inputs in prop::collection::vec(input_strategy(), 0..12)) {
        let asm = utc();
        let predicates: Vec<Option<FieldPredicate>> =
            inputs.iter().map(|input| assemble(&asm, input)).collect();
        let doc = asm.build(predicates.clone());

        let present: Vec<FieldPredicate> = predicates.into_iter().flatten().collect();
        for predicate in &present {
            let last = present.iter().rev().find(|p| p.field == predicate.field).unwrap();
            prop_assert_eq!(doc.get(&predicate.field), Some(&last.spec));
        }
        let mut fields: Vec<&str> = present.iter().map(|p| p.field.as_str()).collect();
        fields.sort_unstable();
        fields.dedup();
        prop_assert_eq!(doc.fields().collect::<Vec<_>>(), fields);
    }

    /// Builder and stateless assembler agree on every input sequence.
    #[test]
    fn builder_matches_assembler(inputs in prop::collection::vec(input_strategy(), 0..12)) {
        let asm = utc();
        let expected = asm.build(inputs.iter().map(|input| assemble(&asm, input)));
        let builder = inputs
            .iter()
            .fold(ConditionBuilder::from_assembler(asm), record);
        prop_assert_eq!(builder.build(), expected);
    }

    /// Truthy presence drops empty strings; defined presence keeps them.
    #[test]
    fn presence_rules_for_strings(value in "[a-z]{0,2}") {
        let truthy = utc();
        let defined = Assembler::new(AssemblerConfig::new().presence(Presence::Defined));
        prop_assert_eq!(truthy.contains("f", Some(&value)).is_some(), !value.is_empty());
        prop_assert!(defined.contains("f", Some(&value)).is_some());
    }

    /// Merging a document into an empty one reproduces it.
    #[test]
    fn extend_into_empty_is_identity(inputs in prop::collection::vec(input_strategy(), 0..8)) {
        let asm = utc();
        let doc = asm.build(inputs.iter().map(|input| assemble(&asm, input)));
        let mut target = ConditionDocument::new();
        target.extend_from(doc.clone());
        prop_assert_eq!(target, doc);
    }
}
