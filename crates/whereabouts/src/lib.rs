//! Whereabouts - typed assembler for declarative lookup conditions.
//!
//! Whereabouts turns optional, strongly-typed filter values into a
//! [`ConditionDocument`]: a mapping from field name to a predicate
//! specification that a data-access layer consumes. It never executes
//! a lookup itself.
//!
//! - Predicate kinds: equality, substring, calendar-day range, nested
//! - Absent values produce no predicate instead of an error
//! - Last-write-wins merge, identical at every nesting level
//! - Two construction styles over one set of rules
//!
//! # Quick Start
//!
//! ```rust
//! use whereabouts::{Assembler, AssemblerConfig, ConditionBuilder, Zone};
//!
//! let asm = Assembler::new(AssemblerConfig::new().zone(Zone::Utc));
//! let created = "2024-01-15T10:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap();
//!
//! // Stateless, one call per predicate
//! let doc = asm.build([
//!     asm.equals("id", Some(1i64)),
//!     asm.contains("first_name", Some("vinicius")),
//!     asm.date_range("createdAt", Some(created)),
//!     asm.nested("likes", [asm.equals("music", Some("classic"))]),
//! ]);
//!
//! // Accumulating builder, same rules
//! let likes = ConditionBuilder::from_assembler(asm)
//!     .with_equals("music", Some("classic"))
//!     .build();
//! let built = ConditionBuilder::from_assembler(asm)
//!     .with_equals("id", Some(1i64))
//!     .with_contains("first_name", Some("vinicius"))
//!     .with_date("createdAt", Some(created))
//!     .with_nested("likes", [likes])
//!     .build();
//!
//! assert_eq!(doc, built);
//! assert_eq!(
//!     doc.to_json()["createdAt"]["gte"],
//!     "2024-01-15T00:00:00.000Z"
//! );
//! ```
//!
//! # Document Shape
//!
//! ```text
//! {
//!   "id":         { "equals": 1 },
//!   "first_name": { "contains": "vinicius" },
//!   "createdAt":  { "gte": "2024-01-15T00:00:00.000Z", "lt": "2024-01-15T23:59:59.999Z" },
//!   "likes":      { "music": { "equals": "classic" } }
//! }
//! ```
//!
//! # Presence Rules
//!
//! | Policy | Absent |
//! |--------|--------|
//! | `Presence::Truthy` (default) | `None`, `""`, `0`, `NaN` |
//! | `Presence::Defined` | `None` |
//!
//! Nested predicates are emitted even when all their children are absent,
//! unless [`NestedPolicy::OmitEmpty`] is configured.

mod assembler;
mod builder;
mod config;
mod consumer;
mod document;
mod error;
pub mod filters;
mod op;
mod predicate;
mod range;
mod value;

// Re-export public API
pub use assembler::Assembler;
pub use builder::ConditionBuilder;
pub use config::{AssemblerConfig, NestedPolicy, Presence};
pub use consumer::LookupConsumer;
pub use document::ConditionDocument;
pub use error::{ConditionError, Result};
pub use filters::{Likes, UserFilters};
pub use op::Op;
pub use predicate::{FieldPredicate, PredicateSpec};
pub use range::{format_instant, parse_instant, DayRange, Zone};
pub use value::{Literal, Number};
