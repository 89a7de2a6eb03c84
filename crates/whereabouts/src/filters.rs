//! The user search filter record.
//!
//! [`UserFilters`] is the typed input gathered by a transport layer. It maps
//! onto a condition document with a fixed set of rules:
//!
//! | Key | Predicate |
//! |-----|-----------|
//! | `id` | equals |
//! | `first_name` | contains |
//! | `last_name` | contains |
//! | `createdAt` | day range |
//! | `updatedAt` | day range |
//! | `likes.music` | equals (nested) |
//! | `likes.movies` | contains (nested) |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assembler::Assembler;
use crate::builder::ConditionBuilder;
use crate::document::ConditionDocument;

/// Field names used in the produced document.
pub mod fields {
    pub const ID: &str = "id";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const LIKES: &str = "likes";
    pub const MUSIC: &str = "music";
    pub const MOVIES: &str = "movies";
}

/// Filters for a user lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFilters {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: Likes,
}

/// Nested preference filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Likes {
    pub music: String,
    pub movies: String,
}

impl UserFilters {
    /// Creates filters matching users created on the day of `created_at`.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        UserFilters {
            id: None,
            first_name: String::new(),
            last_name: None,
            created_at,
            updated_at: None,
            likes: Likes::default(),
        }
    }

    /// Builds the condition document with the stateless assembler.
    pub fn conditions(&self, asm: &Assembler) -> ConditionDocument {
        asm.build([
            asm.equals(fields::ID, self.id),
            asm.contains(fields::FIRST_NAME, Some(&self.first_name)),
            asm.contains(fields::LAST_NAME, self.last_name.as_deref()),
            asm.date_range(fields::CREATED_AT, Some(self.created_at)),
            asm.date_range(fields::UPDATED_AT, self.updated_at),
            asm.nested(
                fields::LIKES,
                [
                    asm.equals(fields::MUSIC, Some(&self.likes.music)),
                    asm.contains(fields::MOVIES, Some(&self.likes.movies)),
                ],
            ),
        ])
    }

    /// Builds the condition document with the accumulating builder.
    ///
    /// Produces the same document as [`conditions`](Self::conditions).
    pub fn conditions_with_builder(&self, asm: &Assembler) -> ConditionDocument {
        let likes = ConditionBuilder::from_assembler(*asm)
            .with_equals(fields::MUSIC, Some(&self.likes.music))
            .with_contains(fields::MOVIES, Some(&self.likes.movies))
            .build();

        ConditionBuilder::from_assembler(*asm)
            .with_equals(fields::ID, self.id)
            .with_contains(fields::FIRST_NAME, Some(&self.first_name))
            .with_contains(fields::LAST_NAME, self.last_name.as_deref())
            .with_date(fields::CREATED_AT, Some(self.created_at))
            .with_date(fields::UPDATED_AT, self.updated_at)
            .with_nested(fields::LIKES, [likes])
            .build()
    }
}
