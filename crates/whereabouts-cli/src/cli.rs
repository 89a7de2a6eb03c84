//! Command-line arguments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use whereabouts::{parse_instant, NestedPolicy, Presence, UserFilters, Zone};

use crate::output::OutputFormat;
use crate::settings::Overrides;

const ENV_INPUT: &str = "WHEREABOUTS_INPUT";
const ENV_CONFIG: &str = "WHEREABOUTS_CONFIG";
const ENV_PRESENCE: &str = "WHEREABOUTS_PRESENCE";
const ENV_NESTED: &str = "WHEREABOUTS_NESTED";
const ENV_ZONE: &str = "WHEREABOUTS_ZONE";
const ENV_FORMAT: &str = "WHEREABOUTS_FORMAT";

/// Assemble a user search condition document and print it.
#[derive(Debug, Parser)]
#[command(name = "user-search", version, about)]
pub struct Cli {
    /// JSON file holding a complete filter record; flags override its fields
    #[arg(long, env = ENV_INPUT)]
    pub input: Option<PathBuf>,

    /// Exact user id
    #[arg(long, allow_negative_numbers = true)]
    pub id: Option<i64>,

    /// Substring of the first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Substring of the last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Creation day (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long, value_parser = parse_created_at)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update day (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_updated_at)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Exact favourite music
    #[arg(long)]
    pub music: Option<String>,

    /// Substring of favourite movies
    #[arg(long)]
    pub movies: Option<String>,

    /// YAML file with assembler configuration
    #[arg(long, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Which supplied values count as present
    #[arg(long, value_enum, env = ENV_PRESENCE)]
    pub presence: Option<PresenceArg>,

    /// What to do with nested predicates that have no children
    #[arg(long, value_enum, env = ENV_NESTED)]
    pub nested: Option<NestedArg>,

    /// Zone for day boundaries: local, utc or an offset like +05:30
    #[arg(long, value_parser = parse_zone, allow_hyphen_values = true, env = ENV_ZONE)]
    pub zone: Option<Zone>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, env = ENV_FORMAT)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresenceArg {
    /// Empty strings and zero are absent
    Truthy,
    /// Every supplied value is present
    Defined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NestedArg {
    /// Keep empty nested keys
    Always,
    /// Drop empty nested keys
    OmitEmpty,
}

impl From<PresenceArg> for Presence {
    fn from(arg: PresenceArg) -> Self {
        match arg {
            PresenceArg::Truthy => Presence::Truthy,
            PresenceArg::Defined => Presence::Defined,
        }
    }
}

impl From<NestedArg> for NestedPolicy {
    fn from(arg: NestedArg) -> Self {
        match arg {
            NestedArg::Always => NestedPolicy::Always,
            NestedArg::OmitEmpty => NestedPolicy::OmitEmpty,
        }
    }
}

fn parse_created_at(value: &str) -> whereabouts::Result<DateTime<Utc>> {
    parse_instant("created-at", value)
}

fn parse_updated_at(value: &str) -> whereabouts::Result<DateTime<Utc>> {
    parse_instant("updated-at", value)
}

fn parse_zone(value: &str) -> whereabouts::Result<Zone> {
    value.parse()
}

impl Cli {
    /// Configuration overrides given on the command line.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            presence: self.presence.map(Into::into),
            nested: self.nested.map(Into::into),
            zone: self.zone,
        }
    }

    /// Builds the filter record from `--input` and the individual flags.
    ///
    /// `now` is used when no creation day is given anywhere.
    pub fn filters(&self, now: DateTime<Utc>) -> Result<UserFilters> {
        let mut filters = match &self.input {
            Some(path) => read_filters(path)?,
            None => UserFilters::new(self.created_at.unwrap_or(now)),
        };

        if let Some(id) = self.id {
            filters.id = Some(id);
        }
        if let Some(first_name) = &self.first_name {
            filters.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            filters.last_name = Some(last_name.clone());
        }
        if let Some(created_at) = self.created_at {
            filters.created_at = created_at;
        }
        if let Some(updated_at) = self.updated_at {
            filters.updated_at = Some(updated_at);
        }
        if let Some(music) = &self.music {
            filters.likes.music = music.clone();
        }
        if let Some(movies) = &self.movies {
            filters.likes.movies = movies.clone();
        }
        Ok(filters)
    }
}

fn read_filters(path: &Path) -> Result<UserFilters> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read filter record {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid filter record {}", path.display()))
}
