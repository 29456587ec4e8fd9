//! Character levels and level-indexed breakpoint tables.
//!
//! Two resolution strategies share the same threshold semantics:
//!
//! - [`LevelScale`] / [`scale`]: "latest wins". The value of the highest
//!   threshold not exceeding the level.
//! - [`Unlocks`]: cumulative. Every list whose threshold is at or below the
//!   level, concatenated in ascending threshold order.
//!
//! Thresholds are always compared numerically; entry order in the source
//! table never matters. A query with no threshold at or below the level is
//! an error, never a default.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TemplateError;

/// A character level in `1..=20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    /// Validate a raw level.
    pub fn new(value: u8) -> Result<Self, TemplateError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TemplateError::LevelOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every supported level, ascending.
    pub fn all() -> impl Iterator<Item = Level> {
        (Self::MIN..=Self::MAX).map(Level)
    }

    /// `ceil(level / divisor)`, the rounding several spell tables use.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is 0.
    pub fn div_ceil(self, divisor: u8) -> u32 {
        u32::from(self.0).div_ceil(u32::from(divisor))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = TemplateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// Resolve a single-value breakpoint table given as `(threshold, value)`
/// pairs, in any order.
///
/// If two pairs share a threshold the later one wins.
pub fn scale<T: Clone>(level: Level, table: &[(u8, T)]) -> Result<T, TemplateError> {
    LevelScale::new(table.iter().map(|(threshold, value)| (*threshold, value)))
        .resolve(level)
        .map(|value| (*value).clone())
}

/// A breakpoint table stored as an explicitly ascending list.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelScale<T> {
    entries: Vec<(u8, T)>,
}

impl<T> LevelScale<T> {
    /// Build from pairs in any order. Sorting is stable, so among equal
    /// thresholds the last pair supplied wins on resolution.
    pub fn new(entries: impl IntoIterator<Item = (u8, T)>) -> Self {
        let mut entries: Vec<(u8, T)> = entries.into_iter().collect();
        entries.sort_by_key(|(threshold, _)| *threshold);
        Self { entries }
    }

    /// Value of the greatest threshold `<= level`.
    pub fn resolve(&self, level: Level) -> Result<&T, TemplateError> {
        self.entries
            .iter()
            .rev()
            .find(|(threshold, _)| *threshold <= level.get())
            .map(|(_, value)| value)
            .ok_or_else(|| {
                let lowest = self.lowest_threshold();
                tracing::warn!(
                    level = level.get(),
                    ?lowest,
                    "breakpoint table has no threshold at or below level"
                );
                TemplateError::unresolvable(level.get(), lowest)
            })
    }

    pub fn lowest_threshold(&self) -> Option<u8> {
        self.entries.first().map(|(threshold, _)| *threshold)
    }

    /// Entries in ascending threshold order.
    pub fn entries(&self) -> &[(u8, T)] {
        &self.entries
    }
}

/// Cumulative unlock table: item lists gated by minimum level, plus an
/// optional ceiling table whose lists stay present only while
/// `level <= threshold`.
///
/// Items are moved out on [`Unlocks::collect`], so each table is built
/// fresh per query.
#[derive(Debug, Clone)]
pub struct Unlocks<T> {
    floor: Vec<(u8, Vec<T>)>,
    ceiling: Vec<(u8, Vec<T>)>,
}

impl<T> Default for Unlocks<T> {
    fn default() -> Self {
        Self {
            floor: Vec::new(),
            ceiling: Vec::new(),
        }
    }
}

impl<T> Unlocks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items available from `threshold` onwards.
    pub fn at(mut self, threshold: u8, items: Vec<T>) -> Self {
        self.floor.push((threshold, items));
        self
    }

    /// Items available up to and including `threshold`.
    pub fn until(mut self, threshold: u8, items: Vec<T>) -> Self {
        self.ceiling.push((threshold, items));
        self
    }

    /// Floor items for every threshold `<= level`, then ceiling items for
    /// every threshold `>= level`, each group in ascending threshold order.
    pub fn collect(self, level: Level) -> Vec<T> {
        let Self {
            mut floor,
            mut ceiling,
        } = self;
        floor.sort_by_key(|(threshold, _)| *threshold);
        ceiling.sort_by_key(|(threshold, _)| *threshold);

        floor
            .into_iter()
            .filter(|(threshold, _)| *threshold <= level.get())
            .chain(
                ceiling
                    .into_iter()
                    .filter(|(threshold, _)| *threshold >= level.get()),
            )
            .flat_map(|(_, items)| items)
            .collect()
    }
}
