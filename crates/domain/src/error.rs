//! Unified error types for template construction
//!
//! Every failure a class builder can hit is fatal for that build: no partial
//! `Creature` is ever returned in place of an error.

use thiserror::Error;

use crate::value_objects::DiceParseError;

/// Unified error type for template operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A breakpoint table has no threshold at or below the queried level
    #[error("No breakpoint at or below level {level} (lowest threshold: {lowest:?})")]
    UnresolvableBreakpoint { level: u8, lowest: Option<u8> },

    /// Character level outside the supported 1-20 range
    #[error("Level {0} is outside the supported range 1-20")]
    LevelOutOfRange(u8),

    /// No builder is registered under this class token
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// The monster registry has no template with this name
    #[error("Monster template not found: {0}")]
    UnknownMonster(String),

    /// A creature failed its structural checks (AC, hp, actions)
    #[error("Invalid creature: {0}")]
    InvalidCreature(String),

    /// Unrecognized wire value (frequency, slot, ...)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Dice formula grammar violation
    #[error("Invalid dice formula: {0}")]
    Formula(String),
}

impl TemplateError {
    /// Create an unresolvable breakpoint error.
    pub fn unresolvable(level: u8, lowest: Option<u8>) -> Self {
        Self::UnresolvableBreakpoint { level, lowest }
    }

    /// Create an unknown class error
    pub fn unknown_class(token: impl Into<String>) -> Self {
        Self::UnknownClass(token.into())
    }

    /// Create an unknown monster error
    pub fn unknown_monster(name: impl Into<String>) -> Self {
        Self::UnknownMonster(name.into())
    }

    /// Creates an invalid creature error.
    ///
    /// Used by `Creature::new` when a critical field would be zero or empty:
    /// - armor class not positive
    /// - hit points not positive (or not finite)
    /// - no actions
    pub fn invalid_creature(msg: impl Into<String>) -> Self {
        Self::InvalidCreature(msg.into())
    }

    /// Creates a parse error for wire values that match no known variant.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<DiceParseError> for TemplateError {
    fn from(err: DiceParseError) -> Self {
        Self::Formula(err.to_string())
    }
}
