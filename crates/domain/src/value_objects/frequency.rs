//! How often an action may be used.
//!
//! Wire format:
//! - `"at will"`
//! - `"N/fight"`, `"N/day"`
//! - `{ "reset": "sr" | "lr", "uses": N }`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TemplateError;

/// Rest that restores a recharging resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestType {
    /// Restored on a short rest
    #[serde(rename = "sr")]
    ShortRest,
    /// Restored on a long rest
    #[serde(rename = "lr")]
    LongRest,
}

/// Resource rule for an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FrequencyRepr", into = "FrequencyRepr")]
pub enum Frequency {
    /// Unlimited use
    #[default]
    AtWill,
    /// A flat number of uses per encounter
    PerFight(u32),
    /// A flat number of uses per day
    PerDay(u32),
    /// A pool of uses restored by a rest
    Recharge { reset: RestType, uses: u32 },
}

impl Frequency {
    pub fn once_per_fight() -> Self {
        Self::PerFight(1)
    }

    pub fn once_per_day() -> Self {
        Self::PerDay(1)
    }

    pub fn long_rest(uses: u32) -> Self {
        Self::Recharge {
            reset: RestType::LongRest,
            uses,
        }
    }

    pub fn short_rest(uses: u32) -> Self {
        Self::Recharge {
            reset: RestType::ShortRest,
            uses,
        }
    }

    pub fn is_at_will(&self) -> bool {
        matches!(self, Self::AtWill)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtWill => write!(f, "at will"),
            Self::PerFight(uses) => write!(f, "{}/fight", uses),
            Self::PerDay(uses) => write!(f, "{}/day", uses),
            Self::Recharge { reset, uses } => {
                let rest = match reset {
                    RestType::ShortRest => "short rest",
                    RestType::LongRest => "long rest",
                };
                write!(f, "{} per {}", uses, rest)
            }
        }
    }
}

impl FromStr for Frequency {
    type Err = TemplateError;

    /// Parses the string forms only (`at will`, `N/fight`, `N/day`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "at will" {
            return Ok(Self::AtWill);
        }
        let invalid = || TemplateError::parse(format!("Unknown frequency: {}", s));
        let (count, period) = s.split_once('/').ok_or_else(invalid)?;
        let count: u32 = count.parse().map_err(|_| invalid())?;
        match period {
            "fight" => Ok(Self::PerFight(count)),
            "day" => Ok(Self::PerDay(count)),
            _ => Err(invalid()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FrequencyRepr {
    Text(String),
    Recharge { reset: RestType, uses: u32 },
}

impl TryFrom<FrequencyRepr> for Frequency {
    type Error = TemplateError;

    fn try_from(repr: FrequencyRepr) -> Result<Self, Self::Error> {
        match repr {
            FrequencyRepr::Text(text) => text.parse(),
            FrequencyRepr::Recharge { reset, uses } => Ok(Self::Recharge { reset, uses }),
        }
    }
}

impl From<Frequency> for FrequencyRepr {
    fn from(freq: Frequency) -> Self {
        match freq {
            Frequency::Recharge { reset, uses } => FrequencyRepr::Recharge { reset, uses },
            other => FrequencyRepr::Text(other.to_string()),
        }
    }
}
