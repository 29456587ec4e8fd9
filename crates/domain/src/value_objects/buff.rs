//! Buff descriptors and attack rider effects.

use serde::{Deserialize, Serialize};

use super::dice::DiceFormula;

/// How long a buff or debuff lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffDuration {
    #[serde(rename = "1 round")]
    OneRound,
    #[serde(rename = "entire encounter")]
    EntireEncounter,
    #[serde(rename = "until next attack made")]
    UntilNextAttackMade,
    #[serde(rename = "until next attack taken")]
    UntilNextAttackTaken,
}

/// Modifiers granted to (or imposed on) a target.
///
/// Every delta is optional; an unset field leaves that statistic untouched.
/// Deltas are formulas so that dice bonuses like Bless (`1d4`) and flat
/// bonuses like Shield (`5`) share one representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buff {
    pub duration: BuffDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac: Option<DiceFormula>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_hit: Option<DiceFormula>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save: Option<DiceFormula>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<DiceFormula>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_taken_multiplier: Option<f64>,
    /// Free-text condition, e.g. "Incapacitated"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Buff {
    /// A buff with no modifiers yet.
    pub fn new(duration: BuffDuration) -> Self {
        Self {
            duration,
            ac: None,
            to_hit: None,
            save: None,
            damage: None,
            damage_taken_multiplier: None,
            condition: None,
        }
    }

    pub fn with_ac(self, ac: impl Into<DiceFormula>) -> Self {
        Self {
            ac: Some(ac.into()),
            ..self
        }
    }

    pub fn with_to_hit(self, to_hit: impl Into<DiceFormula>) -> Self {
        Self {
            to_hit: Some(to_hit.into()),
            ..self
        }
    }

    pub fn with_save(self, save: impl Into<DiceFormula>) -> Self {
        Self {
            save: Some(save.into()),
            ..self
        }
    }

    pub fn with_damage(self, damage: impl Into<DiceFormula>) -> Self {
        Self {
            damage: Some(damage.into()),
            ..self
        }
    }

    pub fn with_damage_taken_multiplier(self, multiplier: f64) -> Self {
        Self {
            damage_taken_multiplier: Some(multiplier),
            ..self
        }
    }

    pub fn with_condition(self, condition: impl Into<String>) -> Self {
        Self {
            condition: Some(condition.into()),
            ..self
        }
    }

    /// True when the buff changes nothing.
    pub fn is_empty(&self) -> bool {
        self.ac.is_none()
            && self.to_hit.is_none()
            && self.save.is_none()
            && self.damage.is_none()
            && self.damage_taken_multiplier.is_none()
            && self.condition.is_none()
    }
}

/// Secondary effect of an attack, resolved separately against its own DC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderEffect {
    pub dc: i32,
    pub buff: Buff,
}

impl RiderEffect {
    pub fn new(dc: i32, buff: Buff) -> Self {
        Self { dc, buff }
    }
}
