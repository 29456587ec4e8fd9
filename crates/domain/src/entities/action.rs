//! Action entity - one entry in a creature's action list.
//!
//! Every action shares an envelope (name, slot, frequency, activation
//! condition, targeting) and carries exactly one typed payload selected by
//! [`ActionKind`]. The payload is a sum type, so a heal can never carry
//! attack-only fields.
//!
//! Condition and targeting values are string contracts evaluated by the
//! downstream simulator; here they are closed enums that serialize to those
//! strings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::ActionId;
use crate::value_objects::{Buff, DiceFormula, Frequency, RiderEffect};

/// Action-economy category an action consumes each round.
///
/// `Extra(n)` slots are synthetic: they keep features that would otherwise
/// compete for the same category (two Action Surges, Divine Smite next to a
/// passive aura) apart from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionSlot {
    Action,
    BonusAction,
    Reaction,
    Passive,
    Extra(u8),
}

/// When the simulator should consider using an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationCondition {
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "is available")]
    IsAvailable,
    #[serde(rename = "is under half HP")]
    IsUnderHalfHp,
    #[serde(rename = "ally at 0 HP")]
    AllyAtZeroHp,
    #[serde(rename = "not used yet")]
    NotUsedYet,
    #[serde(rename = "has no THP")]
    HasNoTempHp,
}

/// Which creature(s) the simulator should pick as targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRule {
    #[serde(rename = "self")]
    SelfOnly,
    #[serde(rename = "enemy with least HP")]
    EnemyWithLeastHp,
    #[serde(rename = "enemy with highest DPR")]
    EnemyWithHighestDpr,
    #[serde(rename = "ally with the least HP")]
    AllyWithLeastHp,
    #[serde(rename = "ally with the most HP")]
    AllyWithMostHp,
    #[serde(rename = "ally with the highest DPR")]
    AllyWithHighestDpr,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// Attack payload.
///
/// For save-based attacks `to_hit` holds the save DC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    pub to_hit: DiceFormula,
    pub dpr: DiceFormula,
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_saves: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub half_on_save: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rider_effect: Option<RiderEffect>,
}

impl Attack {
    pub fn new(to_hit: impl Into<DiceFormula>, dpr: impl Into<DiceFormula>) -> Self {
        Self {
            to_hit: to_hit.into(),
            dpr: dpr.into(),
            use_saves: false,
            half_on_save: false,
            rider_effect: None,
        }
    }

    /// Resolve with a saving throw against `to_hit` instead of an attack roll.
    pub fn save_based(self) -> Self {
        Self {
            use_saves: true,
            ..self
        }
    }

    /// Save-based, dealing half damage on a successful save.
    pub fn half_on_save(self) -> Self {
        Self {
            use_saves: true,
            half_on_save: true,
            ..self
        }
    }

    pub fn with_rider(self, rider_effect: Option<RiderEffect>) -> Self {
        Self {
            rider_effect,
            ..self
        }
    }
}

/// How much a heal restores.
///
/// Class features roll a formula; borrowed statblocks pass their hit points
/// through exactly, fractions included. On the wire a formula is a string
/// and an exact amount is a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HealAmount {
    Formula(DiceFormula),
    Exact(f64),
}

impl HealAmount {
    /// Exact amounts must be finite and positive.
    pub fn is_valid(&self) -> bool {
        match self {
            HealAmount::Formula(_) => true,
            HealAmount::Exact(value) => value.is_finite() && *value > 0.0,
        }
    }

    pub fn as_formula(&self) -> Option<&DiceFormula> {
        match self {
            HealAmount::Formula(formula) => Some(formula),
            HealAmount::Exact(_) => None,
        }
    }
}

impl fmt::Display for HealAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealAmount::Formula(formula) => write!(f, "{}", formula),
            HealAmount::Exact(value) => write!(f, "{}", value),
        }
    }
}

impl From<DiceFormula> for HealAmount {
    fn from(formula: DiceFormula) -> Self {
        HealAmount::Formula(formula)
    }
}

impl From<i32> for HealAmount {
    fn from(value: i32) -> Self {
        HealAmount::Formula(DiceFormula::flat(value))
    }
}

impl From<f64> for HealAmount {
    fn from(value: f64) -> Self {
        HealAmount::Exact(value)
    }
}

/// Healing payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heal {
    pub amount: HealAmount,
    #[serde(rename = "tempHP", default, skip_serializing_if = "is_false")]
    pub temp_hp: bool,
}

impl Heal {
    pub fn new(amount: impl Into<HealAmount>) -> Self {
        Self {
            amount: amount.into(),
            temp_hp: false,
        }
    }

    /// Grant temporary hit points instead of healing.
    pub fn temporary(amount: impl Into<HealAmount>) -> Self {
        Self {
            amount: amount.into(),
            temp_hp: true,
        }
    }
}

/// Typed payload, discriminated on the wire by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionKind {
    #[serde(rename = "atk")]
    Attack(Attack),
    #[serde(rename = "heal")]
    Heal(Heal),
    #[serde(rename = "buff")]
    Buff { buff: Buff },
    #[serde(rename = "debuff")]
    Debuff {
        #[serde(rename = "saveDC")]
        save_dc: i32,
        buff: Buff,
    },
}

impl ActionKind {
    /// Wire discriminator.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ActionKind::Attack(_) => "atk",
            ActionKind::Heal(_) => "heal",
            ActionKind::Buff { .. } => "buff",
            ActionKind::Debuff { .. } => "debuff",
        }
    }
}

/// One entry in a creature's action list.
///
/// # ADR-008 Tier 4: Simple Data Struct
///
/// Public fields; the payload enum is what keeps variants apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    pub name: String,
    pub action_slot: ActionSlot,
    pub freq: Frequency,
    pub condition: ActivationCondition,
    pub targets: u32,
    pub target: TargetRule,
    #[serde(flatten)]
    pub kind: ActionKind,
}

impl Action {
    /// New action with a fresh id, usable at will under the default
    /// condition against a single target.
    pub fn new(
        name: impl Into<String>,
        slot: ActionSlot,
        target: TargetRule,
        kind: ActionKind,
    ) -> Self {
        Self {
            id: ActionId::new(),
            name: name.into(),
            action_slot: slot,
            freq: Frequency::AtWill,
            condition: ActivationCondition::Default,
            targets: 1,
            target,
            kind,
        }
    }

    /// Attack aimed at the enemy with the least HP.
    pub fn attack(name: impl Into<String>, slot: ActionSlot, attack: Attack) -> Self {
        Self::new(name, slot, TargetRule::EnemyWithLeastHp, ActionKind::Attack(attack))
    }

    /// Heal aimed at the ally with the least HP.
    pub fn heal(name: impl Into<String>, slot: ActionSlot, heal: Heal) -> Self {
        Self::new(name, slot, TargetRule::AllyWithLeastHp, ActionKind::Heal(heal))
    }

    /// Buff on the acting creature itself.
    pub fn buff(name: impl Into<String>, slot: ActionSlot, buff: Buff) -> Self {
        Self::new(name, slot, TargetRule::SelfOnly, ActionKind::Buff { buff })
    }

    /// Debuff aimed at the enemy with the highest DPR.
    pub fn debuff(name: impl Into<String>, slot: ActionSlot, save_dc: i32, buff: Buff) -> Self {
        Self::new(
            name,
            slot,
            TargetRule::EnemyWithHighestDpr,
            ActionKind::Debuff { save_dc, buff },
        )
    }

    pub fn with_freq(self, freq: Frequency) -> Self {
        Self { freq, ..self }
    }

    pub fn with_condition(self, condition: ActivationCondition) -> Self {
        Self { condition, ..self }
    }

    pub fn with_targets(self, targets: u32, target: TargetRule) -> Self {
        Self {
            targets,
            target,
            ..self
        }
    }

    pub fn with_target_count(self, targets: u32) -> Self {
        Self { targets, ..self }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_slot(self, action_slot: ActionSlot) -> Self {
        Self {
            action_slot,
            ..self
        }
    }

    /// Same action under a new identifier.
    pub fn with_fresh_id(self) -> Self {
        Self {
            id: ActionId::new(),
            ..self
        }
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind.type_tag()
    }

    pub fn as_attack(&self) -> Option<&Attack> {
        match &self.kind {
            ActionKind::Attack(attack) => Some(attack),
            _ => None,
        }
    }

    pub fn as_heal(&self) -> Option<&Heal> {
        match &self.kind {
            ActionKind::Heal(heal) => Some(heal),
            _ => None,
        }
    }

    /// Buff descriptor of a buff or debuff.
    pub fn as_buff(&self) -> Option<&Buff> {
        match &self.kind {
            ActionKind::Buff { buff } | ActionKind::Debuff { buff, .. } => Some(buff),
            _ => None,
        }
    }

    /// Structural checks the simulator relies on.
    pub fn is_well_formed(&self) -> bool {
        if self.name.trim().is_empty() || self.targets == 0 {
            return false;
        }
        match &self.kind {
            ActionKind::Attack(attack) => attack
                .rider_effect
                .as_ref()
                .is_none_or(|rider| !rider.buff.is_empty()),
            ActionKind::Heal(heal) => heal.amount.is_valid(),
            ActionKind::Buff { buff } => !buff.is_empty(),
            ActionKind::Debuff { save_dc, buff } => *save_dc > 0 && !buff.is_empty(),
        }
    }
}
