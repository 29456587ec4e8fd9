//! Creature entity - a fully resolved combatant ready for simulation.
//!
//! # ADR-008 Tier 5: Validated Entity
//!
//! Fields are private and only reachable through [`Creature::new`], which
//! rejects creatures the simulator could not use (non-positive AC or HP, an
//! empty action list). Every build produces a new creature with a fresh
//! [`CreatureId`]; nothing is shared between builds.

use serde::{Deserialize, Serialize};

use crate::entities::Action;
use crate::error::TemplateError;
use crate::ids::CreatureId;

/// Which side of the encounter a creature fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureMode {
    Player,
    Ally,
    Monster,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CreatureRecord")]
pub struct Creature {
    id: CreatureId,
    name: String,
    #[serde(rename = "AC")]
    ac: i32,
    save_bonus: i32,
    hp: f64,
    count: u32,
    mode: CreatureMode,
    actions: Vec<Action>,
}

/// Wire shape of a creature before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatureRecord {
    id: CreatureId,
    name: String,
    #[serde(rename = "AC")]
    ac: i32,
    save_bonus: i32,
    hp: f64,
    count: u32,
    mode: CreatureMode,
    actions: Vec<Action>,
}

impl TryFrom<CreatureRecord> for Creature {
    type Error = TemplateError;

    fn try_from(record: CreatureRecord) -> Result<Self, Self::Error> {
        let creature = Creature::new(
            record.name,
            record.ac,
            record.save_bonus,
            record.hp,
            record.mode,
            record.actions,
        )?
        .with_count(record.count)?;
        Ok(Self {
            id: record.id,
            ..creature
        })
    }
}

impl Creature {
    /// Validate and assemble a creature with a fresh id and a count of one.
    pub fn new(
        name: impl Into<String>,
        ac: i32,
        save_bonus: i32,
        hp: f64,
        mode: CreatureMode,
        actions: Vec<Action>,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TemplateError::invalid_creature("name cannot be empty"));
        }
        if ac <= 0 {
            return Err(TemplateError::invalid_creature(format!(
                "{name}: AC must be positive, got {ac}"
            )));
        }
        if !hp.is_finite() || hp <= 0.0 {
            return Err(TemplateError::invalid_creature(format!(
                "{name}: hit points must be positive, got {hp}"
            )));
        }
        if actions.is_empty() {
            return Err(TemplateError::invalid_creature(format!(
                "{name}: at least one action is required"
            )));
        }

        Ok(Self {
            id: CreatureId::new(),
            name,
            ac,
            save_bonus,
            hp,
            count: 1,
            mode,
            actions,
        })
    }

    /// Number of identical copies in the encounter.
    pub fn with_count(self, count: u32) -> Result<Self, TemplateError> {
        if count == 0 {
            return Err(TemplateError::invalid_creature(format!(
                "{}: count must be at least 1",
                self.name
            )));
        }
        Ok(Self { count, ..self })
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ac(&self) -> i32 {
        self.ac
    }

    pub fn save_bonus(&self) -> i32 {
        self.save_bonus
    }

    pub fn hp(&self) -> f64 {
        self.hp
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn mode(&self) -> CreatureMode {
        self.mode
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Consume the creature, keeping only its actions.
    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}
