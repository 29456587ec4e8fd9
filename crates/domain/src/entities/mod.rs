//! Domain entities - Core objects with identity

mod action;
mod creature;

pub use action::{
    Action, ActionKind, ActionSlot, ActivationCondition, Attack, Heal, HealAmount, TargetRule,
};
pub use creature::{Creature, CreatureMode};
