//! Class builders.
//!
//! Each module exposes `build(level, options) -> Result<Creature, TemplateError>`.
//! Builders are pure: every call allocates a new creature with fresh ids.

pub mod artificer;
pub mod barbarian;
pub mod bard;
pub mod cleric;
pub mod druid;
pub mod fighter;
pub mod monk;
pub mod paladin;
pub mod ranger;
pub mod rogue;
pub mod sorcerer;
pub mod warlock;
pub mod wizard;

use crate::entities::{Action, Creature, CreatureMode};
use crate::error::TemplateError;
use crate::templates::progression::display_name;
use crate::value_objects::Level;

/// Wrap computed stats into a player creature named `Lv{level} {class}`.
fn player(
    class: &str,
    level: Level,
    ac: i32,
    save_bonus: i32,
    hp: f64,
    actions: Vec<Action>,
) -> Result<Creature, TemplateError> {
    let creature = Creature::new(
        display_name(level, class),
        ac,
        save_bonus,
        hp,
        CreatureMode::Player,
        actions,
    )?;
    tracing::debug!(
        class,
        level = level.get(),
        actions = creature.actions().len(),
        "built player template"
    );
    Ok(creature)
}

#[cfg(test)]
fn lv(value: u8) -> Level {
    match Level::new(value) {
        Ok(level) => level,
        Err(e) => panic!("test level {value}: {e}"),
    }
}

#[cfg(test)]
fn names(creature: &Creature) -> Vec<&str> {
    creature.actions().iter().map(|a| a.name.as_str()).collect()
}

#[cfg(test)]
fn action<'a>(creature: &'a Creature, name: &str) -> &'a Action {
    match creature.actions().iter().find(|a| a.name == name) {
        Some(action) => action,
        None => panic!("no action named {name} in {:?}", names(creature)),
    }
}
