//! Monster registry port and the built-in wild-shape templates.

use crate::entities::{Action, ActionSlot, Attack, Creature, CreatureMode, TargetRule};
use crate::error::TemplateError;
use crate::value_objects::{Buff, BuffDuration, DiceFormula, RiderEffect, Term};

/// Source of monster statblocks consumed by delegating class builders.
///
/// Implementations must hand out a fresh copy on every lookup; callers own
/// what they receive.
#[cfg_attr(test, mockall::automock)]
pub trait MonsterRegistry: Send + Sync {
    fn get_monster(&self, name: &str) -> Option<Creature>;
}

/// Look up a monster that a builder depends on; absence is fatal.
pub fn require_monster(
    registry: &dyn MonsterRegistry,
    name: &str,
) -> Result<Creature, TemplateError> {
    registry.get_monster(name).ok_or_else(|| {
        tracing::warn!(monster = name, "monster template missing from registry");
        TemplateError::unknown_monster(name)
    })
}

/// Statblocks shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMonsters;

impl BuiltinMonsters {
    pub const NAMES: [&'static str; 4] = [
        "Dire Wolf",
        "Giant Constrictor Snake",
        "Giant Scorpion",
        "Fire Elemental",
    ];

    pub fn new() -> Self {
        Self
    }
}

impl MonsterRegistry for BuiltinMonsters {
    fn get_monster(&self, name: &str) -> Option<Creature> {
        let built = match name {
            "Dire Wolf" => dire_wolf(),
            "Giant Constrictor Snake" => giant_constrictor_snake(),
            "Giant Scorpion" => giant_scorpion(),
            "Fire Elemental" => fire_elemental(),
            _ => return None,
        };
        match built {
            Ok(creature) => Some(creature),
            Err(e) => {
                tracing::error!(monster = name, error = %e, "built-in monster failed validation");
                None
            }
        }
    }
}

fn hit(to_hit: i32, dice: u32, sides: u32, bonus: i32) -> Attack {
    Attack::new(to_hit, DiceFormula::dice(dice, sides).term(Term::flat(bonus)))
}

fn dire_wolf() -> Result<Creature, TemplateError> {
    let bite = Action::attack(
        "Bite",
        ActionSlot::Action,
        hit(5, 2, 6, 3).with_rider(Some(RiderEffect::new(
            13,
            Buff::new(BuffDuration::OneRound).with_condition("Prone"),
        ))),
    );
    Creature::new("Dire Wolf", 14, 1, 37.0, CreatureMode::Monster, vec![bite])
}

fn giant_constrictor_snake() -> Result<Creature, TemplateError> {
    let actions = vec![
        Action::attack("Bite", ActionSlot::Action, hit(6, 2, 6, 4)),
        Action::attack(
            "Constrict",
            ActionSlot::Action,
            hit(6, 2, 8, 4).with_rider(Some(RiderEffect::new(
                16,
                Buff::new(BuffDuration::OneRound).with_condition("Restrained"),
            ))),
        ),
    ];
    Creature::new(
        "Giant Constrictor Snake",
        12,
        2,
        60.0,
        CreatureMode::Monster,
        actions,
    )
}

fn giant_scorpion() -> Result<Creature, TemplateError> {
    let actions = vec![
        Action::attack("Claws x2", ActionSlot::Action, hit(4, 1, 8, 2))
            .with_targets(2, TargetRule::EnemyWithLeastHp),
        Action::attack(
            "Sting",
            ActionSlot::Extra(1),
            Attack::new(
                4,
                DiceFormula::dice(1, 10)
                    .term(Term::flat(2))
                    .term(Term::dice(4, 10).tagged("Poison")),
            ),
        ),
    ];
    Creature::new("Giant Scorpion", 15, 1, 52.0, CreatureMode::Monster, actions)
}

fn fire_elemental() -> Result<Creature, TemplateError> {
    let touch = Action::attack("Touch x2", ActionSlot::Action, hit(6, 2, 6, 3))
        .with_targets(2, TargetRule::EnemyWithLeastHp);
    Creature::new("Fire Elemental", 13, 2, 102.0, CreatureMode::Monster, vec![touch])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_resolves() {
        let registry = BuiltinMonsters::new();
        for name in BuiltinMonsters::NAMES {
            let monster = registry.get_monster(name).unwrap();
            assert_eq!(monster.name(), name);
            assert_eq!(monster.mode(), CreatureMode::Monster);
            assert!(monster.actions().iter().all(Action::is_well_formed));
        }
    }

    #[test]
    fn lookups_return_fresh_copies() {
        let registry = BuiltinMonsters::new();
        let a = registry.get_monster("Dire Wolf").unwrap();
        let b = registry.get_monster("Dire Wolf").unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.actions()[0].id, b.actions()[0].id);
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(BuiltinMonsters::new().get_monster("Owlbear").is_none());
    }

    #[test]
    fn require_monster_fails_on_missing_template() {
        let mut registry = MockMonsterRegistry::new();
        registry.expect_get_monster().returning(|_| None);
        let err = require_monster(&registry, "Owlbear").unwrap_err();
        assert_eq!(err, TemplateError::unknown_monster("Owlbear"));
    }

    #[test]
    fn wild_shape_stats() {
        let registry = BuiltinMonsters::new();
        let wolf = registry.get_monster("Dire Wolf").unwrap();
        assert_eq!((wolf.ac(), wolf.hp()), (14, 37.0));
        let elemental = registry.get_monster("Fire Elemental").unwrap();
        assert_eq!((elemental.ac(), elemental.hp()), (13, 102.0));
    }
}
