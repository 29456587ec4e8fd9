use crate::entities::{Action, ActionSlot, ActivationCondition, Attack, Creature};
use crate::error::TemplateError;
use crate::templates::options::ClassOptions;
use crate::templates::progression::{
    cantrip_dice, hit_points, proficiency_bonus, spell_attack, spell_save_dc,
};
use crate::value_objects::{scale, Buff, BuffDuration, DiceFormula, Frequency, Level, Unlocks};

use super::player;

const CON: i32 = 2;
const DEX: i32 = 2;

/// Fire Bolt is dropped after level 11, once leveled spells outclass it.
pub fn build(level: Level, _options: &ClassOptions) -> Result<Creature, TemplateError> {
    let int = scale(level, &[(1, 4), (4, 5)])?;
    let pb = proficiency_bonus(level)?;
    let dc = spell_save_dc(pb, int);
    let leveled_slots = Frequency::long_rest(level.div_ceil(3));

    let mut level_one = Vec::new();
    if level.get() <= 11 {
        level_one.push(Action::attack(
            "Fire Bolt",
            ActionSlot::Action,
            Attack::new(
                spell_attack(pb, int),
                DiceFormula::dice(cantrip_dice(level)?, 10),
            ),
        ));
    }
    level_one.push(
        Action::buff(
            "Shield",
            ActionSlot::Reaction,
            Buff::new(BuffDuration::OneRound).with_ac(5),
        )
        .with_freq(Frequency::long_rest(level.div_ceil(2)))
        .with_condition(scale(
            level,
            &[
                (1, ActivationCondition::IsUnderHalfHp),
                (8, ActivationCondition::Default),
            ],
        )?),
    );

    let actions = Unlocks::new()
        .at(1, level_one)
        .at(
            5,
            vec![
                Action::attack(
                    "Fireball",
                    ActionSlot::Action,
                    Attack::new(dc, DiceFormula::dice(8, 6)).half_on_save(),
                )
                .with_freq(leveled_slots)
                .with_condition(ActivationCondition::IsAvailable)
                .with_target_count(2),
                Action::debuff(
                    "Hypnotic Pattern",
                    ActionSlot::Action,
                    dc,
                    Buff::new(BuffDuration::OneRound).with_condition("Incapacitated"),
                )
                .with_freq(leveled_slots)
                .with_condition(ActivationCondition::IsAvailable)
                .with_target_count(2),
            ],
        )
        .at(
            13,
            vec![Action::attack(
                "Draconic transformation",
                ActionSlot::BonusAction,
                Attack::new(dc, DiceFormula::dice(8, 6)).half_on_save(),
            )
            .with_target_count(2)],
        )
        .at(
            17,
            vec![Action::attack(
                "Meteor Swarm",
                ActionSlot::Action,
                Attack::new(dc, DiceFormula::dice(40, 6)).half_on_save(),
            )
            .with_freq(Frequency::once_per_day())
            .with_condition(ActivationCondition::IsAvailable)
            .with_target_count(3)],
        )
        .collect(level);

    player("Wizard", level, 13 + DEX, pb, hit_points(level, 6, CON), actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::classes::{action, lv, names};

    #[test]
    fn fire_bolt_leads_until_eleven() {
        let at_eleven = build(lv(11), &ClassOptions::default()).unwrap();
        assert_eq!(
            names(&at_eleven),
            vec!["Fire Bolt", "Shield", "Fireball", "Hypnotic Pattern"]
        );
        let at_twelve = build(lv(12), &ClassOptions::default()).unwrap();
        assert_eq!(names(&at_twelve), vec!["Shield", "Fireball", "Hypnotic Pattern"]);
    }

    #[test]
    fn shield_condition_relaxes_at_eight() {
        let at_seven = build(lv(7), &ClassOptions::default()).unwrap();
        assert_eq!(
            action(&at_seven, "Shield").condition,
            ActivationCondition::IsUnderHalfHp
        );
        let at_eight = build(lv(8), &ClassOptions::default()).unwrap();
        let shield = action(&at_eight, "Shield");
        assert_eq!(shield.condition, ActivationCondition::Default);
        assert_eq!(shield.freq, Frequency::long_rest(4));
    }

    #[test]
    fn capstone_spells() {
        let wizard = build(lv(17), &ClassOptions::default()).unwrap();
        let swarm = action(&wizard, "Meteor Swarm");
        assert_eq!(swarm.targets, 3);
        assert_eq!(swarm.freq, Frequency::once_per_day());
        assert_eq!(swarm.as_attack().unwrap().dpr, DiceFormula::dice(40, 6));
        assert_eq!(
            action(&wizard, "Draconic transformation").action_slot,
            ActionSlot::BonusAction
        );
        assert_eq!(action(&wizard, "Fireball").freq, Frequency::long_rest(6));
    }
}
