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

pub fn build(level: Level, _options: &ClassOptions) -> Result<Creature, TemplateError> {
    let cha = scale(level, &[(1, 4), (4, 5)])?;
    let pb = proficiency_bonus(level)?;

    let actions = Unlocks::new()
        .at(
            1,
            vec![Action::attack(
                "Fire Bolt",
                ActionSlot::Action,
                Attack::new(
                    spell_attack(pb, cha),
                    DiceFormula::dice(cantrip_dice(level)?, 10),
                ),
            )],
        )
        .at(
            3,
            vec![Action::buff(
                "Quickened Mirror Image",
                ActionSlot::BonusAction,
                Buff::new(BuffDuration::EntireEncounter).with_damage_taken_multiplier(0.25),
            )
            .with_freq(Frequency::long_rest(scale(
                level,
                &[(1, 1), (5, 2), (9, 3), (13, 4), (17, 5)],
            )?))
            .with_condition(ActivationCondition::IsAvailable)],
        )
        .at(
            5,
            vec![Action::attack(
                "Quickened Fireball",
                ActionSlot::BonusAction,
                Attack::new(spell_save_dc(pb, cha), DiceFormula::dice(8, 6)).half_on_save(),
            )
            .with_freq(Frequency::long_rest(scale(
                level,
                &[(1, 2), (5, 2), (6, 3), (9, 4), (12, 5), (15, 6), (18, 7)],
            )?))
            .with_condition(ActivationCondition::IsAvailable)
            .with_target_count(2)],
        )
        .collect(level);

    player("Sorcerer", level, 13 + DEX, pb, hit_points(level, 6, CON), actions)
}
