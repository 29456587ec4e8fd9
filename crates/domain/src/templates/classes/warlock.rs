use crate::entities::{Action, ActionSlot, ActivationCondition, Attack, Creature};
use crate::error::TemplateError;
use crate::templates::options::ClassOptions;
use crate::templates::progression::{
    cantrip_dice, hit_points, proficiency_bonus, spell_attack, spell_save_dc,
};
use crate::value_objects::{scale, Buff, BuffDuration, DiceFormula, Frequency, Level, Term, Unlocks};

use super::player;

const CON: i32 = 2;
const DEX: i32 = 2;

pub fn build(level: Level, _options: &ClassOptions) -> Result<Creature, TemplateError> {
    let cha = scale(level, &[(1, 4), (4, 5)])?;
    let pb = proficiency_bonus(level)?;

    // Agonizing Blast from level 2.
    let eldritch_blast = Action::attack(
        "Eldritch Blast + Hex",
        ActionSlot::Action,
        Attack::new(
            spell_attack(pb, cha),
            DiceFormula::dice(1, 10)
                .term(Term::dice(1, 6).tagged("HEX"))
                .term_if(level.get() > 1, Term::flat(cha).tagged("AB")),
        ),
    )
    .with_target_count(cantrip_dice(level)?);

    let hypnotic_pattern = Action::debuff(
        "Hypnotic Pattern",
        ActionSlot::Action,
        spell_save_dc(pb, cha),
        Buff::new(BuffDuration::OneRound).with_condition("Incapacitated"),
    )
    .with_freq(Frequency::short_rest(scale(
        level,
        &[(1, 1), (5, 2), (11, 3), (17, 4)],
    )?))
    .with_condition(ActivationCondition::NotUsedYet)
    .with_target_count(2);

    let actions = Unlocks::new()
        .at(1, vec![eldritch_blast])
        .at(5, vec![hypnotic_pattern])
        .collect(level);

    player("Warlock", level, 13 + DEX, pb, hit_points(level, 8, CON), actions)
}
