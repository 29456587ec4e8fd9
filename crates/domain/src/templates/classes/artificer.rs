use crate::entities::{Action, ActionSlot, ActivationCondition, Attack, Creature, Heal, TargetRule};
use crate::error::TemplateError;
use crate::templates::options::ClassOptions;
use crate::templates::progression::{
    cantrip_dice, hit_points, proficiency_bonus, spell_attack, spell_uses,
};
use crate::value_objects::{scale, Buff, BuffDuration, DiceFormula, Frequency, Level, Term, Unlocks};

use super::player;

pub fn build(level: Level, _options: &ClassOptions) -> Result<Creature, TemplateError> {
    let int = scale(level, &[(1, 4), (4, 5)])?;
    let con = scale(level, &[(1, 2), (8, 3), (12, 4), (16, 5)])?;
    let pb = proficiency_bonus(level)?;
    let ac = scale(level, &[(1, 17), (3, 18), (5, 19), (8, 20), (11, 21), (16, 22)])?;
    let save_bonus = scale(level, &[(1, pb), (20, pb + 6)])?;
    let infusion = scale(level, &[(1, 1), (12, 2)])?;

    let firebolt = DiceFormula::dice(cantrip_dice(level)?, 10).term_if(
        level.get() >= 6,
        Term::dice(1, 8).tagged("Arcane Firearm"),
    );

    let actions = Unlocks::new()
        .at(
            1,
            vec![
                Action::attack(
                    "Firebolt",
                    ActionSlot::Action,
                    Attack::new(spell_attack(pb, int), firebolt),
                ),
                Action::buff(
                    "Shield",
                    ActionSlot::Reaction,
                    Buff::new(BuffDuration::OneRound).with_ac(5),
                )
                .with_freq(Frequency::long_rest(spell_uses(level)?))
                .with_condition(ActivationCondition::IsUnderHalfHp),
            ],
        )
        .at(
            2,
            vec![Action::buff(
                "Artificer Infusions",
                ActionSlot::Passive,
                Buff::new(BuffDuration::EntireEncounter)
                    .with_to_hit(infusion)
                    .with_ac(infusion),
            )
            .with_freq(Frequency::once_per_fight())
            .with_condition(ActivationCondition::IsAvailable)
            .with_targets(100, TargetRule::AllyWithMostHp)],
        )
        .at(
            3,
            vec![Action::heal(
                "Shield Turret",
                ActionSlot::BonusAction,
                Heal::temporary(DiceFormula::dice(1, 8).term(Term::flat(int))),
            )
            .with_target_count(2)],
        )
        .collect(level);

    player(
        "Artificer",
        level,
        ac,
        save_bonus,
        hit_points(level, 8, con),
        actions,
    )
}
