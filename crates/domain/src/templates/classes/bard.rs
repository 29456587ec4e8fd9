use crate::entities::{Action, ActionSlot, ActivationCondition, Attack, Creature, Heal, TargetRule};
use crate::error::TemplateError;
use crate::templates::options::ClassOptions;
use crate::templates::progression::{
    cantrip_dice, hit_points, proficiency_bonus, spell_save_dc, spell_uses,
};
use crate::value_objects::{
    scale, Buff, BuffDuration, DiceFormula, Frequency, Level, RiderEffect, Term, Unlocks,
};

use super::player;

const CON: i32 = 2;

pub fn build(level: Level, _options: &ClassOptions) -> Result<Creature, TemplateError> {
    let cha = scale(level, &[(1, 4), (4, 5)])?;
    let dex = scale(level, &[(1, 2), (12, 3), (16, 4)])?;
    let pb = proficiency_bonus(level)?;
    let dc = spell_save_dc(pb, cha);
    let inspiration_die = scale(level, &[(1, 6), (5, 8), (10, 10), (15, 12)])?;

    let vicious_mockery = Action::attack(
        "Vicious Mockery",
        ActionSlot::Action,
        Attack::new(dc, DiceFormula::dice(cantrip_dice(level)?, 4))
            .save_based()
            .with_rider(Some(RiderEffect::new(
                100,
                Buff::new(BuffDuration::UntilNextAttackMade)
                    .with_condition("Attacks with Disadvantage"),
            ))),
    )
    .with_targets(1, TargetRule::EnemyWithHighestDpr);

    let bane = Action::debuff(
        "Bane",
        ActionSlot::Action,
        dc,
        Buff::new(BuffDuration::EntireEncounter)
            .with_to_hit(DiceFormula::new(Term::dice(1, 4).negated()))
            .with_save(DiceFormula::new(Term::dice(1, 4).negated())),
    )
    .with_freq(Frequency::long_rest(spell_uses(level)?))
    .with_condition(ActivationCondition::IsAvailable)
    .with_target_count(3);

    // Font of Inspiration makes it free to spend from level 5.
    let (inspiration_freq, inspiration_condition) = if level.get() < 5 {
        (Frequency::once_per_fight(), ActivationCondition::IsAvailable)
    } else {
        (Frequency::AtWill, ActivationCondition::Default)
    };
    let bardic_inspiration = Action::buff(
        "Bardic Inspiration",
        ActionSlot::BonusAction,
        Buff::new(BuffDuration::OneRound).with_to_hit(DiceFormula::dice(1, inspiration_die)),
    )
    .with_freq(inspiration_freq)
    .with_condition(inspiration_condition)
    .with_targets(1, TargetRule::AllyWithHighestDpr);

    let (cure_name, cure_targets) = if level.get() <= 9 {
        ("Cure Wounds", 1)
    } else {
        ("Mass Cure Wounds", 6)
    };
    let cure_wounds = Action::heal(
        cure_name,
        ActionSlot::Action,
        Heal::new(DiceFormula::dice(level.div_ceil(3), 8).term(Term::flat(cha))),
    )
    .with_freq(Frequency::long_rest(scale(
        level,
        &[(1, 1), (3, 2), (5, 3), (7, 4), (9, 2), (11, 3), (13, 4), (15, 5), (17, 6)],
    )?))
    .with_condition(ActivationCondition::AllyAtZeroHp)
    .with_target_count(cure_targets);

    let hypnotic_pattern = Action::debuff(
        "Hypnotic Pattern",
        ActionSlot::Action,
        dc,
        Buff::new(BuffDuration::OneRound).with_condition("Incapacitated"),
    )
    .with_freq(Frequency::long_rest(scale(
        level,
        &[(1, 1), (5, 1), (9, 2), (13, 3), (17, 4)],
    )?))
    .with_condition(ActivationCondition::IsAvailable)
    .with_target_count(2);

    let actions = Unlocks::new()
        .at(1, vec![vicious_mockery, bane, bardic_inspiration, cure_wounds])
        .at(5, vec![hypnotic_pattern])
        .collect(level);

    player("Bard", level, 13 + dex, pb, hit_points(level, 8, CON), actions)
}
