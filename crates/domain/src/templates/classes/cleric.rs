use crate::entities::{Action, ActionSlot, ActivationCondition, Attack, Creature, Heal, TargetRule};
use crate::error::TemplateError;
use crate::templates::options::ClassOptions;
use crate::templates::progression::{
    cantrip_dice, hit_points, proficiency_bonus, spell_attack, spell_save_dc, spell_uses,
};
use crate::value_objects::{scale, Buff, BuffDuration, DiceFormula, Frequency, Level, Term, Unlocks};

use super::player;

const CON: i32 = 2;

pub fn build(level: Level, _options: &ClassOptions) -> Result<Creature, TemplateError> {
    let wis = scale(level, &[(1, 4), (4, 5)])?;
    let pb = proficiency_bonus(level)?;
    let dc = spell_save_dc(pb, wis);
    let ac = scale(level, &[(1, 17), (3, 18), (5, 19), (8, 20)])?;

    let sacred_flame = Action::attack(
        "Sacred Flame",
        ActionSlot::Action,
        Attack::new(
            dc,
            DiceFormula::dice(cantrip_dice(level)?, 8).term_if(
                level.get() >= 8,
                Term::dice(1, 8).tagged("Potent Spellcasting"),
            ),
        )
        .save_based(),
    );

    let bless = Action::buff(
        "Bless",
        ActionSlot::Action,
        Buff::new(BuffDuration::EntireEncounter)
            .with_save(DiceFormula::dice(1, 4))
            .with_to_hit(DiceFormula::dice(1, 4)),
    )
    .with_freq(Frequency::long_rest(spell_uses(level)?))
    .with_condition(ActivationCondition::NotUsedYet)
    .with_targets(3, TargetRule::AllyWithHighestDpr);

    let cure_wounds = Action::heal(
        scale(level, &[(1, "Cure Wounds"), (11, "Heal")])?,
        ActionSlot::Action,
        Heal::new(scale(
            level,
            &[
                (1, DiceFormula::dice(level.div_ceil(3), 8).term(Term::flat(wis))),
                (11, DiceFormula::flat(70)),
            ],
        )?),
    )
    .with_freq(Frequency::long_rest(scale(
        level,
        &[(1, 1), (3, 2), (5, 3), (7, 4), (9, 5), (11, 1), (13, 2), (15, 3)],
    )?))
    .with_condition(ActivationCondition::AllyAtZeroHp);

    let spiritual_weapon = Action::attack(
        "Spiritual Weapon",
        ActionSlot::BonusAction,
        Attack::new(
            spell_attack(pb, wis),
            DiceFormula::dice(level.div_ceil(6), 8).term(Term::flat(wis)),
        ),
    );

    let spirit_guardians = Action::attack(
        "Spirit Guardians",
        ActionSlot::Action,
        Attack::new(dc, DiceFormula::dice(level.div_ceil(5) + 2, 6)).half_on_save(),
    )
    .with_target_count(2);

    let mass_heal = Action::heal(
        scale(
            level,
            &[(1, "Mass Healing Word"), (9, "Mass Cure Wounds"), (17, "Mass Heal")],
        )?,
        ActionSlot::Action,
        Heal::new(scale(
            level,
            &[
                (1, DiceFormula::dice(1, 4).term(Term::flat(wis))),
                (9, DiceFormula::dice(3, 8).term(Term::flat(wis))),
                (17, DiceFormula::flat(70)),
            ],
        )?),
    )
    .with_freq(Frequency::long_rest(scale(
        level,
        &[(1, 1), (5, 1), (9, 2), (13, 3), (17, 4)],
    )?))
    .with_condition(ActivationCondition::IsUnderHalfHp)
    .with_target_count(6);

    let actions = Unlocks::new()
        .at(1, vec![sacred_flame, bless, cure_wounds])
        .at(3, vec![spiritual_weapon])
        .at(5, vec![spirit_guardians, mass_heal])
        .collect(level);

    player("Cleric", level, ac, pb, hit_points(level, 8, CON), actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::classes::{action, lv, names};

    #[test]
    fn unlock_order() {
        let cleric = build(lv(5), &ClassOptions::default()).unwrap();
        assert_eq!(
            names(&cleric),
            vec![
                "Sacred Flame",
                "Bless",
                "Cure Wounds",
                "Spiritual Weapon",
                "Spirit Guardians",
                "Mass Healing Word"
            ]
        );
    }

    #[test]
    fn cure_wounds_becomes_heal_at_eleven() {
        let cleric = build(lv(11), &ClassOptions::default()).unwrap();
        let heal = action(&cleric, "Heal");
        assert_eq!(heal.as_heal().unwrap().amount.as_formula(), Some(&DiceFormula::flat(70)));
        assert_eq!(heal.freq, Frequency::long_rest(1));
    }

    #[test]
    fn mass_heal_progression() {
        let at_nine = build(lv(9), &ClassOptions::default()).unwrap();
        let word = action(&at_nine, "Mass Cure Wounds").as_heal().unwrap();
        assert_eq!(word.amount.to_string(), "3d8 + 5");
        let at_seventeen = build(lv(17), &ClassOptions::default()).unwrap();
        assert_eq!(action(&at_seventeen, "Mass Heal").targets, 6);
    }

    #[test]
    fn spirit_guardians_halve_on_save() {
        let cleric = build(lv(10), &ClassOptions::default()).unwrap();
        let guardians = action(&cleric, "Spirit Guardians").as_attack().unwrap();
        assert!(guardians.use_saves && guardians.half_on_save);
        assert_eq!(guardians.dpr, DiceFormula::dice(4, 6));
        assert_eq!(guardians.to_hit, DiceFormula::flat(17));
    }

    #[test]
    fn potent_spellcasting_from_eight() {
        let cleric = build(lv(8), &ClassOptions::default()).unwrap();
        let flame = action(&cleric, "Sacred Flame").as_attack().unwrap();
        assert_eq!(flame.dpr.to_string(), "2d8 + 1d8[Potent Spellcasting]");
    }
}
