use crate::entities::{Action, ActionSlot, ActivationCondition, Attack, Creature};
use crate::error::TemplateError;
use crate::templates::options::{ClassOptions, ModifierChain, PowerAttack};
use crate::templates::progression::{hit_points, proficiency_bonus};
use crate::value_objects::{scale, Buff, BuffDuration, DiceFormula, Frequency, Level, Term};

use super::player;

const DEX: i32 = 2;

/// Recognizes `weaponBonus` and `gwm`.
pub fn build(level: Level, options: &ClassOptions) -> Result<Creature, TemplateError> {
    let strength = scale(level, &[(1, 4), (4, 5), (20, 7)])?;
    let con = scale(level, &[(1, 2), (8, 3), (12, 4), (16, 5), (20, 7)])?;
    let pb = proficiency_bonus(level)?;
    let rage = scale(level, &[(1, 2), (9, 3), (16, 4)])?;
    let (weapon, attacks) = scale(level, &[(1, ("Greatsword", 1)), (5, ("Greatsword x2", 2))])?;

    let chain = ModifierChain::new(options, PowerAttack::GreatWeaponMaster);
    let to_hit = chain.to_hit(
        DiceFormula::new(Term::flat(pb).tagged("PB")).term(Term::flat(strength).tagged("STR")),
    );
    let dpr = chain.damage(
        DiceFormula::dice(2, 6)
            .term(Term::flat(strength).tagged("STR"))
            .term(Term::flat(rage).tagged("RAGE")),
    );

    let mut actions = vec![
        Action::attack(weapon, ActionSlot::Action, Attack::new(to_hit, dpr))
            .with_target_count(attacks),
        Action::buff(
            "Rage",
            ActionSlot::BonusAction,
            Buff::new(BuffDuration::EntireEncounter).with_damage_taken_multiplier(0.5),
        )
        .with_freq(Frequency::long_rest(scale(
            level,
            &[(1, 2), (3, 3), (6, 4), (12, 5), (17, 6)],
        )?))
        .with_condition(ActivationCondition::IsAvailable),
    ];

    if level.get() >= 2 {
        actions.push(Action::buff(
            "Reckless Attack",
            ActionSlot::Passive,
            Buff::new(BuffDuration::OneRound)
                .with_condition("Attacks and is attacked with Advantage"),
        ));
    }

    player(
        "Barbarian",
        level,
        10 + DEX + con,
        pb,
        hit_points(level, 12, con),
        actions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::classes::{action, lv, names};

    #[test]
    fn greatsword_name_tracks_attack_count() {
        let at_four = build(lv(4), &ClassOptions::default()).unwrap();
        assert_eq!(action(&at_four, "Greatsword").targets, 1);
        let at_five = build(lv(5), &ClassOptions::default()).unwrap();
        assert_eq!(action(&at_five, "Greatsword x2").targets, 2);
    }

    #[test]
    fn reckless_attack_from_level_two() {
        assert_eq!(
            names(&build(lv(1), &ClassOptions::default()).unwrap()),
            vec!["Greatsword", "Rage"]
        );
        assert_eq!(
            names(&build(lv(2), &ClassOptions::default()).unwrap()),
            vec!["Greatsword", "Rage", "Reckless Attack"]
        );
    }

    #[test]
    fn formula_order_with_all_options() {
        let options = ClassOptions::new().with_weapon_bonus(1).with_gwm(true);
        let barbarian = build(lv(1), &options).unwrap();
        let attack = action(&barbarian, "Greatsword").as_attack().unwrap();
        assert_eq!(
            attack.to_hit.to_string(),
            "2[PB] + 4[STR] + 1[WEAPON] - 5[GWM]"
        );
        assert_eq!(
            attack.dpr.to_string(),
            "2d6 + 4[STR] + 2[RAGE] + 1[WEAPON] + 10[GWM]"
        );
    }

    #[test]
    fn sharpshooter_is_ignored() {
        let options = ClassOptions::new().with_ss(true);
        let barbarian = build(lv(1), &options).unwrap();
        let attack = action(&barbarian, "Greatsword").as_attack().unwrap();
        assert_eq!(attack.dpr.to_string(), "2d6 + 4[STR] + 2[RAGE]");
    }

    #[test]
    fn armor_class_is_unarmored_defense() {
        assert_eq!(build(lv(1), &ClassOptions::default()).unwrap().ac(), 14);
        assert_eq!(build(lv(20), &ClassOptions::default()).unwrap().ac(), 19);
    }
}
