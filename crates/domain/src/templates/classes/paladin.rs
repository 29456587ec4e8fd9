use crate::entities::{Action, ActionSlot, ActivationCondition, Attack, Creature, Heal, TargetRule};
use crate::error::TemplateError;
use crate::templates::options::{ClassOptions, ModifierChain, PowerAttack};
use crate::templates::progression::{hit_points, proficiency_bonus};
use crate::value_objects::{scale, Buff, BuffDuration, DiceFormula, Frequency, Level, Term, Unlocks};

use super::player;

const CON: i32 = 2;

/// Recognizes `weaponBonus` and `gwm`.
///
/// Divine Smite and Aura of Protection take extra slots 1 and 2 so the
/// simulator can use both in the same round as the attack action.
pub fn build(level: Level, options: &ClassOptions) -> Result<Creature, TemplateError> {
    let strength = scale(level, &[(1, 4), (4, 5)])?;
    let cha = scale(level, &[(1, 2), (8, 3), (12, 5)])?;
    let pb = proficiency_bonus(level)?;
    let ac = scale(level, &[(1, 17), (3, 18), (5, 19), (8, 20), (11, 21), (16, 22)])?;

    let chain = ModifierChain::new(options, PowerAttack::GreatWeaponMaster);
    let to_hit = chain.to_hit(
        DiceFormula::new(Term::flat(pb).tagged("PB")).term(Term::flat(strength).tagged("STR")),
    );
    let dpr = chain
        .damage(
            DiceFormula::dice(1, 8)
                .term(Term::flat(strength).tagged("STR"))
                .term_if(level.get() > 1, Term::flat(2).tagged("Fighting Style")),
        )
        .term_if(level.get() >= 10, Term::dice(1, 8).tagged("IDS"));

    let longsword = Action::attack(
        scale(level, &[(1, "Longsword"), (5, "Longsword x2")])?,
        ActionSlot::Action,
        Attack::new(to_hit, dpr),
    )
    .with_target_count(scale(level, &[(1, 1), (5, 2)])?);

    let lay_on_hands = Action::heal(
        "Lay on Hands",
        ActionSlot::Action,
        Heal::new(5 * i32::from(level.get())),
    )
    .with_freq(Frequency::once_per_day())
    .with_condition(ActivationCondition::AllyAtZeroHp);

    let divine_smite = Action::buff(
        "Divine Smite",
        ActionSlot::Extra(1),
        Buff::new(BuffDuration::UntilNextAttackMade).with_damage(DiceFormula::dice(
            scale(level, &[(1, 2), (5, 3), (11, 4), (17, 5)])?,
            8,
        )),
    )
    .with_freq(scale(
        level,
        &[
            (1, Frequency::once_per_day()),
            (5, Frequency::long_rest(u32::from(level.get() / 2))),
        ],
    )?)
    .with_condition(scale(
        level,
        &[
            (1, ActivationCondition::IsAvailable),
            (11, ActivationCondition::Default),
        ],
    )?);

    let aura_of_protection = Action::buff(
        "Aura of Protection",
        ActionSlot::Extra(2),
        Buff::new(BuffDuration::OneRound).with_save(cha),
    )
    .with_targets(2, TargetRule::AllyWithLeastHp);

    let actions = Unlocks::new()
        .at(1, vec![longsword, lay_on_hands])
        .at(2, vec![divine_smite])
        .at(6, vec![aura_of_protection])
        .collect(level);

    player("Paladin", level, ac, pb, hit_points(level, 10, CON), actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::classes::{action, lv, names};

    #[test]
    fn unlocks_by_level() {
        assert_eq!(
            names(&build(lv(1), &ClassOptions::default()).unwrap()),
            vec!["Longsword", "Lay on Hands"]
        );
        assert_eq!(
            names(&build(lv(6), &ClassOptions::default()).unwrap()),
            vec!["Longsword x2", "Lay on Hands", "Divine Smite", "Aura of Protection"]
        );
    }

    #[test]
    fn damage_formula_order() {
        let options = ClassOptions::new().with_weapon_bonus(1).with_gwm(true);
        let paladin = build(lv(10), &options).unwrap();
        let attack = action(&paladin, "Longsword x2").as_attack().unwrap();
        assert_eq!(
            attack.dpr.to_string(),
            "1d8 + 5[STR] + 2[Fighting Style] + 1[WEAPON] + 10[GWM] + 1d8[IDS]"
        );
        assert_eq!(
            attack.to_hit.to_string(),
            "4[PB] + 5[STR] + 1[WEAPON] - 5[GWM]"
        );
    }

    #[test]
    fn smite_progression() {
        let at_two = build(lv(2), &ClassOptions::default()).unwrap();
        let smite = action(&at_two, "Divine Smite");
        assert_eq!(smite.freq, Frequency::once_per_day());
        assert_eq!(smite.condition, ActivationCondition::IsAvailable);
        assert_eq!(smite.action_slot, ActionSlot::Extra(1));

        let at_eleven = build(lv(11), &ClassOptions::default()).unwrap();
        let smite = action(&at_eleven, "Divine Smite");
        assert_eq!(smite.freq, Frequency::long_rest(5));
        assert_eq!(smite.condition, ActivationCondition::Default);
        assert_eq!(
            smite.as_buff().unwrap().damage,
            Some(DiceFormula::dice(4, 8))
        );
    }

    #[test]
    fn aura_uses_charisma() {
        let paladin = build(lv(12), &ClassOptions::default()).unwrap();
        let aura = action(&paladin, "Aura of Protection");
        assert_eq!(aura.action_slot, ActionSlot::Extra(2));
        assert_eq!(aura.as_buff().unwrap().save, Some(DiceFormula::flat(5)));
    }

    #[test]
    fn lay_on_hands_pool() {
        let paladin = build(lv(4), &ClassOptions::default()).unwrap();
        let heal = action(&paladin, "Lay on Hands").as_heal().unwrap();
        assert_eq!(heal.amount.as_formula(), Some(&DiceFormula::flat(20)));
    }
}
