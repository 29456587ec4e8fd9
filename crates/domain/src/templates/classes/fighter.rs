use crate::entities::{Action, ActionSlot, ActivationCondition, Attack, Creature, Heal, TargetRule};
use crate::error::TemplateError;
use crate::templates::options::{ClassOptions, ModifierChain, PowerAttack};
use crate::templates::progression::{hit_points, proficiency_bonus};
use crate::value_objects::{scale, DiceFormula, Frequency, Level, Term, Unlocks};

use super::player;

const CON: i32 = 2;

/// Recognizes `weaponBonus` and `gwm`.
pub fn build(level: Level, options: &ClassOptions) -> Result<Creature, TemplateError> {
    let strength = scale(level, &[(1, 4), (4, 5)])?;
    let pb = proficiency_bonus(level)?;
    let ac = scale(level, &[(1, 16), (3, 17), (6, 18)])?;
    let attacks: u32 = scale(level, &[(1, 1), (5, 2), (11, 3), (20, 4)])?;

    let weapon = if attacks > 1 {
        format!("Greatsword x{attacks}")
    } else {
        "Greatsword".to_string()
    };

    let chain = ModifierChain::new(options, PowerAttack::GreatWeaponMaster);
    let greatsword = Action::attack(
        weapon.as_str(),
        ActionSlot::Action,
        Attack::new(
            chain.to_hit(
                DiceFormula::new(Term::flat(pb).tagged("PB"))
                    .term(Term::flat(strength).tagged("STR")),
            ),
            chain.damage(DiceFormula::dice(2, 6).term(Term::flat(strength).tagged("STR"))),
        ),
    )
    .with_target_count(attacks);

    // Each Action Surge repeats the full attack action in its own slot.
    let action_surge = |slot: u8| {
        greatsword
            .clone()
            .with_fresh_id()
            .with_name(format!("Action Surge: {weapon}"))
            .with_slot(ActionSlot::Extra(slot))
            .with_freq(Frequency::once_per_fight())
            .with_condition(ActivationCondition::IsAvailable)
    };
    let first_surge = action_surge(1);
    let second_surge = action_surge(2);

    let second_wind = Action::heal(
        "Second Wind",
        ActionSlot::BonusAction,
        Heal::new(DiceFormula::dice(1, 10).term(Term::flat(i32::from(level.get())))),
    )
    .with_targets(1, TargetRule::SelfOnly)
    .with_freq(Frequency::once_per_fight())
    .with_condition(ActivationCondition::IsUnderHalfHp);

    let actions = Unlocks::new()
        .at(1, vec![greatsword, second_wind])
        .at(2, vec![first_surge])
        .at(17, vec![second_surge])
        .collect(level);

    player("Fighter", level, ac, pb, hit_points(level, 10, CON), actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::classes::{lv, names};

    #[test]
    fn attack_name_tracks_count() {
        for (level, name, targets) in [
            (1, "Greatsword", 1),
            (5, "Greatsword x2", 2),
            (11, "Greatsword x3", 3),
            (20, "Greatsword x4", 4),
        ] {
            let fighter = build(lv(level), &ClassOptions::default()).unwrap();
            let attack = &fighter.actions()[0];
            assert_eq!(attack.name, name);
            assert_eq!(attack.targets, targets);
        }
    }

    #[test]
    fn action_surges_use_distinct_extra_slots() {
        let fighter = build(lv(17), &ClassOptions::default()).unwrap();
        assert_eq!(
            names(&fighter),
            vec![
                "Greatsword x3",
                "Second Wind",
                "Action Surge: Greatsword x3",
                "Action Surge: Greatsword x3"
            ]
        );
        let slots: Vec<ActionSlot> = fighter.actions().iter().map(|a| a.action_slot).collect();
        assert_eq!(slots[2], ActionSlot::Extra(1));
        assert_eq!(slots[3], ActionSlot::Extra(2));
        assert_ne!(fighter.actions()[2].id, fighter.actions()[3].id);
        assert_ne!(fighter.actions()[0].id, fighter.actions()[2].id);
    }

    #[test]
    fn action_surge_copies_attack_formulas() {
        let options = ClassOptions::new().with_weapon_bonus(2).with_gwm(true);
        let fighter = build(lv(2), &options).unwrap();
        let attack = fighter.actions()[0].as_attack().unwrap();
        let surge = fighter.actions()[2].as_attack().unwrap();
        assert_eq!(attack, surge);
        assert_eq!(
            surge.dpr.to_string(),
            "2d6 + 4[STR] + 2[WEAPON] + 10[GWM]"
        );
    }

    #[test]
    fn second_wind_scales_with_level() {
        let fighter = build(lv(7), &ClassOptions::default()).unwrap();
        let heal = fighter.actions()[1].as_heal().unwrap();
        assert_eq!(heal.amount.to_string(), "1d10 + 7");
    }
}
