use crate::entities::{Action, ActionSlot, Attack, Creature, TargetRule};
use crate::error::TemplateError;
use crate::templates::options::ClassOptions;
use crate::templates::progression::{hit_points, proficiency_bonus, spell_attack, spell_save_dc};
use crate::value_objects::{
    scale, Buff, BuffDuration, DiceFormula, Level, RiderEffect, Term, Unlocks,
};

use super::player;

const CON: i32 = 2;

pub fn build(level: Level, _options: &ClassOptions) -> Result<Creature, TemplateError> {
    let dex = scale(level, &[(1, 4), (4, 5)])?;
    let wis = scale(level, &[(1, 2), (8, 3), (12, 4), (16, 5)])?;
    let pb = proficiency_bonus(level)?;
    let to_hit = spell_attack(pb, dex);
    let dc = spell_save_dc(pb, wis);
    let martial_arts_die = scale(level, &[(1, 4), (5, 6), (11, 8), (17, 10)])?;

    let stunning_strike = |from: u8| {
        (level.get() >= from).then(|| {
            RiderEffect::new(
                dc,
                Buff::new(BuffDuration::OneRound).with_condition("Stunned"),
            )
        })
    };

    let quarterstaff = Action::attack(
        scale(
            level,
            &[(1, "Quarterstaff"), (5, "Quarterstaff x2 + Stunning Strike")],
        )?,
        ActionSlot::Action,
        Attack::new(to_hit, DiceFormula::dice(1, 10).term(Term::flat(dex)))
            .with_rider(stunning_strike(5)),
    )
    .with_targets(
        scale(level, &[(1, 1), (5, 2)])?,
        TargetRule::EnemyWithHighestDpr,
    );

    let unarmed_strike = Action::attack(
        scale(
            level,
            &[
                (1, "Unarmed Strike"),
                (3, "Flurry of Blows"),
                (9, "Flurry of Blows + Stunning Strike"),
            ],
        )?,
        ActionSlot::BonusAction,
        Attack::new(
            to_hit,
            DiceFormula::dice(1, martial_arts_die).term(Term::flat(dex)),
        )
        .with_rider(stunning_strike(9)),
    )
    .with_targets(
        scale(level, &[(1, 1), (3, 2)])?,
        TargetRule::EnemyWithHighestDpr,
    );

    let actions = Unlocks::new()
        .at(1, vec![quarterstaff, unarmed_strike])
        .collect(level);

    player(
        "Monk",
        level,
        10 + dex + wis,
        scale(level, &[(1, pb), (14, pb + 3)])?,
        hit_points(level, 8, CON),
        actions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::classes::{lv, names};

    #[test]
    fn names_follow_progression() {
        let expected = [
            (1, ["Quarterstaff", "Unarmed Strike"]),
            (3, ["Quarterstaff", "Flurry of Blows"]),
            (5, ["Quarterstaff x2 + Stunning Strike", "Flurry of Blows"]),
            (
                9,
                [
                    "Quarterstaff x2 + Stunning Strike",
                    "Flurry of Blows + Stunning Strike",
                ],
            ),
        ];
        for (level, expected_names) in expected {
            let monk = build(lv(level), &ClassOptions::default()).unwrap();
            assert_eq!(names(&monk), expected_names.to_vec(), "level {level}");
        }
    }

    #[test]
    fn stunning_strike_rider_appears_with_name() {
        let at_four = build(lv(4), &ClassOptions::default()).unwrap();
        assert!(at_four.actions()[0].as_attack().unwrap().rider_effect.is_none());

        let at_five = build(lv(5), &ClassOptions::default()).unwrap();
        let rider = at_five.actions()[0]
            .as_attack()
            .unwrap()
            .rider_effect
            .clone()
            .unwrap();
        assert_eq!(rider.dc, 13);
        assert_eq!(rider.buff.condition.as_deref(), Some("Stunned"));
        assert!(at_five.actions()[1].as_attack().unwrap().rider_effect.is_none());
    }

    #[test]
    fn martial_arts_die_and_ac() {
        let monk = build(lv(17), &ClassOptions::default()).unwrap();
        assert_eq!(
            monk.actions()[1].as_attack().unwrap().dpr.to_string(),
            "1d10 + 5"
        );
        assert_eq!(monk.ac(), 20);
        assert_eq!(monk.save_bonus(), 9);
    }
}
