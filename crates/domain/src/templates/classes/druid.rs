//! Druid: from level 2 the statblock is built around a wild-shape form
//! borrowed from the monster registry.
//!
//! The form's armor class, hit points and actions are copied into the druid;
//! every copied action receives a new id so the druid never shares state with
//! the registry's template.

use crate::entities::{Action, ActionSlot, ActivationCondition, Attack, Creature, Heal, TargetRule};
use crate::error::TemplateError;
use crate::templates::monsters::{require_monster, MonsterRegistry};
use crate::templates::options::ClassOptions;
use crate::templates::progression::{hit_points, proficiency_bonus, spell_attack};
use crate::value_objects::{scale, Buff, BuffDuration, DiceFormula, Frequency, Level, Term, Unlocks};

use super::player;

const CON: i32 = 2;
const DEX: i32 = 2;

const WILD_SHAPES: [(u8, &str); 4] = [
    (2, "Dire Wolf"),
    (6, "Giant Constrictor Snake"),
    (9, "Giant Scorpion"),
    (10, "Fire Elemental"),
];

pub fn build(
    level: Level,
    _options: &ClassOptions,
    monsters: &dyn MonsterRegistry,
) -> Result<Creature, TemplateError> {
    let wis = scale(level, &[(1, 4), (4, 5)])?;
    let pb = proficiency_bonus(level)?;
    let hp = hit_points(level, 8, CON);

    if level.get() == 1 {
        let actions = vec![
            Action::attack(
                "Shillelagh",
                ActionSlot::Action,
                Attack::new(
                    spell_attack(pb, wis),
                    DiceFormula::dice(1, 8).term(Term::flat(wis)),
                ),
            ),
            Action::heal(
                "Cure Wounds",
                ActionSlot::Action,
                Heal::new(DiceFormula::dice(1, 8).term(Term::flat(wis))),
            )
            .with_freq(Frequency::once_per_day())
            .with_condition(ActivationCondition::AllyAtZeroHp),
        ];
        return player("Druid", level, 14 + DEX, pb, hp, actions);
    }

    let form = require_monster(monsters, scale(level, &WILD_SHAPES)?)?;
    let form_ac = form.ac();
    let form_hp = form.hp();
    let wild_shape_name = format!("Wild Shape: {}", form.name());

    let mut shifted: Vec<Action> = form
        .into_actions()
        .into_iter()
        .map(Action::with_fresh_id)
        .collect();
    shifted.push(
        Action::heal(
            wild_shape_name,
            ActionSlot::BonusAction,
            Heal::temporary(form_hp),
        )
        .with_targets(1, TargetRule::SelfOnly)
        .with_condition(ActivationCondition::HasNoTempHp)
        .with_freq(scale(
            level,
            &[(1, Frequency::short_rest(2)), (20, Frequency::AtWill)],
        )?),
    );

    let actions = Unlocks::new()
        .at(1, shifted)
        .at(
            18,
            vec![
                Action::heal("Heal", ActionSlot::Action, Heal::new(70))
                    .with_freq(Frequency::once_per_fight())
                    .with_condition(ActivationCondition::AllyAtZeroHp),
                Action::buff(
                    "Guardian of Nature",
                    ActionSlot::BonusAction,
                    Buff::new(BuffDuration::EntireEncounter)
                        .with_condition("Attacks with Advantage")
                        .with_damage(DiceFormula::dice(2, 6)),
                )
                .with_freq(Frequency::once_per_fight()),
            ],
        )
        .collect(level);

    player("Druid", level, form_ac, pb, hp, actions)
}
