use crate::entities::{Action, ActionSlot, Attack, Creature};
use crate::error::TemplateError;
use crate::templates::options::{ClassOptions, ModifierChain, PowerAttack};
use crate::templates::progression::{hit_points, proficiency_bonus};
use crate::value_objects::{scale, Buff, BuffDuration, DiceFormula, Level, Term, Unlocks};

use super::player;

const CON: i32 = 2;

/// Recognizes `weaponBonus` and `ss`.
pub fn build(level: Level, options: &ClassOptions) -> Result<Creature, TemplateError> {
    let dex = scale(level, &[(1, 4), (4, 5)])?;
    let pb = proficiency_bonus(level)?;
    let ac = dex + scale(level, &[(1, 12), (5, 13), (11, 14)])?;

    let chain = ModifierChain::new(options, PowerAttack::Sharpshooter);
    let hand_crossbow = Action::attack(
        scale(
            level,
            &[(1, "Hand Crossbow"), (4, "Hand Crossbow + Crossbow Expert")],
        )?,
        ActionSlot::Action,
        Attack::new(
            chain.to_hit(
                DiceFormula::new(Term::flat(pb).tagged("PB"))
                    .term(Term::flat(dex).tagged("DEX")),
            ),
            chain.damage(DiceFormula::dice(1, 6).term(Term::flat(dex).tagged("DEX"))),
        ),
    )
    .with_target_count(scale(level, &[(1, 1), (4, 2)])?);

    let sneak_attack = Action::buff(
        "Sneak Attack",
        ActionSlot::Passive,
        Buff::new(BuffDuration::UntilNextAttackMade)
            .with_damage(DiceFormula::dice(level.div_ceil(2), 6)),
    );

    let actions = Unlocks::new()
        .at(1, vec![hand_crossbow, sneak_attack])
        .at(
            2,
            vec![Action::buff(
                "Cunning Action: Hide",
                ActionSlot::BonusAction,
                Buff::new(BuffDuration::UntilNextAttackMade)
                    .with_condition("Attacks with Advantage"),
            )],
        )
        .at(
            5,
            vec![Action::buff(
                "Uncanny Dodge",
                ActionSlot::Reaction,
                Buff::new(BuffDuration::UntilNextAttackTaken).with_damage_taken_multiplier(0.5),
            )],
        )
        .collect(level);

    player("Rogue", level, ac, pb, hit_points(level, 8, CON), actions)
}
