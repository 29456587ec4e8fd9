use crate::entities::{Action, ActionSlot, Attack, Creature};
use crate::error::TemplateError;
use crate::templates::options::{ClassOptions, ModifierChain, PowerAttack};
use crate::templates::progression::{hit_points, proficiency_bonus};
use crate::value_objects::{scale, DiceFormula, Level, Term, Unlocks};

use super::player;

const CON: i32 = 2;

/// Recognizes `weaponBonus` and `ss`.
pub fn build(level: Level, options: &ClassOptions) -> Result<Creature, TemplateError> {
    let dex = scale(level, &[(1, 4), (4, 5)])?;
    let pb = proficiency_bonus(level)?;
    let ac = dex + scale(level, &[(1, 12), (5, 13), (11, 14)])?;
    let fighting_style = level.get() > 1;

    let chain = ModifierChain::new(options, PowerAttack::Sharpshooter);
    let to_hit = chain.to_hit(
        DiceFormula::new(Term::flat(pb).tagged("PB"))
            .term(Term::flat(dex).tagged("DEX"))
            .term_if(fighting_style, Term::flat(2).tagged("ARCHERY")),
    );
    let dpr = chain.damage(
        DiceFormula::dice(1, 6)
            .term(Term::flat(dex).tagged("DEX"))
            .term_if(fighting_style, Term::dice(1, 6).tagged("HM")),
    );

    let hand_crossbow = Action::attack(
        scale(
            level,
            &[
                (1, "Hand Crossbow"),
                (2, "Hand Crossbow + Hunter's Mark"),
                (4, "Hand Crossbow + Crossbow Expert + Hunter's Mark"),
                (5, "Hand Crossbow x2 + Crossbow Expert + Hunter's Mark"),
            ],
        )?,
        ActionSlot::Action,
        Attack::new(to_hit, dpr),
    )
    .with_target_count(scale(level, &[(1, 1), (4, 2), (5, 3)])?);

    let actions = Unlocks::new().at(1, vec![hand_crossbow]).collect(level);

    player("Ranger", level, ac, pb, hit_points(level, 10, CON), actions)
}
