//! Per-class option records and the shared modifier chain.
//!
//! Options are a flat record: every class reads the keys it recognizes and
//! ignores the rest. Weapon-using classes run their to-hit and damage
//! formulas through [`ModifierChain`] so the weapon bonus and power-attack
//! terms always land after the base and ability terms, in the same order.

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::value_objects::{DiceFormula, Term};

/// Option toggles accepted by the class builders.
///
/// Unknown keys are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon_bonus: Option<i32>,
    /// Great Weapon Master: -5 to hit, +10 damage on heavy melee attacks
    pub gwm: bool,
    /// Sharpshooter: -5 to hit, +10 damage on ranged attacks
    pub ss: bool,
}

impl ClassOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weapon_bonus(self, bonus: i32) -> Self {
        Self {
            weapon_bonus: Some(bonus),
            ..self
        }
    }

    pub fn with_gwm(self, gwm: bool) -> Self {
        Self { gwm, ..self }
    }

    pub fn with_ss(self, ss: bool) -> Self {
        Self { ss, ..self }
    }

    /// Parse an option record from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        serde_json::from_str(json)
            .map_err(|e| TemplateError::parse(format!("invalid class options: {e}")))
    }

    fn weapon_term(&self) -> Option<Term> {
        self.weapon_bonus
            .filter(|bonus| *bonus != 0)
            .map(|bonus| Term::flat(bonus).tagged("WEAPON"))
    }
}

/// Feat that trades accuracy for damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAttack {
    GreatWeaponMaster,
    Sharpshooter,
}

impl PowerAttack {
    pub fn tag(self) -> &'static str {
        match self {
            PowerAttack::GreatWeaponMaster => "GWM",
            PowerAttack::Sharpshooter => "SS",
        }
    }

    pub fn is_enabled(self, options: &ClassOptions) -> bool {
        match self {
            PowerAttack::GreatWeaponMaster => options.gwm,
            PowerAttack::Sharpshooter => options.ss,
        }
    }
}

/// Appends option-driven terms to weapon formulas.
#[derive(Debug, Clone, Copy)]
pub struct ModifierChain<'a> {
    options: &'a ClassOptions,
    feat: PowerAttack,
}

impl<'a> ModifierChain<'a> {
    pub fn new(options: &'a ClassOptions, feat: PowerAttack) -> Self {
        Self { options, feat }
    }

    /// `formula + bonus[WEAPON] - 5[feat]`
    pub fn to_hit(&self, formula: DiceFormula) -> DiceFormula {
        self.apply(formula, -5)
    }

    /// `formula + bonus[WEAPON] + 10[feat]`
    pub fn damage(&self, formula: DiceFormula) -> DiceFormula {
        self.apply(formula, 10)
    }

    fn apply(&self, formula: DiceFormula, feat_delta: i32) -> DiceFormula {
        let formula = match self.options.weapon_term() {
            Some(term) => formula.term(term),
            None => formula,
        };
        formula.term_if(
            self.feat.is_enabled(self.options),
            Term::flat(feat_delta).tagged(self.feat.tag()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DiceFormula {
        DiceFormula::dice(2, 6).term(Term::flat(5).tagged("STR"))
    }

    #[test]
    fn default_options_add_nothing() {
        let options = ClassOptions::default();
        let chain = ModifierChain::new(&options, PowerAttack::GreatWeaponMaster);
        assert_eq!(chain.damage(base()).to_string(), "2d6 + 5[STR]");
        assert_eq!(chain.to_hit(base()).to_string(), "2d6 + 5[STR]");
    }

    #[test]
    fn weapon_bonus_precedes_power_attack() {
        let options = ClassOptions::new().with_weapon_bonus(1).with_gwm(true);
        let chain = ModifierChain::new(&options, PowerAttack::GreatWeaponMaster);
        assert_eq!(
            chain.damage(base()).to_string(),
            "2d6 + 5[STR] + 1[WEAPON] + 10[GWM]"
        );
        assert_eq!(
            chain.to_hit(DiceFormula::flat(3).term(Term::flat(4))).to_string(),
            "3 + 4 + 1[WEAPON] - 5[GWM]"
        );
    }

    #[test]
    fn zero_weapon_bonus_is_omitted() {
        let options = ClassOptions::new().with_weapon_bonus(0);
        let chain = ModifierChain::new(&options, PowerAttack::Sharpshooter);
        assert_eq!(chain.damage(base()).terms().len(), 2);
    }

    #[test]
    fn feat_flag_must_match_chain() {
        let options = ClassOptions::new().with_gwm(true);
        let ranged = ModifierChain::new(&options, PowerAttack::Sharpshooter);
        assert!(ranged.damage(base()).tags().iter().all(|tag| *tag != "GWM"));

        let options = ClassOptions::new().with_ss(true);
        let ranged = ModifierChain::new(&options, PowerAttack::Sharpshooter);
        assert_eq!(ranged.damage(base()).tags(), vec!["STR", "SS"]);
    }

    #[test]
    fn options_parse_camel_case_and_ignore_unknown_keys() {
        let options =
            ClassOptions::from_json(r#"{ "weaponBonus": 2, "gwm": true, "elvenAccuracy": true }"#)
                .unwrap();
        assert_eq!(options.weapon_bonus, Some(2));
        assert!(options.gwm);
        assert!(!options.ss);
    }

    #[test]
    fn options_reject_malformed_json() {
        let err = ClassOptions::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, TemplateError::Parse(_)));
    }
}
