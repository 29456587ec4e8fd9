//! Dice formula value objects and parsing
//!
//! A formula is an ordered list of signed terms. Each term is a literal
//! (`5`) or a dice expression (`2d6`), optionally followed by a bracketed
//! source tag (`10[GWM]`). Tags document where a term came from for
//! breakdown display; they carry no weight when the formula is evaluated.
//!
//! ```text
//! formula := first (sign term)*
//! first   := '-'? term
//! term    := (dice | literal) tag?
//! dice    := count? 'd' sides      (count >= 1, sides >= 2)
//! tag     := '[' text ']'
//! ```
//!
//! The canonical text joins terms with ` + ` / ` - `, e.g.
//! `2d6 + 5[STR] + 2[RAGE] + 10[GWM]`. Nothing in this module rolls dice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Input does not match the formula grammar
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
    /// A `[` tag was opened but never closed
    #[error("Unterminated tag: '[{0}'")]
    UnterminatedTag(String),
    /// A tag containing a bracket
    #[error("Tag may not contain brackets: '{0}'")]
    InvalidTag(String),
    /// A trailing `+` or `-` with no term after it
    #[error("Dangling sign at end of formula")]
    DanglingSign,
}

/// Sign of a formula term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// The unsigned magnitude of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermValue {
    /// A literal integer
    Flat(u32),
    /// `count` dice with `sides` faces each
    Dice { count: u32, sides: u32 },
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Flat(value) => write!(f, "{}", value),
            TermValue::Dice { count, sides } => write!(f, "{}d{}", count, sides),
        }
    }
}

/// One signed, optionally tagged term of a [`DiceFormula`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    sign: Sign,
    value: TermValue,
    tag: Option<String>,
}

impl Term {
    /// A literal term. Negative values become a `-` term.
    pub fn flat(value: i32) -> Self {
        let sign = if value < 0 { Sign::Minus } else { Sign::Plus };
        Self {
            sign,
            value: TermValue::Flat(value.unsigned_abs()),
            tag: None,
        }
    }

    /// A dice term such as `2d6`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is 0 or `sides` is below 2; use [`Term::try_dice`]
    /// for counts that are not known to be valid.
    pub fn dice(count: u32, sides: u32) -> Self {
        match Self::try_dice(count, sides) {
            Ok(term) => term,
            Err(e) => panic!("malformed dice term {count}d{sides}: {e}"),
        }
    }

    /// A dice term, rejecting the same counts and sizes the parser rejects.
    pub fn try_dice(count: u32, sides: u32) -> Result<Self, DiceParseError> {
        if count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if sides < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self {
            sign: Sign::Plus,
            value: TermValue::Dice { count, sides },
            tag: None,
        })
    }

    /// Attach a source tag.
    ///
    /// # Panics
    ///
    /// Panics if the tag contains `[` or `]`; use [`Term::try_tagged`] for
    /// tags that come from outside the crate.
    pub fn tagged(self, tag: impl Into<String>) -> Self {
        match self.try_tagged(tag) {
            Ok(term) => term,
            Err(e) => panic!("{e}"),
        }
    }

    /// Attach a source tag, rejecting tags the parser could not read back.
    pub fn try_tagged(self, tag: impl Into<String>) -> Result<Self, DiceParseError> {
        let tag = tag.into();
        if tag.contains(['[', ']']) {
            return Err(DiceParseError::InvalidTag(tag));
        }
        Ok(Self {
            tag: Some(tag),
            ..self
        })
    }

    /// Flip the sign of this term.
    pub fn negated(self) -> Self {
        let sign = match self.sign {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        };
        Self { sign, ..self }
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn value(&self) -> TermValue {
        self.value
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn write_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if let Some(tag) = &self.tag {
            write!(f, "[{}]", tag)?;
        }
        Ok(())
    }
}

/// A dice formula: at least one term, in composition order.
///
/// Also the composer: start from a base term and chain further terms with
/// [`DiceFormula::term`] / [`DiceFormula::term_if`]. Serializes as its
/// canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceFormula {
    terms: Vec<Term>,
}

impl DiceFormula {
    /// Start a formula from its base term.
    pub fn new(base: Term) -> Self {
        Self { terms: vec![base] }
    }

    /// A formula consisting of a single literal.
    pub fn flat(value: i32) -> Self {
        Self::new(Term::flat(value))
    }

    /// A formula consisting of a single dice expression.
    ///
    /// # Panics
    ///
    /// Same as [`Term::dice`].
    pub fn dice(count: u32, sides: u32) -> Self {
        Self::new(Term::dice(count, sides))
    }

    /// Append a term.
    pub fn term(mut self, term: Term) -> Self {
        self.terms.push(term);
        self
    }

    /// Append a term only when `include` holds.
    pub fn term_if(self, include: bool, term: Term) -> Self {
        if include {
            self.term(term)
        } else {
            self
        }
    }

    /// All terms in order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Distinct tags in first-appearance order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.terms.iter().filter_map(Term::tag) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    /// Parse a formula string like "2d6 + 5[STR] - 5[GWM]" or "-1d4".
    ///
    /// Whitespace between terms is optional and the `d` is case-insensitive.
    /// A bare "dY" means one die.
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let mut rest = input.trim();
        if rest.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let mut sign = Sign::Plus;
        if let Some(after) = rest.strip_prefix('-') {
            sign = Sign::Minus;
            rest = after.trim_start();
        } else if let Some(after) = rest.strip_prefix('+') {
            rest = after.trim_start();
        }
        if rest.is_empty() {
            return Err(DiceParseError::DanglingSign);
        }

        let mut terms = Vec::new();
        loop {
            let (term, remaining) = parse_term(rest, sign)?;
            terms.push(term);
            rest = remaining.trim_start();

            let mut chars = rest.chars();
            sign = match chars.next() {
                None => break,
                Some('+') => Sign::Plus,
                Some('-') => Sign::Minus,
                Some(other) => {
                    return Err(DiceParseError::InvalidFormat(format!(
                        "Expected '+' or '-' before '{}'",
                        other
                    )))
                }
            };
            rest = chars.as_str().trim_start();
            if rest.is_empty() {
                return Err(DiceParseError::DanglingSign);
            }
        }

        Ok(Self { terms })
    }

    /// Format as the canonical display string.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

fn parse_term(input: &str, sign: Sign) -> Result<(Term, &str), DiceParseError> {
    let end = input
        .find(|c: char| c.is_whitespace() || matches!(c, '+' | '-' | '['))
        .unwrap_or(input.len());
    let (body, mut rest) = input.split_at(end);
    if body.is_empty() {
        return Err(DiceParseError::InvalidFormat(format!(
            "Expected a term in '{}'",
            input
        )));
    }
    let value = parse_value(body)?;

    let mut tag = None;
    if let Some(after) = rest.strip_prefix('[') {
        let close = after
            .find(']')
            .ok_or_else(|| DiceParseError::UnterminatedTag(after.to_string()))?;
        let text = &after[..close];
        if text.contains('[') {
            return Err(DiceParseError::UnterminatedTag(text.to_string()));
        }
        tag = Some(text.to_string());
        rest = &after[close + 1..];
    }

    Ok((Term { sign, value, tag }, rest))
}

fn parse_value(body: &str) -> Result<TermValue, DiceParseError> {
    let lower = body.to_lowercase();
    match lower.split_once('d') {
        Some((count_str, sides_str)) => {
            let count: u32 = if count_str.is_empty() {
                1 // "d20" means "1d20"
            } else {
                count_str.parse().map_err(|_| {
                    DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", count_str))
                })?
            };
            if count == 0 {
                return Err(DiceParseError::InvalidDiceCount);
            }
            let sides: u32 = sides_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", sides_str))
            })?;
            if sides < 2 {
                return Err(DiceParseError::InvalidDieSize);
            }
            Ok(TermValue::Dice { count, sides })
        }
        None => lower
            .parse()
            .map(TermValue::Flat)
            .map_err(|_| DiceParseError::InvalidFormat(format!("Invalid literal: '{}'", body))),
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            if index == 0 {
                if term.sign == Sign::Minus {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {} ", term.sign.symbol())?;
            }
            term.write_body(f)?;
        }
        Ok(())
    }
}

impl FromStr for DiceFormula {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DiceFormula {
    type Error = DiceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DiceFormula> for String {
    fn from(formula: DiceFormula) -> Self {
        formula.to_string()
    }
}

impl From<Term> for DiceFormula {
    fn from(term: Term) -> Self {
        Self::new(term)
    }
}

impl From<i32> for DiceFormula {
    fn from(value: i32) -> Self {
        Self::flat(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_base_only() {
        assert_eq!(DiceFormula::dice(2, 6).display(), "2d6");
        assert_eq!(DiceFormula::flat(70).display(), "70");
        assert_eq!(DiceFormula::flat(-3).display(), "-3");
    }

    #[test]
    fn test_display_tagged_chain() {
        let formula = DiceFormula::dice(2, 6)
            .term(Term::flat(5).tagged("STR"))
            .term(Term::flat(2).tagged("RAGE"))
            .term(Term::flat(10).tagged("GWM"));
        assert_eq!(formula.display(), "2d6 + 5[STR] + 2[RAGE] + 10[GWM]");
    }

    #[test]
    fn test_display_negative_terms() {
        let to_hit = DiceFormula::new(Term::flat(3).tagged("PB"))
            .term(Term::flat(5).tagged("STR"))
            .term(Term::flat(-5).tagged("GWM"));
        assert_eq!(to_hit.display(), "3[PB] + 5[STR] - 5[GWM]");

        let bane = DiceFormula::new(Term::dice(1, 4).negated());
        assert_eq!(bane.display(), "-1d4");
    }

    #[test]
    fn test_term_if_skips_excluded_terms() {
        let formula = DiceFormula::dice(1, 8)
            .term_if(false, Term::flat(2).tagged("Fighting Style"))
            .term_if(true, Term::dice(1, 8).tagged("IDS"));
        assert_eq!(formula.display(), "1d8 + 1d8[IDS]");
    }

    #[test]
    fn test_parse_canonical_roundtrip() {
        for text in [
            "2d6 + 5[STR] + 2[RAGE] + 1[WEAPON] + 10[GWM]",
            "3[PB] + 4[DEX] + 2[ARCHERY] - 5[SS]",
            "1d10 + 1d6[HEX] + 5[AB]",
            "-1d4",
            "70",
            "1d8 + 5[STR] + 2[Fighting Style] + 1d8[IDS]",
        ] {
            let formula = DiceFormula::parse(text).unwrap();
            assert_eq!(formula.display(), text);
        }
    }

    #[test]
    fn test_parse_compact_and_shorthand() {
        let formula = DiceFormula::parse("2d10+1d8[Arcane Firearm]").unwrap();
        assert_eq!(formula.display(), "2d10 + 1d8[Arcane Firearm]");

        let formula = DiceFormula::parse("D20-2").unwrap();
        assert_eq!(formula.terms()[0].value(), TermValue::Dice { count: 1, sides: 20 });
        assert_eq!(formula.terms()[1].sign(), Sign::Minus);
        assert_eq!(formula.terms()[1].value(), TermValue::Flat(2));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(DiceFormula::parse("   "), Err(DiceParseError::Empty)));
    }

    #[test]
    fn test_parse_invalid_zero_dice() {
        assert!(matches!(
            DiceFormula::parse("0d20"),
            Err(DiceParseError::InvalidDiceCount)
        ));
    }

    #[test]
    fn test_parse_invalid_die_size() {
        assert!(matches!(
            DiceFormula::parse("1d1"),
            Err(DiceParseError::InvalidDieSize)
        ));
    }

    #[test]
    fn test_parse_unterminated_tag() {
        assert!(matches!(
            DiceFormula::parse("1d6 + 3[STR"),
            Err(DiceParseError::UnterminatedTag(_))
        ));
    }

    #[test]
    fn test_parse_dangling_sign() {
        assert!(matches!(
            DiceFormula::parse("1d6 +"),
            Err(DiceParseError::DanglingSign)
        ));
        assert!(matches!(DiceFormula::parse("-"), Err(DiceParseError::DanglingSign)));
    }

    #[test]
    fn test_parse_missing_operator() {
        assert!(matches!(
            DiceFormula::parse("1d6 3"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_tags_are_distinct_in_order() {
        let formula = DiceFormula::parse("1[WEAPON] + 3[PB] + 1d6[HM] + 1[WEAPON]").unwrap();
        assert_eq!(formula.tags(), vec!["WEAPON", "PB", "HM"]);
    }

    #[test]
    fn test_serde_as_string() {
        let formula = DiceFormula::dice(8, 6);
        let json = serde_json::to_string(&formula).unwrap();
        assert_eq!(json, "\"8d6\"");
        let back: DiceFormula = serde_json::from_str("\"1d8 + 4\"").unwrap();
        assert_eq!(back, DiceFormula::dice(1, 8).term(Term::flat(4)));
        assert!(serde_json::from_str::<DiceFormula>("\"1d\"").is_err());
    }

    #[test]
    fn test_try_dice_rejects_what_parse_rejects() {
        assert_eq!(Term::try_dice(0, 6), Err(DiceParseError::InvalidDiceCount));
        assert_eq!(Term::try_dice(1, 1), Err(DiceParseError::InvalidDieSize));
        assert!(Term::try_dice(1, 2).is_ok());
    }

    #[test]
    fn test_try_tagged_rejects_brackets() {
        for tag in ["A]B", "[STR", "]"] {
            assert_eq!(
                Term::flat(3).try_tagged(tag),
                Err(DiceParseError::InvalidTag(tag.to_string()))
            );
        }
    }

    #[test]
    #[should_panic(expected = "malformed dice term 0d6")]
    fn test_dice_panics_on_zero_count() {
        let _ = Term::dice(0, 6);
    }

    #[test]
    #[should_panic(expected = "brackets")]
    fn test_tagged_panics_on_bracket() {
        let _ = Term::flat(3).tagged("A]B");
    }

    #[test]
    fn test_built_edge_cases_survive_json() {
        let formulas = [
            DiceFormula::new(Term::try_dice(1, 2).unwrap().try_tagged("").unwrap()),
            DiceFormula::flat(0).term(Term::flat(-7).try_tagged("Odd tag (x2)").unwrap()),
            DiceFormula::new(Term::try_dice(u32::MAX, u32::MAX).unwrap().negated()),
            DiceFormula::flat(i32::MIN),
        ];
        for formula in formulas {
            let json = serde_json::to_string(&formula).unwrap();
            let back: DiceFormula = serde_json::from_str(&json).unwrap();
            assert_eq!(back, formula, "{json}");
        }
    }
}
