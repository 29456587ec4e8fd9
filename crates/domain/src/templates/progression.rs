//! Level-derived scalars shared by every class.

use crate::error::TemplateError;
use crate::value_objects::{scale, Level};

const PROFICIENCY_BONUS: [(u8, i32); 5] = [(1, 2), (5, 3), (9, 4), (13, 5), (17, 6)];

const CANTRIP_DICE: [(u8, u32); 4] = [(1, 1), (5, 2), (11, 3), (17, 4)];

/// Leveled spell uses per long rest for full casters.
const SPELL_USES: [(u8, u32); 9] = [
    (1, 1),
    (3, 2),
    (5, 3),
    (7, 4),
    (9, 5),
    (11, 6),
    (13, 7),
    (15, 8),
    (17, 9),
];

/// Proficiency bonus: +2 at level 1, +1 every four levels.
pub fn proficiency_bonus(level: Level) -> Result<i32, TemplateError> {
    scale(level, &PROFICIENCY_BONUS)
}

/// Average hit points: `level * (con + die/2) + die/2`.
///
/// Not rounded: fractional results are valid averages.
pub fn hit_points(level: Level, hit_die: u32, con: i32) -> f64 {
    let half_die = f64::from(hit_die) / 2.0;
    f64::from(level.get()) * (f64::from(con) + half_die) + half_die
}

/// Number of damage dice a cantrip rolls.
pub fn cantrip_dice(level: Level) -> Result<u32, TemplateError> {
    scale(level, &CANTRIP_DICE)
}

pub fn spell_uses(level: Level) -> Result<u32, TemplateError> {
    scale(level, &SPELL_USES)
}

pub fn spell_save_dc(proficiency: i32, ability: i32) -> i32 {
    8 + proficiency + ability
}

pub fn spell_attack(proficiency: i32, ability: i32) -> i32 {
    proficiency + ability
}

/// `Lv{level} {Class}`
pub fn display_name(level: Level, class: &str) -> String {
    format!("Lv{} {}", level, class)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lv(value: u8) -> Level {
        Level::new(value).unwrap()
    }

    #[test]
    fn proficiency_bonus_table() {
        let expected = [
            (1, 2),
            (4, 2),
            (5, 3),
            (8, 3),
            (9, 4),
            (12, 4),
            (13, 5),
            (16, 5),
            (17, 6),
            (20, 6),
        ];
        for (level, bonus) in expected {
            assert_eq!(proficiency_bonus(lv(level)).unwrap(), bonus, "level {level}");
        }
    }

    #[test]
    fn hit_points_average() {
        assert_eq!(hit_points(lv(1), 8, 2), 10.0);
        assert_eq!(hit_points(lv(5), 10, 3), 45.0);
        assert_eq!(hit_points(lv(20), 12, 7), 20.0 * 13.0 + 6.0);
    }

    #[test]
    fn cantrip_scaling() {
        assert_eq!(cantrip_dice(lv(4)).unwrap(), 1);
        assert_eq!(cantrip_dice(lv(5)).unwrap(), 2);
        assert_eq!(cantrip_dice(lv(11)).unwrap(), 3);
        assert_eq!(cantrip_dice(lv(20)).unwrap(), 4);
    }

    #[test]
    fn spell_numbers() {
        assert_eq!(spell_save_dc(2, 4), 14);
        assert_eq!(spell_attack(3, 5), 8);
        assert_eq!(spell_uses(lv(2)).unwrap(), 1);
        assert_eq!(spell_uses(lv(18)).unwrap(), 9);
    }

    #[test]
    fn names_follow_level_class_pattern() {
        assert_eq!(display_name(lv(5), "Fighter"), "Lv5 Fighter");
    }
}
