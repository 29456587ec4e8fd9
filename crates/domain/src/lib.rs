pub mod entities;
pub mod error;
pub mod ids;
pub mod templates;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Action, ActionKind, ActionSlot, ActivationCondition, Attack, Creature, CreatureMode, Heal,
    HealAmount, TargetRule,
};

pub use error::TemplateError;

// Re-export ID types
pub use ids::{ActionId, CreatureId};

// Re-export template registry and builder support
pub use templates::{
    cantrip_dice, display_name, hit_points, proficiency_bonus, require_monster, spell_attack,
    spell_save_dc, spell_uses, BuiltinMonsters, ClassOptions, ClassTemplate, DruidTemplate,
    ModifierChain, MonsterRegistry, PlayerTemplate, PowerAttack, TemplateRegistry,
};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    scale, Buff, BuffDuration, DiceFormula, DiceParseError, Frequency, Level, LevelScale,
    RestType, RiderEffect, Sign, Term, TermValue, Unlocks,
};
