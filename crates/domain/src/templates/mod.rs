//! Player templates: level-scaled class builders and their registry.
//!
//! Each class registers under a lowercase token (e.g. "fighter"). Callers
//! discover the tokens through [`TemplateRegistry::list_classes`] and build
//! creatures with [`TemplateRegistry::build`].

pub mod classes;
mod monsters;
mod options;
mod progression;

pub use monsters::{require_monster, BuiltinMonsters, MonsterRegistry};
#[cfg(test)]
pub use monsters::MockMonsterRegistry;
pub use options::{ClassOptions, ModifierChain, PowerAttack};
pub use progression::{
    cantrip_dice, display_name, hit_points, proficiency_bonus, spell_attack, spell_save_dc,
    spell_uses,
};

use std::sync::Arc;

use crate::entities::Creature;
use crate::error::TemplateError;
use crate::value_objects::Level;

/// A class that can produce a player creature for any level.
pub trait PlayerTemplate: Send + Sync {
    /// Lowercase class token (e.g., "fighter").
    fn class_id(&self) -> &str;

    /// Human-readable class name (e.g., "Fighter").
    fn display_name(&self) -> &str;

    /// Build a fresh creature for the given level and options.
    fn build(&self, level: Level, options: &ClassOptions) -> Result<Creature, TemplateError>;
}

type BuildFn = fn(Level, &ClassOptions) -> Result<Creature, TemplateError>;

/// Template backed by a self-contained builder function.
pub struct ClassTemplate {
    class_id: &'static str,
    display_name: &'static str,
    build: BuildFn,
}

impl ClassTemplate {
    pub const fn new(class_id: &'static str, display_name: &'static str, build: BuildFn) -> Self {
        Self {
            class_id,
            display_name,
            build,
        }
    }
}

impl PlayerTemplate for ClassTemplate {
    fn class_id(&self) -> &str {
        self.class_id
    }

    fn display_name(&self) -> &str {
        self.display_name
    }

    fn build(&self, level: Level, options: &ClassOptions) -> Result<Creature, TemplateError> {
        (self.build)(level, options)
    }
}

/// The druid needs a monster registry for its wild-shape forms.
pub struct DruidTemplate {
    monsters: Arc<dyn MonsterRegistry>,
}

impl DruidTemplate {
    pub fn new(monsters: Arc<dyn MonsterRegistry>) -> Self {
        Self { monsters }
    }
}

impl PlayerTemplate for DruidTemplate {
    fn class_id(&self) -> &str {
        "druid"
    }

    fn display_name(&self) -> &str {
        "Druid"
    }

    fn build(&self, level: Level, options: &ClassOptions) -> Result<Creature, TemplateError> {
        classes::druid::build(level, options, self.monsters.as_ref())
    }
}

/// Registry of available player templates.
pub struct TemplateRegistry {
    templates: Vec<Arc<dyn PlayerTemplate>>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Create a registry with all built-in classes and the built-in monsters.
    pub fn new() -> Self {
        Self::with_monsters(Arc::new(BuiltinMonsters::new()))
    }

    /// Create a registry with all built-in classes, resolving wild-shape
    /// forms through `monsters`.
    pub fn with_monsters(monsters: Arc<dyn MonsterRegistry>) -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(ClassTemplate::new(
            "artificer",
            "Artificer",
            classes::artificer::build,
        )));
        registry.register(Arc::new(ClassTemplate::new(
            "barbarian",
            "Barbarian",
            classes::barbarian::build,
        )));
        registry.register(Arc::new(ClassTemplate::new("bard", "Bard", classes::bard::build)));
        registry.register(Arc::new(ClassTemplate::new(
            "cleric",
            "Cleric",
            classes::cleric::build,
        )));
        registry.register(Arc::new(DruidTemplate::new(monsters)));
        registry.register(Arc::new(ClassTemplate::new(
            "fighter",
            "Fighter",
            classes::fighter::build,
        )));
        registry.register(Arc::new(ClassTemplate::new("monk", "Monk", classes::monk::build)));
        registry.register(Arc::new(ClassTemplate::new(
            "paladin",
            "Paladin",
            classes::paladin::build,
        )));
        registry.register(Arc::new(ClassTemplate::new(
            "ranger",
            "Ranger",
            classes::ranger::build,
        )));
        registry.register(Arc::new(ClassTemplate::new("rogue", "Rogue", classes::rogue::build)));
        registry.register(Arc::new(ClassTemplate::new(
            "sorcerer",
            "Sorcerer",
            classes::sorcerer::build,
        )));
        registry.register(Arc::new(ClassTemplate::new(
            "warlock",
            "Warlock",
            classes::warlock::build,
        )));
        registry.register(Arc::new(ClassTemplate::new(
            "wizard",
            "Wizard",
            classes::wizard::build,
        )));
        registry
    }

    /// Create an empty registry without built-in classes.
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Register a template. A later registration shadows an earlier one
    /// with the same token.
    pub fn register(&mut self, template: Arc<dyn PlayerTemplate>) {
        self.templates.retain(|t| t.class_id() != template.class_id());
        self.templates.push(template);
    }

    /// Get a template by its class token.
    pub fn get(&self, class_id: &str) -> Option<Arc<dyn PlayerTemplate>> {
        self.templates
            .iter()
            .find(|t| t.class_id() == class_id)
            .cloned()
    }

    /// List all registered class tokens, in registration order.
    pub fn list_classes(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.class_id()).collect()
    }

    /// List all registered classes with their display names.
    pub fn list_classes_with_names(&self) -> Vec<(&str, &str)> {
        self.templates
            .iter()
            .map(|t| (t.class_id(), t.display_name()))
            .collect()
    }

    /// Build a creature by class token and raw level.
    pub fn build(
        &self,
        class_id: &str,
        level: u8,
        options: &ClassOptions,
    ) -> Result<Creature, TemplateError> {
        let level = Level::new(level)?;
        let template = self
            .get(class_id)
            .ok_or_else(|| TemplateError::unknown_class(class_id))?;
        template.build(level, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_all_classes_alphabetically() {
        let registry = TemplateRegistry::new();
        let classes = registry.list_classes();
        assert_eq!(classes.len(), 13);
        let mut sorted = classes.clone();
        sorted.sort_unstable();
        assert_eq!(classes, sorted);
        assert_eq!(classes[0], "artificer");
        assert_eq!(classes[12], "wizard");
    }

    #[test]
    fn display_names_match_creature_names() {
        let registry = TemplateRegistry::new();
        for (class_id, display) in registry.list_classes_with_names() {
            let creature = registry.build(class_id, 3, &ClassOptions::default()).unwrap();
            assert_eq!(creature.name(), format!("Lv3 {display}"));
        }
    }

    #[test]
    fn unknown_class_fails() {
        let err = TemplateRegistry::new()
            .build("necromancer", 5, &ClassOptions::default())
            .unwrap_err();
        assert_eq!(err, TemplateError::unknown_class("necromancer"));
    }

    #[test]
    fn level_is_validated_before_lookup() {
        let registry = TemplateRegistry::new();
        assert_eq!(
            registry.build("fighter", 0, &ClassOptions::default()).unwrap_err(),
            TemplateError::LevelOutOfRange(0)
        );
        assert_eq!(
            registry.build("necromancer", 21, &ClassOptions::default()).unwrap_err(),
            TemplateError::LevelOutOfRange(21)
        );
    }

    #[test]
    fn druid_uses_injected_monsters() {
        let mut monsters = MockMonsterRegistry::new();
        monsters.expect_get_monster().returning(|_| None);
        let registry = TemplateRegistry::with_monsters(Arc::new(monsters));
        let err = registry
            .build("druid", 2, &ClassOptions::default())
            .unwrap_err();
        assert_eq!(err, TemplateError::unknown_monster("Dire Wolf"));
        assert!(registry.build("fighter", 2, &ClassOptions::default()).is_ok());
    }

    #[test]
    fn register_replaces_existing_token() {
        let mut registry = TemplateRegistry::new();
        registry.register(Arc::new(ClassTemplate::new(
            "fighter",
            "Champion",
            classes::fighter::build,
        )));
        assert_eq!(registry.list_classes().len(), 13);
        let fighter = registry.get("fighter").unwrap();
        assert_eq!(fighter.display_name(), "Champion");
    }
}
