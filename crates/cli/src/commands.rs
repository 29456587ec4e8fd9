//! Command-line parsing and command execution.

use anyhow::{bail, Context};
use dprsim_domain::{ClassOptions, Creature, DiceFormula, TemplateRegistry};
use serde::Serialize;

pub const USAGE: &str = "Usage: dprsim <command>

Commands:
  classes                                   List available classes
  build <class> <level> [options]           Print one creature as JSON
      --weapon-bonus <N>                    Magic weapon bonus
      --gwm                                 Great Weapon Master
      --ss                                  Sharpshooter
      --options <JSON>                      Option record as JSON
      --count <N>                           Number of identical copies
  party <level> <class>...                  Print one creature per class
  check-formula <formula>                   Parse and normalize a dice formula";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Classes,
    Build {
        class: String,
        level: u8,
        options: ClassOptions,
        count: u32,
    },
    Party {
        level: u8,
        classes: Vec<String>,
    },
    CheckFormula(String),
}

impl Command {
    pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        match args.next().as_deref() {
            Some("classes") => Ok(Command::Classes),
            Some("build") => parse_build(args),
            Some("party") => {
                let level = parse_level(args.next())?;
                let classes: Vec<String> = args.collect();
                if classes.is_empty() {
                    bail!("party needs at least one class\n\n{USAGE}");
                }
                Ok(Command::Party { level, classes })
            }
            Some("check-formula") => {
                let formula: Vec<String> = args.collect();
                if formula.is_empty() {
                    bail!("check-formula needs a formula\n\n{USAGE}");
                }
                Ok(Command::CheckFormula(formula.join(" ")))
            }
            Some(cmd) => bail!("Unknown command: {cmd}\n\n{USAGE}"),
            None => bail!("{USAGE}"),
        }
    }
}

fn parse_level(arg: Option<String>) -> anyhow::Result<u8> {
    let arg = arg.context("missing level")?;
    arg.parse()
        .with_context(|| format!("level must be a number between 1 and 20, got '{arg}'"))
}

fn parse_build(mut args: impl Iterator<Item = String>) -> anyhow::Result<Command> {
    let class = args.next().context("missing class")?;
    let level = parse_level(args.next())?;
    let mut options = ClassOptions::default();
    let mut count = 1;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--gwm" => options.gwm = true,
            "--ss" => options.ss = true,
            "--weapon-bonus" => {
                let value = args.next().context("--weapon-bonus needs a value")?;
                let bonus = value
                    .parse()
                    .with_context(|| format!("invalid weapon bonus '{value}'"))?;
                options.weapon_bonus = Some(bonus);
            }
            "--options" => {
                let json = args.next().context("--options needs a JSON object")?;
                options = ClassOptions::from_json(&json)?;
            }
            "--count" => {
                let value = args.next().context("--count needs a value")?;
                count = value
                    .parse()
                    .with_context(|| format!("invalid count '{value}'"))?;
            }
            other => bail!("Unknown flag for build: {other}"),
        }
    }

    Ok(Command::Build {
        class,
        level,
        options,
        count,
    })
}

#[derive(Debug, Serialize)]
struct ClassEntry<'a> {
    id: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormulaReport {
    canonical: String,
    tags: Vec<String>,
    terms: usize,
}

/// Run a command and return the JSON value to print.
pub fn run(command: Command, registry: &TemplateRegistry) -> anyhow::Result<serde_json::Value> {
    match command {
        Command::Classes => {
            let classes: Vec<ClassEntry> = registry
                .list_classes_with_names()
                .into_iter()
                .map(|(id, name)| ClassEntry { id, name })
                .collect();
            Ok(serde_json::to_value(classes)?)
        }
        Command::Build {
            class,
            level,
            options,
            count,
        } => {
            let creature = build(registry, &class, level, &options)?
                .with_count(count)
                .context("invalid --count")?;
            tracing::info!(class = %class, level, count, "generated creature");
            Ok(serde_json::to_value(creature)?)
        }
        Command::Party { level, classes } => {
            let party = classes
                .iter()
                .map(|class| build(registry, class, level, &ClassOptions::default()))
                .collect::<anyhow::Result<Vec<Creature>>>()?;
            tracing::info!(level, members = party.len(), "generated party");
            Ok(serde_json::to_value(party)?)
        }
        Command::CheckFormula(text) => {
            let formula = DiceFormula::parse(&text)
                .with_context(|| format!("could not parse '{text}'"))?;
            let report = FormulaReport {
                canonical: formula.to_string(),
                tags: formula.tags().into_iter().map(str::to_string).collect(),
                terms: formula.terms().len(),
            };
            Ok(serde_json::to_value(report)?)
        }
    }
}

fn build(
    registry: &TemplateRegistry,
    class: &str,
    level: u8,
    options: &ClassOptions,
) -> anyhow::Result<Creature> {
    registry
        .build(class, level, options)
        .with_context(|| format!("building {class} at level {level}"))
}
