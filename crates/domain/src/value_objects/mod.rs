//! Value objects - Immutable objects defined by their attributes

mod buff;
mod dice;
mod frequency;
mod level;

pub use buff::{Buff, BuffDuration, RiderEffect};
pub use dice::{DiceFormula, DiceParseError, Sign, Term, TermValue};
pub use frequency::{Frequency, RestType};
pub use level::{scale, Level, LevelScale, Unlocks};
