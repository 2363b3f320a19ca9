pub mod habit;
pub mod profile;

pub use habit::{Habit, HabitInput};
pub use profile::{Profile, ProfileInput};
