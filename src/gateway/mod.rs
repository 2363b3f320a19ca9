pub mod habits;
pub mod profiles;
