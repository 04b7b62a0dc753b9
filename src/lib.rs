pub mod cli;
pub mod errors;
pub mod providers;
pub mod skills;
