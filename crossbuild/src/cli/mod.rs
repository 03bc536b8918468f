mod types;

pub use types::Cli;
