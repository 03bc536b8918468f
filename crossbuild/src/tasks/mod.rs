pub mod cross;
pub mod tooling;
