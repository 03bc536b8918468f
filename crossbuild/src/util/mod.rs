pub mod host;
pub mod logging;
pub mod process;
pub mod tools_env;
