pub mod doctor;
pub mod toolchains;
