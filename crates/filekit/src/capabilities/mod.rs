pub mod fs;
pub mod log;
