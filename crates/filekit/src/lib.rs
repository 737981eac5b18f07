pub mod capabilities;
pub mod error;
pub mod grep;
pub mod platform;

pub use capabilities::fs::{
    PutOptions, exists, get_file, put_file, put_file_with_modifiers, search_file,
};
pub use capabilities::log::write_log;
pub use error::{Error, Result};
pub use grep::{GrepOptions, grep_file, grep_file_with, grep_reader};
pub use platform::path::{Layout, self_dir, self_path};
