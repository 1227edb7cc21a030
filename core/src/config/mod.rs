//! Boot configuration file handling.

pub mod parser;

pub use parser::{parse, ConfigEntry, ConfigParser};
