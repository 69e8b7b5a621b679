pub mod config;
pub mod error;
pub mod types;

pub use config::{load_project, parse_project_toml, parse_project_toml_str};
pub use error::{Error, Result};
pub use types::*;
