pub mod assets;
pub mod config;
pub mod init;
pub mod validate;
