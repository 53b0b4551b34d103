pub mod config;
pub mod dates;
pub mod export;
pub mod init;
pub mod log;
pub mod volume;
