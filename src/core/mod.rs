pub mod config;
pub mod extract;
pub mod log;
pub mod merge;
pub mod pipeline;
pub mod sequence;
pub mod volume;
