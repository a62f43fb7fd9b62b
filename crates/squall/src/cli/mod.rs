pub mod augment;
pub mod config;
