pub mod config;
pub mod error;
pub mod fs_util;
pub mod genome;
pub mod importer;
pub mod metadata;
pub mod output;
pub mod sample;
