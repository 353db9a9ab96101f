pub mod config;
pub mod fs;
pub mod stats;
pub mod sync;
pub mod transifex;
pub mod valid_langs;
