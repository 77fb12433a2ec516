//! CLI command implementations.

pub mod drinks;
pub mod export;
pub mod fav;
pub mod init;
pub mod log;
pub mod stats;
pub mod status;
pub mod undo;
pub mod util;
