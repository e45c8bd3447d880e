//! Storage helpers for FAT media

pub mod fat;

pub use fat::{volume_usage, Block, BLOCK_LEN};
