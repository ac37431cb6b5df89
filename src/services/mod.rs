pub mod archive;
pub mod collection_config;
pub mod config;
pub mod fs_utils;
pub mod media;
pub mod pipeline;
pub mod render;
