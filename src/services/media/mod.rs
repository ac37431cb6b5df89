pub mod manifest;

pub use manifest::{read_media_manifest, rename_media, MediaManifest};
