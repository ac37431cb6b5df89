//! Decoder for Anki `.apkg` packages.
//!
//! Unpacks the archive, reads the collection database, and resolves every card
//! into a stylesheet plus front and back HTML. Writing the final document is
//! left to the caller.

pub mod database;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::config::ConvertOptions;
pub use services::pipeline::{convert_package, ResolvedPackage};
pub use services::render::RenderedCard;
pub use types::errors::{PackageError, PackageResult};
