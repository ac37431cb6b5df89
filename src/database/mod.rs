pub mod models;
pub mod package_repo;
pub mod timestamp;
