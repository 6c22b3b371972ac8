//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&DbPool` as the first argument.

pub mod script_repo;
pub mod setting_repo;

pub use script_repo::ScriptRepo;
pub use setting_repo::SettingRepo;
