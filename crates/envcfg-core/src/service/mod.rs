//! Container-backed configuration services
//!
//! - `ConfigService`: the decoded `Environment`, fetched and parsed once per container
//! - `SectionService<T>`: one namespace decoded into `T`, built on the environment singleton

mod config_service;
mod section;

pub use config_service::ConfigService;
pub use section::SectionService;
