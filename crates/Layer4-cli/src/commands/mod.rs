//! Leaf 명령 구현

pub mod config;
pub mod data;
pub mod domain;
pub mod files;
pub mod system;

pub use config::{ConfigGet, ConfigInit, ConfigSet};
pub use data::DataProfiles;
pub use domain::DomainRoot;
pub use files::FilesHead;
pub use system::{PluginCall, PluginInspect, SystemDoctor};
