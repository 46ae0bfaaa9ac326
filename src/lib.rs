pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{LocalStorage, SystemClock};
pub use crate::config::{SpliceSettings, TomlConfig};
pub use crate::core::build::BuildEngine;
pub use crate::core::splicer::{splice, split_document, SplitDocument};
pub use crate::domain::model::{BuildReport, MarkerPolicy, Markers, SourceResolution};
pub use crate::utils::error::{Result, SpliceError};
