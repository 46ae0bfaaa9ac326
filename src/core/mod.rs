pub mod build;
pub mod source;
pub mod splicer;

pub use crate::domain::model::{BuildReport, LineSequence, Markers, MarkerPolicy, SourceResolution};
pub use crate::domain::ports::{Clock, Storage};
pub use crate::utils::error::Result;
