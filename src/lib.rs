//! BSTLD center-crop tool
//!
//! This library crops every image of a Bosch Small Traffic Lights dataset to
//! a fixed target resolution and rewrites the YAML annotations into the
//! crop's coordinate space, dropping boxes that no longer fit.

pub mod config;
pub mod crop;
pub mod dataset;
pub mod io;
pub mod taxonomy;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Args, IndexPolicy};
pub use crop::{CropWindow, FilterResult};
pub use dataset::{process_dataset, transform_record, RecordOutcome, SkipReason};
pub use io::{read_annotations, setup_output_directories, write_annotations};
pub use taxonomy::LightState;
pub use types::{
    BoundingBox, CroppedBox, ImageRecord, OutputDirs, OutputRecord, ProcessingStats,
};
