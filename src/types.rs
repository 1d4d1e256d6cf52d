use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::taxonomy::LightState;

// An annotated traffic light box in the source image's pixel space.
// Coordinates may be fractional (sub-pixel annotations) and carry no
// ordering guarantee between min and max. Fields beyond the known BSTLD
// ones are captured verbatim so they survive the rewrite untouched.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BoundingBox {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occluded: Option<bool>,
    pub x_max: f64,
    pub x_min: f64,
    pub y_max: f64,
    pub y_min: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

// A box translated into the crop's coordinate space. Invariant:
// x_max > x_min, y_max > y_min, and every coordinate lies strictly
// between 0 and the crop dimension.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CroppedBox {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occluded: Option<bool>,
    pub x_max: i64,
    pub x_min: i64,
    pub y_max: i64,
    pub y_min: i64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// One entry of the input annotation file: an image path and its boxes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageRecord {
    pub boxes: Vec<BoundingBox>,
    pub path: String,
}

/// One entry of the output annotation file, with the path rewritten to the
/// renumbered crop and only the surviving boxes kept.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputRecord {
    pub boxes: Vec<CroppedBox>,
    pub path: String,
}

// Struct to hold the output locations for one conversion run
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub images_dir: std::path::PathBuf,
    pub annotation_path: std::path::PathBuf,
    pub subfolder: String,
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub total_records: usize,
    pub retained_records: usize,
    pub skipped_unreadable: usize,
    pub skipped_too_small: usize,
    pub dropped_empty: usize,
    pub boxes_dropped_degenerate: usize,
    pub boxes_dropped_outside: usize,
    pub boxes_dropped_malformed: usize,
    pub retained_boxes_per_class: BTreeMap<&'static str, usize>,
    pub retained_boxes_unrecognized: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a surviving box against its canonical traffic light class.
    pub fn count_retained_box(&mut self, raw_label: &str) {
        match LightState::from_raw(raw_label) {
            Some(state) => *self.retained_boxes_per_class.entry(state.name()).or_insert(0) += 1,
            None => self.retained_boxes_unrecognized += 1,
        }
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Total records processed: {}", self.total_records);
        log::info!("Retained records: {}", self.retained_records);
        log::info!("Skipped (unreadable image): {}", self.skipped_unreadable);
        log::info!(
            "Skipped (image smaller than crop): {}",
            self.skipped_too_small
        );
        log::info!("Dropped (no surviving boxes): {}", self.dropped_empty);
        log::info!(
            "Boxes dropped: {} degenerate, {} outside crop, {} malformed",
            self.boxes_dropped_degenerate,
            self.boxes_dropped_outside,
            self.boxes_dropped_malformed
        );
        for (class, count) in &self.retained_boxes_per_class {
            log::info!("Retained {} boxes: {}", class, count);
        }
        if self.retained_boxes_unrecognized > 0 {
            log::warn!(
                "Retained boxes with unrecognized labels: {}",
                self.retained_boxes_unrecognized
            );
        }
    }
}
