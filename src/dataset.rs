use image::GenericImageView;
use log::{debug, error};
use std::io;
use std::path::Path;

use crate::config::{Args, IndexPolicy};
use crate::crop::CropWindow;
use crate::io::write_annotations;
use crate::types::{ImageRecord, OutputDirs, OutputRecord, ProcessingStats};
use crate::utils::create_progress_bar;

/// What happened to one input record. Skips and drops are ordinary
/// outcomes the batch keeps running through; an `Err` from the transform
/// aborts the batch.
#[derive(Debug)]
pub enum RecordOutcome {
    Retained(OutputRecord),
    DroppedEmpty,
    Skipped(SkipReason),
}

#[derive(Debug)]
pub enum SkipReason {
    UnreadableImage(String),
    SmallerThanCrop { width: u32, height: u32 },
}

/// Crop one record's image and relabel its boxes. `index` is the output
/// number this record uses if it is retained; the caller owns the
/// numbering sequence.
pub fn transform_record(
    record: &ImageRecord,
    base_dir: &Path,
    args: &Args,
    dirs: &OutputDirs,
    index: usize,
    stats: &mut ProcessingStats,
) -> io::Result<RecordOutcome> {
    let image_path = base_dir.join(&record.path);
    let image = match image::open(&image_path) {
        Ok(image) => image,
        Err(e) => {
            error!("Could not open image {}: {}", image_path.display(), e);
            return Ok(RecordOutcome::Skipped(SkipReason::UnreadableImage(
                e.to_string(),
            )));
        }
    };

    let (orig_width, orig_height) = image.dimensions();
    let window = match CropWindow::centered(orig_width, orig_height, args.width, args.height) {
        Some(window) => window,
        None => {
            error!(
                "Image {} is {}x{}, smaller than the {}x{} crop",
                image_path.display(),
                orig_width,
                orig_height,
                args.width,
                args.height
            );
            return Ok(RecordOutcome::Skipped(SkipReason::SmallerThanCrop {
                width: orig_width,
                height: orig_height,
            }));
        }
    };

    let filtered = window.filter_boxes(&record.boxes);
    stats.boxes_dropped_degenerate += filtered.dropped_degenerate;
    stats.boxes_dropped_outside += filtered.dropped_outside;
    if filtered.boxes.is_empty() {
        debug!("No boxes survived the crop for {}", record.path);
        return Ok(RecordOutcome::DroppedEmpty);
    }

    let file_name = format!("{:06}.png", index);
    let cropped = image.crop_imm(window.margin_left, window.margin_top, window.width, window.height);
    let output_path = dirs.images_dir.join(&file_name);
    cropped.save(&output_path).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("failed to write cropped image {}: {}", output_path.display(), e),
        )
    })?;

    Ok(RecordOutcome::Retained(OutputRecord {
        boxes: filtered.boxes,
        path: format!("./{}/{}", dirs.subfolder, file_name),
    }))
}

/// Main batch pipeline: transform every record in input order, aggregate
/// the outcomes, and write the rewritten annotation file at the end.
pub fn process_dataset(
    records: &[ImageRecord],
    malformed_boxes: usize,
    args: &Args,
    dirs: &OutputDirs,
) -> Result<ProcessingStats, Box<dyn std::error::Error>> {
    let base_dir = args
        .input_yaml
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let mut stats = ProcessingStats::new();
    stats.boxes_dropped_malformed = malformed_boxes;
    let mut retained: Vec<OutputRecord> = Vec::new();

    let pb = create_progress_bar(records.len() as u64, "Crop");
    for (position, record) in records.iter().enumerate() {
        stats.total_records += 1;
        let index = match args.index_policy {
            IndexPolicy::EveryRecord => position + 1,
            IndexPolicy::RetainedOnly => retained.len() + 1,
        };
        match transform_record(record, &base_dir, args, dirs, index, &mut stats)? {
            RecordOutcome::Retained(output) => {
                stats.retained_records += 1;
                for bx in &output.boxes {
                    stats.count_retained_box(&bx.label);
                }
                retained.push(output);
            }
            RecordOutcome::DroppedEmpty => stats.dropped_empty += 1,
            RecordOutcome::Skipped(SkipReason::UnreadableImage(_)) => {
                stats.skipped_unreadable += 1
            }
            RecordOutcome::Skipped(SkipReason::SmallerThanCrop { .. }) => {
                stats.skipped_too_small += 1
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Crop processing complete");

    write_annotations(&dirs.annotation_path, &retained)?;

    Ok(stats)
}
