use log::error;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use crate::types::{BoundingBox, ImageRecord, OutputDirs, OutputRecord};
use crate::utils::create_output_directory;

// Input records are parsed with per-box leniency: a malformed box is
// reported against its record's path and dropped, instead of failing the
// whole annotation file.
#[derive(Debug, Deserialize)]
struct RawImageRecord {
    boxes: Vec<serde_yaml::Value>,
    path: String,
}

/// Read a BSTLD annotation file. Returns the parsed records together with
/// the number of malformed boxes that were dropped.
pub fn read_annotations(path: &Path) -> io::Result<(Vec<ImageRecord>, usize)> {
    let file = File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("failed to open annotation file {}: {}", path.display(), e),
        )
    })?;
    let raw_records: Vec<RawImageRecord> = serde_yaml::from_reader(BufReader::new(file))
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to parse annotation file {}: {}", path.display(), e),
            )
        })?;

    let mut malformed_boxes = 0;
    let records = raw_records
        .into_iter()
        .map(|raw| {
            let mut boxes = Vec::with_capacity(raw.boxes.len());
            for value in raw.boxes {
                match serde_yaml::from_value::<BoundingBox>(value) {
                    Ok(bx) => boxes.push(bx),
                    Err(e) => {
                        error!("Malformed box in record {}: {}", raw.path, e);
                        malformed_boxes += 1;
                    }
                }
            }
            ImageRecord {
                boxes,
                path: raw.path,
            }
        })
        .collect();

    Ok((records, malformed_boxes))
}

/// Write the rewritten annotation file once, after the whole batch is done.
pub fn write_annotations(path: &Path, records: &[OutputRecord]) -> io::Result<()> {
    let file = File::create(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("failed to create annotation file {}: {}", path.display(), e),
        )
    })?;
    serde_yaml::to_writer(BufWriter::new(file), records).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("failed to write annotation file {}: {}", path.display(), e),
        )
    })
}

/// Set up the output folder: cropped images go into a subfolder named after
/// the input file's stem, the rewritten annotation file sits next to it.
pub fn setup_output_directories(input_yaml: &Path, output_folder: &Path) -> io::Result<OutputDirs> {
    let file_name = input_yaml.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid annotation file name: {}", input_yaml.display()),
        )
    })?;
    let stem = input_yaml
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let subfolder = sanitize_filename::sanitize(stem);

    create_output_directory(output_folder)?;
    let images_dir = create_output_directory(&output_folder.join(&subfolder))?;

    Ok(OutputDirs {
        images_dir,
        annotation_path: output_folder.join(file_name),
        subfolder,
    })
}
