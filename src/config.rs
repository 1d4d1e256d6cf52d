use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

use crate::taxonomy;

/// Command-line arguments for cropping a BSTLD annotation file and its images.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Path to the input annotation YAML file
    pub input_yaml: PathBuf,

    /// Folder for the cropped images and the rewritten annotation file
    pub output_folder: PathBuf,

    /// Target crop height in pixels
    #[arg(long = "height", default_value_t = taxonomy::HEIGHT, value_parser = validate_dimension)]
    pub height: u32,

    /// Target crop width in pixels
    #[arg(long = "width", default_value_t = taxonomy::WIDTH, value_parser = validate_dimension)]
    pub width: u32,

    /// How output file numbers are assigned across the batch
    #[arg(long = "index_policy", value_enum, default_value = "every-record")]
    pub index_policy: IndexPolicy,
}

// Enumeration for the output-numbering policy
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum IndexPolicy {
    /// Every input record consumes an index, even when it is skipped or
    /// dropped, leaving gaps in the output numbering
    EveryRecord,
    /// Only retained records consume an index, numbering output files
    /// densely from 1
    RetainedOnly,
}

// Validate that a crop dimension is a positive pixel count
fn validate_dimension(s: &str) -> Result<u32, String> {
    match u32::from_str(s) {
        Ok(val) if val > 0 => Ok(val),
        _ => Err("DIMENSION must be a positive integer".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimension() {
        assert_eq!(validate_dimension("720"), Ok(720));
        assert_eq!(validate_dimension("1"), Ok(1));
        assert!(validate_dimension("0").is_err());
        assert!(validate_dimension("-1").is_err());
        assert!(validate_dimension("abc").is_err());
    }
}
