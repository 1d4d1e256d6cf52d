use clap::Parser;
use log::{error, info};
use std::error::Error;
use std::process;

use bstld_crop::{
    process_dataset, read_annotations, setup_output_directories, Args, ProcessingStats,
};

fn run(args: &Args) -> Result<ProcessingStats, Box<dyn Error>> {
    let output_dirs = setup_output_directories(&args.input_yaml, &args.output_folder)?;
    let (records, malformed_boxes) = read_annotations(&args.input_yaml)?;
    info!(
        "Read {} records from {}",
        records.len(),
        args.input_yaml.display()
    );
    process_dataset(&records, malformed_boxes, args, &output_dirs)
}

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.input_yaml.exists() {
        error!(
            "The specified annotation file does not exist: {}",
            args.input_yaml.display()
        );
        process::exit(1);
    }

    info!(
        "Cropping {} to {}x{}...",
        args.input_yaml.display(),
        args.width,
        args.height
    );

    match run(&args) {
        Ok(stats) => stats.print_summary(),
        Err(e) => {
            error!("Failed to process dataset: {}", e);
            process::exit(1);
        }
    }
}
