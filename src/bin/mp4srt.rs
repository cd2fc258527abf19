use mp4srt::{extract_movie_facts, write_series, WalkerConfig};
use std::env;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: mp4srt <video_file_path> [-xml | -debug]");
        process::exit(1);
    }
    let video_path = &args[1];

    let extension = Path::new(video_path).extension().and_then(|e| e.to_str());
    if !matches!(extension, Some("mp4") | Some("MP4")) {
        eprintln!("Please provide a valid MP4 video file path.");
        process::exit(1);
    }

    let mut config = WalkerConfig::default();
    for option in &args[2..] {
        match option.as_str() {
            "-xml" => config.metadata_only = true,
            "-debug" => config.verbose = true,
            other => eprintln!("Ignoring unknown option: {}", other),
        }
    }

    // Library logs flow through the subscriber; -xml keeps output to the
    // XML text alone.
    let default_level = if config.verbose {
        "debug"
    } else if config.metadata_only {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    if !config.metadata_only {
        println!("Reading video file: {}", video_path);
    }

    let facts = match extract_movie_facts(video_path, &config) {
        Ok(facts) => facts,
        Err(e) => {
            eprintln!("Failed to open {}: {}", video_path, e);
            process::exit(1);
        }
    };

    if config.metadata_only {
        if let Some(xml) = &facts.xml_metadata {
            println!("{}", xml);
        }
        return;
    }

    if let Some(brand) = &facts.major_brand {
        println!("MP4 Major Brand: {}", brand);
    }
    if let Some(header) = &facts.movie_header {
        if let Some(timestamp) = header.first_timestamp() {
            println!("First timestamp: {}", timestamp);
        }
        println!("File duration: {} seconds", header.duration_seconds);
    }
    if facts.has_xml_metadata {
        println!("This file contains additional data in XML.");
    }

    if !facts.timecodes.is_empty() {
        match write_series(video_path, &facts.timecodes) {
            Ok(srt_path) => println!("Timecodes written to {}", srt_path.display()),
            Err(e) => eprintln!("{}", e),
        }
    }

    println!("Finished reading {}", video_path);
}
