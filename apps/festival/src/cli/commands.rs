//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::{Config, OutputFormat};
use festival_core::{
    FestivalError, LineParser, Schedule, ScheduleMetrics, ScheduleReport, Show, StageAllocator,
    primitives::MAX_INPUT_BYTES, render_text, verify_schedule,
};
use std::io::Read;
use std::path::{Path, PathBuf};

// =============================================================================
// INPUT ACQUISITION
// =============================================================================

/// Validate file path before reading.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it is a
/// regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, FestivalError> {
    let canonical = path.canonicalize().map_err(|e| {
        FestivalError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(FestivalError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), FestivalError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| FestivalError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(FestivalError::InputTooLarge {
            size: metadata.len(),
            limit: max_size,
        });
    }
    Ok(())
}

/// Read raw input from `file`, or from standard input when `None`.
pub fn read_input(file: Option<&Path>) -> Result<String, FestivalError> {
    match file {
        Some(path) => {
            let validated = validate_file_path(path)?;
            validate_file_size(&validated, MAX_INPUT_BYTES)?;
            tracing::info!("Reading shows from {}", validated.display());

            std::fs::read_to_string(&validated)
                .map_err(|e| FestivalError::IoError(format!("Read file: {}", e)))
        }
        None => {
            tracing::info!("Reading shows from standard input");

            let mut contents = String::new();
            std::io::stdin()
                .lock()
                .take(MAX_INPUT_BYTES.saturating_add(1))
                .read_to_string(&mut contents)
                .map_err(|e| FestivalError::IoError(format!("Read stdin: {}", e)))?;

            let size = contents.len() as u64;
            if size > MAX_INPUT_BYTES {
                return Err(FestivalError::InputTooLarge {
                    size,
                    limit: MAX_INPUT_BYTES,
                });
            }
            Ok(contents)
        }
    }
}

/// Read and parse shows according to `config`.
pub fn load_shows(file: Option<&Path>, config: &Config) -> Result<Vec<Show>, FestivalError> {
    let contents = read_input(file)?;
    let parser = LineParser::with_comment_marker(config.comment_marker.as_str());
    let shows = parser.parse_str(&contents)?;
    tracing::debug!("Parsed {} shows", shows.len());
    Ok(shows)
}

/// Allocate stages for `shows`, verifying the result when configured.
pub fn build_schedule(shows: &[Show], config: &Config) -> Result<Schedule, FestivalError> {
    let schedule = StageAllocator::with_policy(config.reuse_policy).allocate(shows);
    tracing::debug!(
        "Allocated {} shows onto {} stages ({})",
        schedule.show_count(),
        schedule.stage_count(),
        config.reuse_policy
    );

    if config.verify {
        verify_schedule(shows, &schedule)?;
        tracing::info!("Schedule verified: valid and minimal");
    }

    Ok(schedule)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), FestivalError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| FestivalError::SerializationError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// SCHEDULE COMMAND
// =============================================================================

/// Assign shows to stages and print the report.
pub fn cmd_schedule(file: Option<&Path>, config: &Config) -> Result<(), FestivalError> {
    let shows = load_shows(file, config)?;
    let schedule = build_schedule(&shows, config)?;

    match config.output {
        OutputFormat::Json => print_json(&ScheduleReport::from(&schedule)),
        OutputFormat::Text => {
            print!("{}", render_text(&schedule));
            Ok(())
        }
    }
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Validate input without scheduling.
pub fn cmd_check(file: Option<&Path>, config: &Config) -> Result<(), FestivalError> {
    let shows = load_shows(file, config)?;

    match config.output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "valid": true,
            "show_count": shows.len()
        })),
        OutputFormat::Text => {
            println!("OK: {} shows", shows.len());
            Ok(())
        }
    }
}

// =============================================================================
// STATS COMMAND
// =============================================================================

/// Print schedule metrics.
pub fn cmd_stats(file: Option<&Path>, config: &Config) -> Result<(), FestivalError> {
    let shows = load_shows(file, config)?;
    let schedule = build_schedule(&shows, config)?;
    let metrics = ScheduleMetrics::from_schedule(&schedule);

    if config.output == OutputFormat::Json {
        return print_json(&metrics);
    }

    println!("Festival Schedule Metrics");
    println!("=========================");
    println!("Shows:         {}", metrics.show_count);
    println!("Stages:        {}", metrics.stage_count);
    println!("Overlap Depth: {}", metrics.overlap_depth);

    if let (Some(start), Some(end)) = (metrics.earliest_start, metrics.latest_end) {
        match metrics.span() {
            Some(span) => println!("Period:        {} - {} ({} units)", start, end, span),
            None => println!("Period:        {} - {}", start, end),
        }
    }
    if let Some(stage) = metrics.busiest_stage {
        println!(
            "Busiest Stage: {} ({} shows)",
            stage, metrics.busiest_stage_shows
        );
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
