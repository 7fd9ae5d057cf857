//! Output location bookkeeping
//!
//! Computes where screenshots land on disk: a `Screenshots` directory
//! sibling to the host's data directory, with filenames derived from the
//! active scene name and a sub-second timestamp.

use crate::host::RenderHost;
use chrono::{DateTime, TimeZone};
use std::path::PathBuf;

/// Name of the screenshot directory created next to the host data directory.
pub const OUTPUT_DIR_NAME: &str = "Screenshots";

/// Resolve the output directory: `<parent-of-data-dir>/Screenshots`.
///
/// Pure function of the host environment; repeated calls within one process
/// return the same path. Does not touch the filesystem.
pub fn resolve_output_directory(host: &impl RenderHost) -> PathBuf {
    let data_dir = host.data_dir();
    match data_dir.parent() {
        Some(parent) => parent.join(OUTPUT_DIR_NAME),
        // Data dir at the filesystem root; nest under it instead.
        None => data_dir.join(OUTPUT_DIR_NAME),
    }
}

/// Build a screenshot filename: `<scene> - <YYYY.MM.DD - HH.mm.ss.ff>.png`.
///
/// The trailing `ff` is hundredths of a second. Two captures of the same
/// scene within the same hundredth produce the same name and the later write
/// wins; distinct ticks always produce distinct names.
pub fn build_filename<Tz: TimeZone>(scene_name: &str, at: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let hundredths = at.timestamp_subsec_millis() / 10;
    format!(
        "{} - {}.{:02}.png",
        scene_name,
        at.format("%Y.%m.%d - %H.%M.%S"),
        hundredths
    )
}
