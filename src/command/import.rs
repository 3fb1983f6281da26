use crate::aoi::import::import_geojson;
use crate::aoi::AoiStore;
use crate::{Error, Result};
use std::fs::read_to_string;
use std::path::Path;

/// Usage: import <path to .geojson/.json>
pub fn run(args: &[String], store: &mut AoiStore) -> Result<()> {
    let path = match args.first() {
        Some(some) => some,
        None => Err(Error::CLI("No file path passed".into()))?,
    };
    let path = Path::new(path);
    let file_name = path
        .file_name()
        .and_then(|it| it.to_str())
        .ok_or(Error::CLI(format!("Invalid path: {path:?}")))?
        .to_string();
    let text = read_to_string(path)?;
    let report = import_geojson(&text, &file_name, store)?;
    println!(
        "Imported {} AOI(s) from {file_name}, skipped {}",
        report.imported, report.skipped
    );
    Ok(())
}
