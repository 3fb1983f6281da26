use crate::aoi::AoiStore;
use crate::geo_utils::{compute_area, compute_centroid, format_area};
use crate::{Error, Result};
use time::format_description::well_known::Rfc3339;

/// Usage: show <id>
pub fn run(args: &[String], store: &AoiStore) -> Result<()> {
    let id = match args.first() {
        Some(some) => some,
        None => Err(Error::CLI("No id passed".into()))?,
    };
    let aoi = store
        .aois()
        .iter()
        .find(|it| &it.id == id)
        .ok_or(Error::CLI(format!("No AOI with id {id}")))?;
    let [lng, lat] = compute_centroid(&aoi.geometry);
    println!("id:          {}", aoi.id);
    println!("name:        {}", aoi.name);
    if let Some(description) = &aoi.description {
        println!("description: {description}");
    }
    println!("vertices:    {}", aoi.geometry.len());
    println!("area:        {}", format_area(compute_area(&aoi.geometry)));
    println!("centroid:    {lng}, {lat}");
    println!("created at:  {}", aoi.created_at.format(&Rfc3339)?);
    if let Some(updated_at) = aoi.updated_at {
        println!("updated at:  {}", updated_at.format(&Rfc3339)?);
    }
    Ok(())
}
