use crate::aoi::AoiStore;
use crate::geo_utils::{compute_area, format_area};
use crate::Result;

pub fn run(store: &AoiStore) -> Result<()> {
    let aois = store.filter("");
    if aois.is_empty() {
        println!("No AOIs");
        return Ok(());
    }
    for aoi in aois {
        // Metrics are derived on demand, never stored
        let area = format_area(compute_area(&aoi.geometry));
        println!("{}  {}  {}", aoi.id, aoi.name, area);
    }
    Ok(())
}
