use super::add::parse_polygon;
use crate::aoi::AoiStore;
use crate::{Error, Result};

/// Usage: draw <lng,lat> <lng,lat> <lng,lat> ...
///
/// Stands in for the drawing collaborator: takes a completed vertex
/// sequence and stores it under a timestamp-based placeholder name.
pub fn run(args: &[String], store: &mut AoiStore) -> Result<()> {
    let geometry = parse_polygon(args)?;
    if geometry.len() < 3 {
        Err(Error::InvalidInput(
            "A polygon needs at least 3 vertices".into(),
        ))?
    }
    let aoi = store.add_drawn(geometry);
    println!("Added AOI {} ({})", aoi.name, aoi.id);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::mock_conn;

    #[test]
    fn names_the_drawn_aoi_after_the_current_time() -> Result<()> {
        let mut store = AoiStore::open(mock_conn());
        let args: Vec<String> = ["0,0", "1,0", "1,1"]
            .iter()
            .map(|it| it.to_string())
            .collect();
        run(&args, &mut store)?;
        assert_eq!(1, store.aois().len());
        assert!(store.aois()[0].name.starts_with("AOI "));
        Ok(())
    }
}
