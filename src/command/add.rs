use crate::aoi::{AoiStore, NewAoi, Polygon};
use crate::{Error, Result};

/// Usage: add <name> <lng,lat> <lng,lat> <lng,lat> ...
pub fn run(args: &[String], store: &mut AoiStore) -> Result<()> {
    let name = match args.first() {
        Some(some) => some,
        None => Err(Error::CLI("No name passed".into()))?,
    };
    let geometry = parse_polygon(&args[1..])?;
    if geometry.len() < 3 {
        Err(Error::InvalidInput(
            "A polygon needs at least 3 vertices".into(),
        ))?
    }
    let aoi = store.add(NewAoi::new(name, geometry));
    println!("Added AOI {} ({})", aoi.name, aoi.id);
    Ok(())
}

pub(super) fn parse_polygon(args: &[String]) -> Result<Polygon> {
    args.iter()
        .map(|arg| {
            let (lng, lat) = arg
                .split_once(',')
                .ok_or(Error::InvalidInput(format!("Invalid vertex: {arg}")))?;
            let lng = lng
                .trim()
                .parse()
                .map_err(|_| Error::InvalidInput(format!("Invalid longitude: {lng}")))?;
            let lat = lat
                .trim()
                .parse()
                .map_err(|_| Error::InvalidInput(format!("Invalid latitude: {lat}")))?;
            Ok([lng, lat])
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::mock_conn;

    #[test]
    fn adds_an_aoi_from_vertex_args() -> Result<()> {
        let mut store = AoiStore::open(mock_conn());
        let args: Vec<String> = ["Field", "0,0", "1,0", "1,1"]
            .iter()
            .map(|it| it.to_string())
            .collect();
        run(&args, &mut store)?;
        assert_eq!(1, store.aois().len());
        assert_eq!("Field", store.aois()[0].name);
        assert_eq!(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]], store.aois()[0].geometry);
        Ok(())
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let mut store = AoiStore::open(mock_conn());
        let args: Vec<String> = ["Field", "0,0", "x,0", "1,1"]
            .iter()
            .map(|it| it.to_string())
            .collect();
        assert!(run(&args, &mut store).is_err());
        assert!(store.aois().is_empty());
    }

    #[test]
    fn rejects_degenerate_polygons() {
        let mut store = AoiStore::open(mock_conn());
        let args: Vec<String> = ["Line", "0,0", "1,1"]
            .iter()
            .map(|it| it.to_string())
            .collect();
        assert!(run(&args, &mut store).is_err());
        assert!(store.aois().is_empty());
    }
}
