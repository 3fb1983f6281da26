use crate::aoi::{Point, Polygon};

/// Earth's equatorial radius in meters. The area formula treats the Earth as
/// a sphere of this radius, which is accurate enough for AOI-scale polygons.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Computes polygon area in square meters using the spherical excess formula.
///
/// The ring doesn't need to repeat its first point, closure is implicit.
/// Winding order doesn't matter since the result is taken as an absolute
/// value. Polygons with fewer than 3 vertices are degenerate and have
/// zero area.
pub fn compute_area(polygon: &Polygon) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let points: Vec<(f64, f64)> = polygon
        .iter()
        .map(|[lng, lat]| (lng.to_radians(), lat.to_radians()))
        .collect();

    let mut area = 0.0;

    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        let (lng_i, lat_i) = points[i];
        let (lng_j, lat_j) = points[j];
        area += (lng_j - lng_i) * (2.0 + lat_i.sin() + lat_j.sin());
    }

    (area * EARTH_RADIUS_M * EARTH_RADIUS_M).abs() / 2.0
}

/// Computes the vertex centroid: the arithmetic mean of all vertices.
///
/// This is intentionally not the area-weighted centroid. Display code relies
/// on the vertex-average semantics, don't swap in the textbook formula.
pub fn compute_centroid(polygon: &Polygon) -> Point {
    let n = polygon.len();
    if n == 0 {
        return [0.0, 0.0];
    }

    let mut x = 0.0;
    let mut y = 0.0;

    for [lng, lat] in polygon {
        x += lng;
        y += lat;
    }

    [x / n as f64, y / n as f64]
}

/// Formats an area in square meters as a human-readable string, picking
/// m², ha or km² by magnitude.
pub fn format_area(area: f64) -> String {
    if area < 10_000.0 {
        format!("{:.2} m²", area)
    } else if area < 1_000_000.0 {
        format!("{:.2} ha", area / 10_000.0)
    } else {
        format!("{:.2} km²", area / 1_000_000.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn area_of_degenerate_polygons_is_zero() {
        assert_eq!(0.0, compute_area(&vec![]));
        assert_eq!(0.0, compute_area(&vec![[13.4, 52.5]]));
        assert_eq!(0.0, compute_area(&vec![[13.4, 52.5], [13.5, 52.6]]));
    }

    #[test]
    fn area_of_one_degree_square_near_berlin() {
        let square = vec![
            [13.0, 52.0],
            [14.0, 52.0],
            [14.0, 53.0],
            [13.0, 53.0],
            [13.0, 52.0],
        ];
        let area = compute_area(&square);
        assert!(area > 5_000_000_000.0, "area too small: {area}");
        assert!(area < 10_000_000_000.0, "area too large: {area}");
    }

    #[test]
    fn area_ignores_winding_order() {
        let ccw = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let cw: Vec<_> = ccw.iter().rev().cloned().collect();
        let diff = (compute_area(&ccw) - compute_area(&cw)).abs();
        assert!(diff < 1e-3, "winding order changed the area by {diff}");
    }

    #[test]
    fn area_does_not_require_explicit_closure() {
        let open = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let mut closed = open.clone();
        closed.push(open[0]);
        assert_eq!(compute_area(&open), compute_area(&closed));
    }

    #[test]
    fn centroid_of_empty_polygon_is_origin() {
        assert_eq!([0.0, 0.0], compute_centroid(&vec![]));
    }

    #[test]
    fn centroid_of_square() {
        let square = vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];
        assert_eq!([1.0, 1.0], compute_centroid(&square));
    }

    #[test]
    fn centroid_of_triangle() {
        let triangle = vec![[0.0, 0.0], [3.0, 0.0], [1.5, 3.0]];
        assert_eq!([1.5, 1.0], compute_centroid(&triangle));
    }

    #[test]
    fn centroid_of_one_or_two_points_is_their_mean() {
        assert_eq!([13.4, 52.5], compute_centroid(&vec![[13.4, 52.5]]));
        assert_eq!(
            [1.0, 2.0],
            compute_centroid(&vec![[0.0, 0.0], [2.0, 4.0]]),
        );
    }

    #[test]
    fn format_area_picks_unit_by_magnitude() {
        assert_eq!("100.00 m²", format_area(100.0));
        assert_eq!("9999.99 m²", format_area(9999.99));
        assert_eq!("1.00 ha", format_area(10_000.0));
        assert_eq!("99.99 ha", format_area(999_900.0));
        assert_eq!("1.00 km²", format_area(1_000_000.0));
        assert_eq!("2.50 km²", format_area(2_500_000.0));
    }

    #[test]
    fn format_area_rounds_up_at_the_ha_boundary() {
        // 999999 m² is still in the ha tier but rounds to 100.00
        assert_eq!("100.00 ha", format_area(999_999.0));
    }
}
