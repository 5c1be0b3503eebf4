/// Geographic position in degrees, GeoJSON axis order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    pub fn is_finite(self) -> bool {
        self.lon_deg.is_finite() && self.lat_deg.is_finite()
    }
}

/// Camera pose over the globe. Altitude is in globe radii above the surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewpoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub altitude: f64,
}

impl Viewpoint {
    pub const fn new(lat_deg: f64, lon_deg: f64, altitude: f64) -> Self {
        Self {
            lat_deg,
            lon_deg,
            altitude,
        }
    }
}

/// Coordinate-average center of a closed ring.
///
/// Non-finite vertices are skipped. Returns `None` for an empty ring or a
/// ring with no finite vertices. This is the camera-targeting approximation,
/// not an area-weighted centroid.
pub fn ring_centroid(ring: &[GeoPoint]) -> Option<GeoPoint> {
    let mut lon_sum = 0.0;
    let mut lat_sum = 0.0;
    let mut count = 0.0_f64;
    for p in ring {
        if p.is_finite() {
            lon_sum += p.lon_deg;
            lat_sum += p.lat_deg;
            count += 1.0;
        }
    }
    if count <= 0.0 {
        return None;
    }
    Some(GeoPoint::new(lon_sum / count, lat_sum / count))
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, Viewpoint, ring_centroid};

    #[test]
    fn centroid_of_square_ring() {
        let ring = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(2.0, 0.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(0.0, 2.0),
        ];
        assert_eq!(ring_centroid(&ring), Some(GeoPoint::new(1.0, 1.0)));
    }

    #[test]
    fn centroid_of_empty_ring_is_none() {
        assert_eq!(ring_centroid(&[]), None);
    }

    #[test]
    fn centroid_skips_non_finite_vertices() {
        let ring = vec![
            GeoPoint::new(10.0, 20.0),
            GeoPoint::new(f64::NAN, 20.0),
            GeoPoint::new(30.0, 40.0),
        ];
        assert_eq!(ring_centroid(&ring), Some(GeoPoint::new(20.0, 30.0)));
    }

    #[test]
    fn centroid_of_all_non_finite_is_none() {
        let ring = vec![
            GeoPoint::new(f64::NAN, 0.0),
            GeoPoint::new(0.0, f64::INFINITY),
        ];
        assert_eq!(ring_centroid(&ring), None);
    }

    #[test]
    fn viewpoint_is_constructible_in_const_context() {
        const HOME: Viewpoint = Viewpoint::new(0.0, 0.0, 3.0);
        assert_eq!(HOME.altitude, 3.0);
    }
}
