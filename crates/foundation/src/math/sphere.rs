use super::Vec3;
use crate::geo::GeoPoint;

/// Globe radius in render space.
pub const GLOBE_RADIUS: f64 = 1.0;

/// Projects a geographic coordinate onto the render-space globe.
///
/// Altitude is in globe radii above the surface, the same convention as
/// `Viewpoint`: altitude 0 lies on the surface. The frame is y-up with the
/// north pole at +y; the prime meridian at the equator maps to +z.
pub fn geo_to_render(point: GeoPoint, altitude: f64) -> Vec3 {
    let phi = (90.0 - point.lat_deg).to_radians();
    let theta = (90.0 - point.lon_deg).to_radians();
    let sin_phi = phi.sin();
    let cos_phi = phi.cos();
    let sin_theta = theta.sin();
    let cos_theta = theta.cos();

    let r = GLOBE_RADIUS * (1.0 + altitude);
    Vec3::new(r * sin_phi * cos_theta, r * cos_phi, r * sin_phi * sin_theta)
}

#[cfg(test)]
mod tests {
    use super::{GLOBE_RADIUS, geo_to_render};
    use crate::geo::GeoPoint;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn north_pole_maps_to_plus_y() {
        let v = geo_to_render(GeoPoint::new(0.0, 90.0), 0.0);
        assert_close(v.x, 0.0, 1e-12);
        assert_close(v.y, GLOBE_RADIUS, 1e-12);
        assert_close(v.z, 0.0, 1e-12);
    }

    #[test]
    fn equator_prime_meridian_maps_to_plus_z() {
        let v = geo_to_render(GeoPoint::new(0.0, 0.0), 0.0);
        assert_close(v.x, 0.0, 1e-12);
        assert_close(v.y, 0.0, 1e-12);
        assert_close(v.z, GLOBE_RADIUS, 1e-12);
    }

    #[test]
    fn equator_90e_maps_to_plus_x() {
        let v = geo_to_render(GeoPoint::new(90.0, 0.0), 0.0);
        assert_close(v.x, GLOBE_RADIUS, 1e-12);
        assert_close(v.y, 0.0, 1e-12);
        assert_close(v.z, 0.0, 1e-12);
    }

    #[test]
    fn altitude_scales_radius() {
        let v = geo_to_render(GeoPoint::new(12.0, 34.0), 1.5);
        assert_close(v.length(), 2.5 * GLOBE_RADIUS, 1e-12);
    }

    #[test]
    fn surface_points_have_unit_length() {
        let v = geo_to_render(GeoPoint::new(-123.4, 56.7), 0.0);
        assert_close(v.length(), GLOBE_RADIUS, 1e-12);
    }
}
