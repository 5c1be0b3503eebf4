use foundation::{GeoPoint, Rgba};
use rand::Rng;

/// Markers spawned per focused country.
pub const MARKER_COUNT: usize = 5;
/// Per-axis jitter around the country centroid, in degrees.
pub const JITTER_DEG: f64 = 0.15;

const HEAD_RADIUS: f64 = 0.02;
const HEAD_OFFSET: f64 = 0.06;
const BODY_RADIUS: f64 = 0.01;
const BODY_HEIGHT: f64 = 0.05;
const BODY_SEGMENTS: u32 = 8;

/// Pin geometry shared by every marker in a set: a sphere head sitting
/// on a cylinder body, in globe-radius units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerTemplate {
    pub color: Rgba,
    pub head_radius: f64,
    pub head_offset: f64,
    pub body_radius: f64,
    pub body_height: f64,
    pub body_segments: u32,
}

impl Default for MarkerTemplate {
    fn default() -> Self {
        Self {
            color: Rgba::opaque(0xff, 0x55, 0x55),
            head_radius: HEAD_RADIUS,
            head_offset: HEAD_OFFSET,
            body_radius: BODY_RADIUS,
            body_height: BODY_HEIGHT,
            body_segments: BODY_SEGMENTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: GeoPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSet {
    pub markers: Vec<Marker>,
    pub template: MarkerTemplate,
}

impl MarkerSet {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Spawn [`MARKER_COUNT`] markers jittered around `center`.
///
/// Each marker draws latitude jitter first, then longitude, so a seeded
/// generator reproduces the exact same set.
pub fn spawn_markers(center: GeoPoint, rng: &mut impl Rng) -> MarkerSet {
    let markers = (0..MARKER_COUNT)
        .map(|_| {
            let lat_deg = center.lat_deg + jitter(rng);
            let lon_deg = center.lon_deg + jitter(rng);
            Marker {
                position: GeoPoint { lon_deg, lat_deg },
            }
        })
        .collect();
    MarkerSet {
        markers,
        template: MarkerTemplate::default(),
    }
}

fn jitter(rng: &mut impl Rng) -> f64 {
    rng.gen_range(-JITTER_DEG..JITTER_DEG)
}
