use formats::CountryFeature;
use foundation::{GeoPoint, Viewpoint, ring_centroid};

/// Camera altitude while a country is focused, in globe radii.
pub const FOCUS_ALTITUDE: f64 = 0.7;
/// Pose the camera returns to when focus is released.
pub const DEFAULT_VIEWPOINT: Viewpoint = Viewpoint::new(0.0, 0.0, 3.0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    EmptyBoundary { feature: String },
    NonFiniteBoundary { feature: String },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::EmptyBoundary { feature } => {
                write!(f, "feature {feature} has an empty outer ring")
            }
            GeometryError::NonFiniteBoundary { feature } => {
                write!(f, "feature {feature} has no finite boundary vertices")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Idle,
    Focused(String),
}

/// Camera transition a click resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Focus { target: Viewpoint, center: GeoPoint },
    Unfocus { target: Viewpoint },
}

/// Click-to-focus state machine.
///
/// Holds which country, if any, currently has focus and turns clicks
/// into camera transitions. It knows nothing about surfaces or tweens.
#[derive(Debug, Default)]
pub struct InteractionMachine {
    state: FocusState,
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn focused_id(&self) -> Option<&str> {
        match &self.state {
            FocusState::Idle => None,
            FocusState::Focused(id) => Some(id),
        }
    }

    /// Resolve a click on `feature`.
    ///
    /// Clicking the focused country releases focus; clicking any other
    /// country focuses it. The centroid is computed before any state
    /// change, so a malformed boundary aborts the whole transition,
    /// unfocus included.
    pub fn on_click(&mut self, feature: &CountryFeature) -> Result<ClickOutcome, GeometryError> {
        let center = feature_centroid(feature)?;
        let releasing = matches!(&self.state, FocusState::Focused(id) if *id == feature.iso_a2);
        if releasing {
            self.state = FocusState::Idle;
            Ok(ClickOutcome::Unfocus {
                target: DEFAULT_VIEWPOINT,
            })
        } else {
            self.state = FocusState::Focused(feature.iso_a2.clone());
            Ok(ClickOutcome::Focus {
                target: Viewpoint::new(center.lat_deg, center.lon_deg, FOCUS_ALTITUDE),
                center,
            })
        }
    }
}

/// Camera-targeting centroid of a feature's outer ring.
pub fn feature_centroid(feature: &CountryFeature) -> Result<GeoPoint, GeometryError> {
    let ring = feature.boundary.outer_ring().unwrap_or(&[]);
    if ring.is_empty() {
        return Err(GeometryError::EmptyBoundary {
            feature: feature.name.clone(),
        });
    }
    ring_centroid(ring).ok_or_else(|| GeometryError::NonFiniteBoundary {
        feature: feature.name.clone(),
    })
}
