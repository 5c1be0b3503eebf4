use foundation::math::{Vec3, geo_to_render};
use foundation::{GeoPoint, Viewpoint};
use layers::{FeatureStyle, MarkerSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    Backend { reason: String },
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::Backend { reason } => write!(f, "rendering surface error: {reason}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Rendering backend the session drives.
///
/// The session owns a surface and issues every visual change through it.
/// Backends keep whatever GPU or DOM state they need behind this trait;
/// the session never touches backend state directly.
pub trait RenderSurface {
    fn set_globe_imagery(&mut self, url: &str) -> Result<(), SurfaceError>;

    fn set_background(&mut self, color: &str) -> Result<(), SurfaceError>;

    fn set_viewpoint(&mut self, viewpoint: Viewpoint) -> Result<(), SurfaceError>;

    fn viewpoint(&self) -> Viewpoint;

    fn apply_feature_styles(&mut self, styles: &[FeatureStyle]) -> Result<(), SurfaceError>;

    fn set_interactive(&mut self, interactive: bool) -> Result<(), SurfaceError>;

    fn set_markers(&mut self, markers: &MarkerSet) -> Result<(), SurfaceError>;

    fn clear_markers(&mut self) -> Result<(), SurfaceError>;

    /// Render-space position of a geographic point at the given altitude.
    fn project(&self, point: GeoPoint, altitude: f64) -> Vec3;
}

/// One recorded call on a [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    GlobeImagery(String),
    Background(String),
    SetViewpoint(Viewpoint),
    ApplyStyles { count: usize },
    SetInteractive(bool),
    SetMarkers { count: usize },
    ClearMarkers,
}

/// Surface that records calls instead of drawing.
///
/// Used by the command-line tools and by tests to observe exactly what
/// a session asked the backend to do.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    calls: Vec<SurfaceCall>,
    viewpoint: Viewpoint,
    styles: Vec<FeatureStyle>,
    markers: Option<MarkerSet>,
    interactive: bool,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            viewpoint: Viewpoint::new(0.0, 0.0, 0.0),
            styles: Vec::new(),
            markers: None,
            interactive: false,
        }
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn styles(&self) -> &[FeatureStyle] {
        &self.styles
    }

    pub fn markers(&self) -> Option<&MarkerSet> {
        self.markers.as_ref()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for HeadlessSurface {
    fn set_globe_imagery(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.calls.push(SurfaceCall::GlobeImagery(url.to_string()));
        Ok(())
    }

    fn set_background(&mut self, color: &str) -> Result<(), SurfaceError> {
        self.calls.push(SurfaceCall::Background(color.to_string()));
        Ok(())
    }

    fn set_viewpoint(&mut self, viewpoint: Viewpoint) -> Result<(), SurfaceError> {
        self.viewpoint = viewpoint;
        self.calls.push(SurfaceCall::SetViewpoint(viewpoint));
        Ok(())
    }

    fn viewpoint(&self) -> Viewpoint {
        self.viewpoint
    }

    fn apply_feature_styles(&mut self, styles: &[FeatureStyle]) -> Result<(), SurfaceError> {
        self.styles = styles.to_vec();
        self.calls.push(SurfaceCall::ApplyStyles {
            count: styles.len(),
        });
        Ok(())
    }

    fn set_interactive(&mut self, interactive: bool) -> Result<(), SurfaceError> {
        self.interactive = interactive;
        self.calls.push(SurfaceCall::SetInteractive(interactive));
        Ok(())
    }

    fn set_markers(&mut self, markers: &MarkerSet) -> Result<(), SurfaceError> {
        self.calls.push(SurfaceCall::SetMarkers {
            count: markers.len(),
        });
        self.markers = Some(markers.clone());
        Ok(())
    }

    fn clear_markers(&mut self) -> Result<(), SurfaceError> {
        self.markers = None;
        self.calls.push(SurfaceCall::ClearMarkers);
        Ok(())
    }

    fn project(&self, point: GeoPoint, altitude: f64) -> Vec3 {
        geo_to_render(point, altitude)
    }
}
