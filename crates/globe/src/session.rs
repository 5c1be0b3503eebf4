use formats::{CountryFeature, DataFormatError, Dataset};
use foundation::{Millis, Viewpoint};
use layers::{extract_styles, spawn_markers};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::camera::CameraAnimator;
use crate::config::SessionConfig;
use crate::frame::FrameClock;
use crate::interaction::{ClickOutcome, FocusState, InteractionMachine};
use crate::surface::{RenderSurface, SurfaceError};

/// Opening camera pose, high above the prime meridian.
pub const INITIAL_VIEWPOINT: Viewpoint = Viewpoint::new(0.0, 0.0, 2.5);
/// Duration of every focus and unfocus flight.
pub const FLY_DURATION_MS: f64 = 2000.0;

/// Raw ingestion inputs: statistic CSV text and boundary GeoJSON text.
#[derive(Debug, Clone, Copy)]
pub struct DataSources<'a> {
    pub stat_table: &'a str,
    pub features_geojson: &'a str,
}

/// Invoked after every completed click transition, focus and unfocus
/// alike, with the clicked feature.
pub type CountryClickCallback = Box<dyn FnMut(&CountryFeature)>;

#[derive(Debug)]
pub enum SessionInitError {
    Data(DataFormatError),
    Surface(SurfaceError),
}

impl std::fmt::Display for SessionInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionInitError::Data(e) => write!(f, "data ingestion failed: {e}"),
            SessionInitError::Surface(e) => write!(f, "surface initialization failed: {e}"),
        }
    }
}

impl std::error::Error for SessionInitError {}

/// One interactive globe: a rendering surface plus everything driving it.
///
/// The session owns the surface, the ingested dataset, the focus state
/// machine, and the camera animator. It mutates the surface only through
/// [`RenderSurface`] calls and advances animation only from [`tick`],
/// so a headless surface sees the identical call sequence a real
/// backend would.
///
/// [`tick`]: Self::tick
pub struct GlobeSession<S: RenderSurface> {
    surface: S,
    config: SessionConfig,
    dataset: Option<Dataset>,
    machine: InteractionMachine,
    animator: CameraAnimator,
    clock: FrameClock,
    rng: ChaCha8Rng,
    on_country_click: Option<CountryClickCallback>,
}

impl<S: RenderSurface> GlobeSession<S> {
    /// Bring up a session: imagery, background, and the opening pose are
    /// applied immediately, then data is ingested and styled unless the
    /// config skips it, then interactivity is enabled when both the
    /// config and a loaded dataset allow it.
    pub fn initialize(
        mut surface: S,
        config: SessionConfig,
        sources: Option<DataSources<'_>>,
        on_country_click: Option<CountryClickCallback>,
    ) -> Result<Self, SessionInitError> {
        surface
            .set_globe_imagery(&config.globe_image_url)
            .map_err(SessionInitError::Surface)?;
        surface
            .set_background(&config.background_color)
            .map_err(SessionInitError::Surface)?;
        surface
            .set_viewpoint(INITIAL_VIEWPOINT)
            .map_err(SessionInitError::Surface)?;

        let dataset = match sources {
            Some(sources) if !config.skip_data_load => {
                let dataset = Dataset::ingest_geojson(sources.stat_table, sources.features_geojson)
                    .map_err(SessionInitError::Data)?;
                log::info!(
                    "ingested dataset: {} features, latest year {}, max stat {}",
                    dataset.features.len(),
                    dataset.latest_year,
                    dataset.max_stat
                );
                surface
                    .apply_feature_styles(&extract_styles(&dataset))
                    .map_err(SessionInitError::Surface)?;
                Some(dataset)
            }
            _ => None,
        };

        let interactive = config.enable_interactions && dataset.is_some();
        if interactive {
            surface
                .set_interactive(true)
                .map_err(SessionInitError::Surface)?;
        }
        log::info!(
            "globe session ready (interactions: {}, markers: {})",
            interactive,
            config.spawn_entities
        );

        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Ok(Self {
            surface,
            config,
            dataset,
            machine: InteractionMachine::new(),
            animator: CameraAnimator::new(),
            clock: FrameClock::new(),
            rng,
            on_country_click,
        })
    }

    /// Route a click on the feature with the given ISO code.
    ///
    /// Clicks are ignored when no dataset is loaded or the id is
    /// unknown. A click whose centroid cannot be computed is dropped
    /// whole: no focus change, no flight, no markers, no callback.
    pub fn handle_click(&mut self, feature_id: &str) -> Result<(), SurfaceError> {
        let dataset = match self.dataset.as_ref() {
            Some(dataset) => dataset,
            None => {
                log::debug!("click on {feature_id} ignored: no dataset loaded");
                return Ok(());
            }
        };
        let feature = match dataset.feature(feature_id) {
            Some(feature) => feature,
            None => {
                log::debug!("click on {feature_id} ignored: unknown feature");
                return Ok(());
            }
        };

        let outcome = match self.machine.on_click(feature) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("click on {feature_id} dropped: {e}");
                return Ok(());
            }
        };

        let current = self.surface.viewpoint();
        match outcome {
            ClickOutcome::Focus { target, center } => {
                log::debug!("focusing {feature_id}");
                self.animator.animate_to(current, target, FLY_DURATION_MS);
                if self.config.spawn_entities {
                    let markers = spawn_markers(center, &mut self.rng);
                    self.surface.set_markers(&markers)?;
                }
            }
            ClickOutcome::Unfocus { target } => {
                log::debug!("releasing focus from {feature_id}");
                self.animator.animate_to(current, target, FLY_DURATION_MS);
                if self.config.spawn_entities {
                    self.surface.clear_markers()?;
                }
            }
        }

        if let Some(callback) = self.on_country_click.as_mut() {
            callback(feature);
        }
        Ok(())
    }

    /// Advance the session clock and any active camera flight.
    pub fn tick(&mut self, now: Millis) -> Result<(), SurfaceError> {
        let frame = self.clock.advance(now);
        let was_animating = self.animator.is_animating();
        if let Some(pose) = self.animator.tick(frame.now) {
            self.surface.set_viewpoint(pose)?;
        }
        if was_animating && !self.animator.is_animating() {
            log::debug!("camera flight settled at frame {}", frame.index);
        }
        Ok(())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn focus(&self) -> &FocusState {
        self.machine.state()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }
}
