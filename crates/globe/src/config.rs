use serde::{Deserialize, Serialize};

/// Dark earth imagery served from the three-globe example CDN.
pub const DEFAULT_GLOBE_IMAGE_URL: &str =
    "//cdn.jsdelivr.net/npm/three-globe/example/img/earth-dark.jpg";
/// Fully transparent page background.
pub const DEFAULT_BACKGROUND_COLOR: &str = "rgba(0,0,0,0)";

/// Session options, loadable from camelCase JSON. Every field has a
/// default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(default)]
    pub skip_data_load: bool,
    #[serde(default = "default_true")]
    pub enable_interactions: bool,
    #[serde(default)]
    pub spawn_entities: bool,
    #[serde(default)]
    pub rng_seed: u64,
    #[serde(default = "default_globe_image_url")]
    pub globe_image_url: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            skip_data_load: false,
            enable_interactions: true,
            spawn_entities: false,
            rng_seed: 0,
            globe_image_url: DEFAULT_GLOBE_IMAGE_URL.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

fn default_true() -> bool {
    true
}

fn default_globe_image_url() -> String {
    DEFAULT_GLOBE_IMAGE_URL.to_string()
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

#[cfg(test)]
mod tests {
    use super::SessionConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SessionConfig::from_json("{}").expect("parse");
        assert_eq!(config, SessionConfig::default());
        assert!(config.enable_interactions);
        assert!(!config.spawn_entities);
    }

    #[test]
    fn camel_case_keys_are_honored() {
        let config = SessionConfig::from_json(
            r#"{"skipDataLoad":true,"enableInteractions":false,"spawnEntities":true,"rngSeed":99}"#,
        )
        .expect("parse");
        assert!(config.skip_data_load);
        assert!(!config.enable_interactions);
        assert!(config.spawn_entities);
        assert_eq!(config.rng_seed, 99);
        assert_eq!(config.globe_image_url, SessionConfig::default().globe_image_url);
    }

    #[test]
    fn serializes_back_to_camel_case() {
        let config = SessionConfig::default();
        let text = serde_json::to_string(&config).expect("serialize");
        assert!(text.contains("\"skipDataLoad\""));
        assert_eq!(SessionConfig::from_json(&text).expect("reparse"), config);
    }
}
