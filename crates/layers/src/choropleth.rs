use formats::{CountryFeature, Dataset};
use foundation::Rgba;

/// Fill for countries with no recorded deaths.
pub const LOW_COLOR: Rgba = Rgba::opaque(0x00, 0x80, 0x00);
/// Fill for the country carrying the dataset maximum.
pub const HIGH_COLOR: Rgba = Rgba::opaque(0xff, 0x00, 0x00);
/// Extruded side faces, almost transparent white.
pub const SIDE_COLOR: Rgba = Rgba::new(0xff, 0xff, 0xff, 13);
/// Boundary stroke.
pub const STROKE_COLOR: Rgba = Rgba::opaque(0x11, 0x11, 0x11);

/// Position of `value` on the logarithmic ramp, in [0, 1].
///
/// Zero and negative values sit at 0, and a non-positive maximum pins
/// the whole ramp at 0.
pub fn ramp_position(value: f64, max_stat: f64) -> f64 {
    if value <= 0.0 || max_stat <= 0.0 {
        return 0.0;
    }
    ((1.0 + value).ln() / (1.0 + max_stat).ln()).clamp(0.0, 1.0)
}

/// Fill color for a statistic value against the dataset maximum.
pub fn color_for(value: f64, max_stat: f64) -> Rgba {
    if value <= 0.0 {
        return LOW_COLOR;
    }
    LOW_COLOR.lerp(HIGH_COLOR, ramp_position(value, max_stat))
}

/// Everything a rendering surface needs to draw one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureStyle {
    pub feature_id: String,
    pub fill: Rgba,
    pub side: Rgba,
    pub stroke: Rgba,
    pub label: String,
}

/// Styles for every feature in the dataset, in dataset order.
pub fn extract_styles(dataset: &Dataset) -> Vec<FeatureStyle> {
    dataset
        .features
        .iter()
        .map(|feature| FeatureStyle {
            feature_id: feature.iso_a2.clone(),
            fill: color_for(feature.derived_stat, dataset.max_stat),
            side: SIDE_COLOR,
            stroke: STROKE_COLOR,
            label: label_text(feature, dataset.latest_year),
        })
        .collect()
}

/// Two-line hover label: name and ISO code, then the statistic.
pub fn label_text(feature: &CountryFeature, latest_year: i32) -> String {
    format!(
        "{} ({})\nDeaths (latest year {}): {}",
        feature.name,
        feature.iso_a2,
        latest_year,
        format_stat(feature.derived_stat)
    )
}

fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FeatureStyle, HIGH_COLOR, LOW_COLOR, SIDE_COLOR, STROKE_COLOR, color_for, extract_styles,
        label_text, ramp_position,
    };
    use formats::{Boundary, CountryFeature, Dataset};

    fn feature(name: &str, iso: &str, stat: f64) -> CountryFeature {
        CountryFeature {
            iso_a2: iso.to_string(),
            name: name.to_string(),
            boundary: Boundary::Polygon(vec![vec![]]),
            derived_stat: stat,
        }
    }

    #[test]
    fn zero_and_negative_values_are_low_color() {
        assert_eq!(color_for(0.0, 1000.0), LOW_COLOR);
        assert_eq!(color_for(-3.0, 1000.0), LOW_COLOR);
    }

    #[test]
    fn maximum_value_is_high_color_exactly() {
        assert_eq!(color_for(1000.0, 1000.0), HIGH_COLOR);
    }

    #[test]
    fn non_positive_maximum_pins_ramp_at_zero() {
        assert_eq!(ramp_position(5.0, 0.0), 0.0);
        assert_eq!(color_for(5.0, 0.0), LOW_COLOR);
    }

    #[test]
    fn ramp_is_monotonic_in_value() {
        let max = 10_000.0;
        let mut last = ramp_position(0.0, max);
        for step in 1..=100 {
            let value = f64::from(step) * 100.0;
            let t = ramp_position(value, max);
            assert!(t >= last, "ramp went backwards at value {value}");
            last = t;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn colors_shift_from_green_to_red() {
        let max = 10_000.0;
        let low = color_for(10.0, max);
        let high = color_for(9_000.0, max);
        assert!(high.r > low.r);
        assert!(high.g < low.g);
    }

    #[test]
    fn label_shows_name_code_and_statistic() {
        let f = feature("Vulgaria", "VU", 95.0);
        assert_eq!(
            label_text(&f, 2021),
            "Vulgaria (VU)\nDeaths (latest year 2021): 95"
        );
    }

    #[test]
    fn label_keeps_fractional_statistics() {
        let f = feature("Vulgaria", "VU", 12.5);
        assert!(label_text(&f, 2021).ends_with("12.5"));
    }

    #[test]
    fn styles_cover_every_feature_in_order() {
        let dataset = Dataset {
            features: vec![feature("Vulgaria", "VU", 0.0), feature("Borduria", "BO", 340.0)],
            latest_year: 2021,
            max_stat: 340.0,
        };
        let styles = extract_styles(&dataset);
        assert_eq!(styles.len(), 2);
        assert_eq!(
            styles[0],
            FeatureStyle {
                feature_id: "VU".to_string(),
                fill: LOW_COLOR,
                side: SIDE_COLOR,
                stroke: STROKE_COLOR,
                label: "Vulgaria (VU)\nDeaths (latest year 2021): 0".to_string(),
            }
        );
        assert_eq!(styles[1].feature_id, "BO");
        assert_eq!(styles[1].fill, HIGH_COLOR);
    }
}
