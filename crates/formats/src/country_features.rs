use foundation::GeoPoint;
use serde_json::Value;

/// Closed boundary rings for one country, in degrees, GeoJSON axis order.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
}

impl Boundary {
    /// Outer ring used for centroid computation: the first ring of a
    /// polygon, or the first ring of a multi-polygon's first polygon.
    pub fn outer_ring(&self) -> Option<&[GeoPoint]> {
        match self {
            Boundary::Polygon(rings) => rings.first().map(Vec::as_slice),
            Boundary::MultiPolygon(polys) => polys
                .first()
                .and_then(|rings| rings.first())
                .map(Vec::as_slice),
        }
    }
}

/// One country: id, display name, boundary, and the statistic attached
/// during ingestion (0 until then).
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    pub iso_a2: String,
    pub name: String,
    pub boundary: Boundary,
    pub derived_stat: f64,
}

#[derive(Debug)]
pub enum FeatureParseError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for FeatureParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureParseError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            FeatureParseError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for FeatureParseError {}

/// Country features parsed from a GeoJSON FeatureCollection.
///
/// Each feature reads `properties.ISO_A2` and `properties.ADMIN` (both
/// default to empty strings) and a Polygon or MultiPolygon geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryCollection {
    pub features: Vec<CountryFeature>,
}

impl CountryCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, FeatureParseError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| FeatureParseError::InvalidFeature {
                index: 0,
                reason: format!("JSON parse error: {e}"),
            })?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, FeatureParseError> {
        let obj = value
            .as_object()
            .ok_or(FeatureParseError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FeatureParseError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FeatureParseError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(FeatureParseError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val
                .as_object()
                .ok_or(FeatureParseError::InvalidFeature {
                    index,
                    reason: "feature must be an object".to_string(),
                })?;

            let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
                FeatureParseError::InvalidFeature {
                    index,
                    reason: "feature missing type".to_string(),
                },
            )?;
            if feat_type != "Feature" {
                return Err(FeatureParseError::InvalidFeature {
                    index,
                    reason: format!("unexpected feature type: {feat_type}"),
                });
            }

            let props = feat_obj.get("properties").and_then(|v| v.as_object());
            let iso_a2 = props
                .and_then(|p| p.get("ISO_A2"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let name = props
                .and_then(|p| p.get("ADMIN"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            let geometry_val =
                feat_obj
                    .get("geometry")
                    .ok_or(FeatureParseError::InvalidFeature {
                        index,
                        reason: "feature missing geometry".to_string(),
                    })?;
            let boundary = parse_boundary(geometry_val)
                .map_err(|reason| FeatureParseError::InvalidFeature { index, reason })?;

            features.push(CountryFeature {
                iso_a2,
                name,
                boundary,
                derived_stat: 0.0,
            });
        }

        Ok(Self { features })
    }
}

fn parse_boundary(value: &Value) -> Result<Boundary, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok(Boundary::Polygon(parse_rings(coords)?)),
        "MultiPolygon" => Ok(Boundary::MultiPolygon(parse_polygons(coords)?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_position(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0]
        .as_f64()
        .ok_or("position lon must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or("position lat must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_position(item)?);
    }
    Ok(out)
}

fn parse_rings(coords: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_ring(ring)?);
    }
    Ok(out)
}

fn parse_polygons(coords: &Value) -> Result<Vec<Vec<Vec<GeoPoint>>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_rings(poly)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{Boundary, CountryCollection, FeatureParseError};
    use foundation::GeoPoint;

    fn polygon_feature(name: &str, iso: &str) -> String {
        format!(
            r#"{{"type":"Feature","properties":{{"ADMIN":"{name}","ISO_A2":"{iso}"}},
                "geometry":{{"type":"Polygon","coordinates":[[[0,0],[2,0],[2,2],[0,2],[0,0]]]}}}}"#
        )
    }

    #[test]
    fn parses_polygon_features() {
        let payload = format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            polygon_feature("Vulgaria", "VU")
        );
        let collection = CountryCollection::from_geojson_str(&payload).expect("parse");
        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.name, "Vulgaria");
        assert_eq!(feature.iso_a2, "VU");
        assert_eq!(feature.derived_stat, 0.0);
        assert!(matches!(feature.boundary, Boundary::Polygon(_)));
    }

    #[test]
    fn parses_multi_polygon_and_picks_first_outer_ring() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"ADMIN":"Syldavia","ISO_A2":"SY"},
             "geometry":{"type":"MultiPolygon","coordinates":[
                [[[10,10],[12,10],[12,12],[10,12],[10,10]]],
                [[[40,40],[41,40],[41,41],[40,41],[40,40]]]
             ]}}]}"#;
        let collection = CountryCollection::from_geojson_str(payload).expect("parse");
        let ring = collection.features[0].boundary.outer_ring().expect("outer ring");
        assert_eq!(ring[0], GeoPoint::new(10.0, 10.0));
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn missing_properties_default_to_empty() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature",
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}]}"#;
        let collection = CountryCollection::from_geojson_str(payload).expect("parse");
        assert_eq!(collection.features[0].iso_a2, "");
        assert_eq!(collection.features[0].name, "");
    }

    #[test]
    fn rejects_non_feature_collection() {
        let err = CountryCollection::from_geojson_str(r#"{"type":"Feature"}"#).unwrap_err();
        assert!(matches!(err, FeatureParseError::NotAFeatureCollection));
    }

    #[test]
    fn rejects_unsupported_geometry_with_index() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},
             "geometry":{"type":"Point","coordinates":[0,0]}}]}"#;
        let err = CountryCollection::from_geojson_str(payload).unwrap_err();
        match err {
            FeatureParseError::InvalidFeature { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("unsupported geometry type"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_coordinates() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},
             "geometry":{"type":"Polygon","coordinates":[[[0],[1,1]]]}}]}"#;
        let err = CountryCollection::from_geojson_str(payload).unwrap_err();
        assert!(matches!(
            err,
            FeatureParseError::InvalidFeature { index: 0, .. }
        ));
    }

    #[test]
    fn outer_ring_of_empty_polygon_is_none() {
        let boundary = Boundary::Polygon(Vec::new());
        assert_eq!(boundary.outer_ring(), None);
    }
}
