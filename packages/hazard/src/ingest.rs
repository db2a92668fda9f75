//! Converts raw GeoJSON into a typed [`HazardCollection`].
//!
//! The document as a whole must be a JSON object with a `features` array.
//! Within it, every feature is kept; a feature whose geometry is missing,
//! malformed, or of an unsupported type is kept with `geometry: None` so
//! that it still counts towards dataset summaries but is never located.

use std::path::Path;

use geo::{Coord, Polygon};
use hazard_risk_hazard_models::{
    HazardCollection, HazardFeature, HazardGeometry, HazardProperties, UNKNOWN_STATUS,
    UNNAMED_FIRE,
};
use serde_json::{Map, Value};

use crate::HazardError;

/// Parses a GeoJSON `FeatureCollection` document.
///
/// # Errors
///
/// Returns [`HazardError`] if the document is not JSON or has no
/// `features` array. Problems inside individual features are not errors.
pub fn parse_feature_collection(body: &str) -> Result<HazardCollection, HazardError> {
    let json: Value = serde_json::from_str(body)?;

    let features = json["features"]
        .as_array()
        .ok_or_else(|| HazardError::Conversion {
            message: "No features array in hazard GeoJSON".to_string(),
        })?;

    Ok(normalize_features(features))
}

/// Converts raw GeoJSON features, preserving source order.
#[must_use]
pub fn normalize_features(features: &[Value]) -> HazardCollection {
    let mut without_geometry = 0usize;

    let features: Vec<HazardFeature> = features
        .iter()
        .map(|raw| {
            let feature = normalize_feature(raw);
            if feature.geometry.is_none() {
                without_geometry += 1;
            }
            feature
        })
        .collect();

    if without_geometry > 0 {
        log::warn!(
            "{without_geometry} of {} hazard feature(s) have no usable geometry and will not be located",
            features.len()
        );
    }

    HazardCollection::new(features)
}

/// Reads and parses a GeoJSON file.
///
/// # Errors
///
/// Returns [`HazardError`] if the file cannot be read or parsed.
pub fn load_from_path(path: &Path) -> Result<HazardCollection, HazardError> {
    let body = std::fs::read_to_string(path)?;
    let collection = parse_feature_collection(&body)?;
    log::info!(
        "Loaded {} hazard feature(s) from {}",
        collection.len(),
        path.display()
    );
    Ok(collection)
}

/// Downloads and parses a GeoJSON document.
///
/// # Errors
///
/// Returns [`HazardError`] if the request fails, the server responds with a
/// non-success status, or the body cannot be parsed.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<HazardCollection, HazardError> {
    let resp = client.get(url).send().await?;
    check_status(resp.status())?;
    let body = resp.text().await?;

    let collection = parse_feature_collection(&body)?;
    log::info!("Fetched {} hazard feature(s) from {url}", collection.len());
    Ok(collection)
}

fn check_status(status: reqwest::StatusCode) -> Result<(), HazardError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(HazardError::Status {
            status: status.as_u16(),
        })
    }
}

/// Loads a dataset from either an `http(s)://` URL or a local path.
///
/// # Errors
///
/// Returns [`HazardError`] if loading or parsing fails.
pub async fn load(client: &reqwest::Client, source: &str) -> Result<HazardCollection, HazardError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch(client, source).await
    } else {
        load_from_path(Path::new(source))
    }
}

fn normalize_feature(raw: &Value) -> HazardFeature {
    let empty = Map::new();
    let props = raw
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    HazardFeature {
        geometry: raw.get("geometry").and_then(parse_geometry),
        properties: resolve_properties(props),
    }
}

/// Resolves the BC Wildfire Service property bag into typed fields.
fn resolve_properties(props: &Map<String, Value>) -> HazardProperties {
    let name = text_property(props, "GEOGRAPHIC_DESCRIPTION")
        .or_else(|| text_property(props, "INCIDENT_NAME"))
        .unwrap_or_else(|| UNNAMED_FIRE.to_string());

    let status = text_property(props, "FIRE_STATUS").unwrap_or_else(|| UNKNOWN_STATUS.to_string());

    let size = number_property(props, "CURRENT_SIZE")
        .filter(|size| *size >= 0.0)
        .unwrap_or(0.0);

    #[allow(clippy::cast_possible_truncation)]
    let year = number_property(props, "FIRE_YEAR")
        .filter(|year| year.fract() == 0.0 && (1.0..=9999.0).contains(year))
        .map(|year| year as i32);

    HazardProperties {
        name,
        status,
        size,
        fire_number: text_property(props, "FIRE_NUMBER"),
        year,
        cause: text_property(props, "FIRE_CAUSE"),
        ignition_date: text_property(props, "IGNITION_DATE"),
        out_date: text_property(props, "FIRE_OUT_DATE"),
        detail_url: text_property(props, "FIRE_URL"),
    }
}

/// Reads a string (or number) property, treating blank strings as missing.
fn text_property(props: &Map<String, Value>, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a finite numeric property; numeric strings are accepted.
fn number_property(props: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match props.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

fn parse_geometry(raw: &Value) -> Option<HazardGeometry> {
    if raw.is_null() {
        return None;
    }

    let geometry = match geojson::Geometry::from_json_value(raw.clone()) {
        Ok(geometry) => geometry,
        Err(e) => {
            log::debug!("Skipping unparseable hazard geometry: {e}");
            return None;
        }
    };

    let geometry = match geo::Geometry::<f64>::try_from(geometry.value) {
        Ok(geometry) => geometry,
        Err(e) => {
            log::debug!("Skipping unconvertible hazard geometry: {e}");
            return None;
        }
    };

    match geometry {
        geo::Geometry::Point(point) => is_finite(point.0).then_some(HazardGeometry::Point(point)),
        geo::Geometry::Polygon(polygon) => {
            is_usable_polygon(&polygon).then_some(HazardGeometry::Polygon(polygon))
        }
        geo::Geometry::MultiPolygon(multi_polygon) => {
            let usable =
                !multi_polygon.0.is_empty() && multi_polygon.0.iter().all(is_usable_polygon);
            usable.then_some(HazardGeometry::MultiPolygon(multi_polygon))
        }
        _ => {
            log::debug!(
                "Skipping unsupported hazard geometry type {}",
                raw["type"].as_str().unwrap_or("unknown")
            );
            None
        }
    }
}

/// A polygon is usable when its closed exterior ring has at least four
/// coordinates (three corners) and every coordinate is finite.
fn is_usable_polygon(polygon: &Polygon<f64>) -> bool {
    polygon.exterior().0.len() >= 4
        && std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .all(|ring| ring.coords().copied().all(is_finite))
}

const fn is_finite(coord: Coord<f64>) -> bool {
    coord.x.is_finite() && coord.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn collection(features: &Value) -> HazardCollection {
        parse_feature_collection(&serde_json::json!({
            "type": "FeatureCollection",
            "features": features,
        })
        .to_string())
        .unwrap()
    }

    #[test]
    fn rejects_documents_without_features() {
        assert!(matches!(
            parse_feature_collection(r#"{"type":"FeatureCollection"}"#),
            Err(HazardError::Conversion { .. })
        ));
        assert!(matches!(
            parse_feature_collection("not json"),
            Err(HazardError::Json(_))
        ));
    }

    #[test]
    fn resolves_bc_wildfire_properties() {
        let hazards = collection(&serde_json::json!([{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-122.75, 53.91] },
            "properties": {
                "GEOGRAPHIC_DESCRIPTION": "Ness Lake",
                "INCIDENT_NAME": "G70422",
                "FIRE_STATUS": "Out of Control",
                "CURRENT_SIZE": 1250.5,
                "FIRE_NUMBER": "G70422",
                "FIRE_YEAR": 2024,
                "FIRE_CAUSE": "Lightning",
                "FIRE_URL": "https://wildfiresituation.nrs.gov.bc.ca/incidents?fireYear=2024&incidentNumber=G70422"
            }
        }]));

        let feature = &hazards.features[0];
        assert_eq!(feature.properties.name, "Ness Lake");
        assert_eq!(feature.properties.status, "Out of Control");
        assert!((feature.properties.size - 1250.5).abs() < f64::EPSILON);
        assert_eq!(feature.properties.fire_number.as_deref(), Some("G70422"));
        assert_eq!(feature.properties.year, Some(2024));
        assert_eq!(feature.properties.cause.as_deref(), Some("Lightning"));
        assert!(feature.properties.detail_url.is_some());
        assert!(matches!(feature.geometry, Some(HazardGeometry::Point(_))));
    }

    #[test]
    fn falls_back_for_missing_properties() {
        let hazards = collection(&serde_json::json!([
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-120.0, 50.0] },
                "properties": { "GEOGRAPHIC_DESCRIPTION": "  ", "INCIDENT_NAME": "Kookipi Creek" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-120.0, 50.0] },
                "properties": { "CURRENT_SIZE": "not a number" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-120.0, 50.0] }
            }
        ]));

        assert_eq!(hazards.features[0].properties.name, "Kookipi Creek");
        assert_eq!(hazards.features[1].properties.name, UNNAMED_FIRE);
        assert_eq!(hazards.features[1].properties.status, UNKNOWN_STATUS);
        assert!(hazards.features[1].properties.size.abs() < f64::EPSILON);
        assert_eq!(hazards.features[2].properties, HazardProperties::default());
    }

    #[test]
    fn accepts_numeric_strings_and_rejects_negative_size() {
        let hazards = collection(&serde_json::json!([
            {
                "type": "Feature",
                "geometry": null,
                "properties": { "CURRENT_SIZE": "42.5", "FIRE_YEAR": "2023" }
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": { "CURRENT_SIZE": -3 }
            }
        ]));

        assert!((hazards.features[0].properties.size - 42.5).abs() < f64::EPSILON);
        assert_eq!(hazards.features[0].properties.year, Some(2023));
        assert!(hazards.features[1].properties.size.abs() < f64::EPSILON);
    }

    #[test]
    fn keeps_features_with_malformed_geometry_without_locating_them() {
        let hazards = collection(&serde_json::json!([
            { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-120.0] }, "properties": {} },
            { "type": "Feature", "geometry": { "type": "Point" }, "properties": {} },
            { "type": "Feature", "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0]]] }, "properties": {} },
            { "type": "Feature", "geometry": { "type": "Polygon", "coordinates": [] }, "properties": {} },
            { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }, "properties": {} },
            { "type": "Feature", "geometry": { "type": "Blob", "coordinates": [0.0, 0.0] }, "properties": {} },
            { "type": "Feature", "properties": {} }
        ]));

        assert_eq!(hazards.len(), 7);
        assert!(hazards.features.iter().all(|f| f.geometry.is_none()));
    }

    #[test]
    fn parses_polygons_and_multi_polygons() {
        let square = serde_json::json!([[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]);
        let hazards = collection(&serde_json::json!([
            { "type": "Feature", "geometry": { "type": "Polygon", "coordinates": square }, "properties": {} },
            { "type": "Feature", "geometry": { "type": "MultiPolygon", "coordinates": [square, square] }, "properties": {} }
        ]));

        assert!(matches!(hazards.features[0].geometry, Some(HazardGeometry::Polygon(_))));
        match &hazards.features[1].geometry {
            Some(HazardGeometry::MultiPolygon(mp)) => assert_eq!(mp.0.len(), 2),
            other => panic!("expected multi-polygon, got {other:?}"),
        }
    }

    #[test]
    fn converts_polygon_rings_to_geo() {
        let hazards = collection(&serde_json::json!([{
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
            },
            "properties": {}
        }]));

        let expected = geo::polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        assert_eq!(
            hazards.features[0].geometry,
            Some(HazardGeometry::Polygon(expected))
        );
    }

    #[test]
    fn non_success_status_is_reported() {
        assert!(check_status(reqwest::StatusCode::OK).is_ok());

        let err = check_status(reqwest::StatusCode::NOT_FOUND).unwrap_err();
        assert!(matches!(err, HazardError::Status { status: 404 }));
        assert_eq!(
            err.to_string(),
            "Hazard GeoJSON request failed with status 404"
        );
    }
}
