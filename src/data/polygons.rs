use crate::error::DataError;
use crate::province::normalize_province;
use geojson::{Geometry, JsonObject, Value};
use serde::Deserialize;
use std::collections::BTreeMap;

/// An ordered sequence of (longitude, latitude) pairs
pub type Ring = Vec<(f64, f64)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
}

/// Raw ring nesting of a province geometry, as delivered upstream
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProvincePolygon {
    pub province: String,
    pub shape: Shape,
}

impl ProvincePolygon {
    pub fn kind(&self) -> GeometryKind {
        match self.shape {
            Shape::Polygon(_) => GeometryKind::Polygon,
            Shape::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Rings that get drawn: the first ring of every polygon entry.
    /// Holes are not modelled, so donut-shaped provinces render solid.
    pub fn outlines(&self) -> Vec<&Ring> {
        match &self.shape {
            Shape::Polygon(rings) => rings.first().into_iter().collect(),
            Shape::MultiPolygon(polygons) => polygons.iter().filter_map(|rings| rings.first()).collect(),
        }
    }
}

/// Boundary payload as served upstream: `{"features": [{"properties": {"name": ..},
/// "geometry": {..}}]}`. The `"type"` tags of the collection and its features
/// are optional; only the geometry objects must be valid GeoJSON.
#[derive(Debug, Default, Deserialize)]
pub struct GeoData {
    pub features: Vec<GeoFeature>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeoFeature {
    #[serde(default)]
    pub properties: Option<JsonObject>,
    #[serde(default)]
    pub geometry: Option<JsonObject>,
}

/// Province geometries keyed by canonical name. Built once, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct PolygonStore {
    polygons: BTreeMap<String, ProvincePolygon>,
}

impl PolygonStore {
    pub fn from_geojson_str(text: &str) -> Result<Self, DataError> {
        let mut bytes = text.as_bytes().to_vec();
        let geo_data: GeoData = simd_json::serde::from_slice(&mut bytes)?;
        Self::from_geo_data(geo_data)
    }

    pub fn from_geo_data(geo_data: GeoData) -> Result<Self, DataError> {
        let mut polygons = BTreeMap::new();
        for (idx, feature) in geo_data.features.into_iter().enumerate() {
            let name = feature
                .properties
                .as_ref()
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
                .ok_or_else(|| DataError::UnexpectedShape(format!("feature {idx} has no string `name` property")))?;
            let province = normalize_province(name).into_owned();

            let geometry = feature
                .geometry
                .ok_or_else(|| DataError::UnexpectedShape(format!("feature {name:?} has no geometry")))?;
            let geometry = Geometry::from_json_object(geometry)?;

            let shape = match &geometry.value {
                Value::Polygon(rings) => Shape::Polygon(convert_polygon(name, rings)?),
                Value::MultiPolygon(entries) => Shape::MultiPolygon(
                    entries
                        .iter()
                        .map(|rings| convert_polygon(name, rings))
                        .collect::<Result<_, _>>()?,
                ),
                other => {
                    return Err(DataError::UnexpectedShape(format!(
                        "feature {name:?} has {} geometry, expected Polygon or MultiPolygon",
                        geometry_type(other)
                    )))
                }
            };

            if polygons.contains_key(&province) {
                tracing::warn!(%province, "duplicate province feature replaces the earlier one");
            }
            polygons.insert(province.clone(), ProvincePolygon { province, shape });
        }

        Ok(Self { polygons })
    }

    pub fn get(&self, province: &str) -> Option<&ProvincePolygon> {
        self.polygons.get(province)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProvincePolygon> {
        self.polygons.values()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

fn geometry_type(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn convert_polygon(name: &str, rings: &[Vec<Vec<f64>>]) -> Result<Vec<Ring>, DataError> {
    if rings.is_empty() {
        return Err(DataError::UnexpectedShape(format!("feature {name:?} has a polygon without rings")));
    }
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|pos| match pos.as_slice() {
                    [lon, lat, ..] => Ok((*lon, *lat)),
                    _ => Err(DataError::UnexpectedShape(format!("feature {name:?} has a short coordinate"))),
                })
                .collect()
        })
        .collect()
}
