mod cases;
mod polygons;

pub use cases::{CaseRecord, DailyProvinceCounts, DayCounts};
pub use polygons::{GeoData, GeoFeature, GeometryKind, PolygonStore, ProvincePolygon, Ring, Shape};

use crate::error::DataError;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Where an upstream payload comes from: a remote URL or a local copy on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` locations are fetched, anything else is a file path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }

    /// Fetch the raw payload. Blocks until the transfer completes.
    pub fn load(&self) -> Result<Vec<u8>, DataError> {
        match self {
            Source::Url(url) => {
                tracing::info!(%url, "fetching");
                let response = ureq::get(url).call().map_err(|e| DataError::Fetch {
                    url: url.clone(),
                    source: Box::new(e),
                })?;
                let mut bytes = Vec::new();
                response
                    .into_reader()
                    .read_to_end(&mut bytes)
                    .map_err(|source| DataError::Body { url: url.clone(), source })?;
                tracing::debug!(%url, bytes = bytes.len(), "fetched");
                Ok(bytes)
            }
            Source::File(path) => {
                tracing::info!(?path, "reading");
                fs::read(path).map_err(|source| DataError::Io { path: path.clone(), source })
            }
        }
    }
}

/// Load and parse the province boundaries
pub fn load_polygons(source: &Source) -> Result<PolygonStore, DataError> {
    let bytes = source.load()?;
    let text = String::from_utf8(bytes)
        .map_err(|_| DataError::UnexpectedShape("geometry payload is not UTF-8".into()))?;
    let store = PolygonStore::from_geojson_str(&text)?;
    let multi = store.iter().filter(|p| p.kind() == GeometryKind::MultiPolygon).count();
    tracing::info!(
        provinces = store.len(),
        polygons = store.len() - multi,
        multipolygons = multi,
        "province polygons loaded"
    );
    Ok(store)
}

/// Load the case records and aggregate them per date and province
pub fn load_daily_counts(source: &Source) -> Result<DailyProvinceCounts, DataError> {
    let mut bytes = source.load()?;
    let counts = DailyProvinceCounts::from_slice(&mut bytes)?;
    tracing::info!(
        dates = counts.len(),
        first = %counts.min_date(),
        last = %counts.max_date(),
        "daily case counts aggregated"
    );
    Ok(counts)
}
