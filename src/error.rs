use std::path::PathBuf;

/// Failures while loading either upstream data source. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("geometry object is not valid GeoJSON")]
    GeoJson(#[from] geojson::Error),
    #[error("payload does not match the expected schema")]
    Json(#[from] simd_json::Error),
    #[error("unexpected upstream shape: {0}")]
    UnexpectedShape(String),
    #[error("unrecognised confirmation date {0:?}")]
    InvalidDate(String),
    #[error("case payload contains no dated records")]
    NoCases,
}
