use crate::model::Ms;

/// Engine-level failures.
///
/// `InvalidFormat` and `InvalidRange` are caller input errors and are raised
/// before any store query is issued. `Store` wraps whatever the store
/// surfaced, unchanged; the engine never retries.
#[derive(Debug)]
pub enum EngineError {
    InvalidFormat { field: &'static str, value: String },
    InvalidRange { start: Ms, end: Ms },
    UnknownZone(String),
    OutOfRange(&'static str),
    Store(Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    pub(crate) fn invalid_format(field: &'static str, value: &str) -> Self {
        Self::InvalidFormat {
            field,
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidFormat { field, value } => {
                write!(f, "invalid {field}: {value:?}")
            }
            EngineError::InvalidRange { start, end } => {
                write!(f, "invalid range: end {end} must be after start {start}")
            }
            EngineError::UnknownZone(id) => write!(f, "unknown timezone: {id}"),
            EngineError::OutOfRange(what) => write!(f, "{what} out of representable range"),
            EngineError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Store(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
