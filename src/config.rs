use std::env;

/// Zone all civil datetimes are interpreted in when nothing else is set.
pub const DEFAULT_ZONE: &str = "Europe/Berlin";

/// Engine configuration. Exactly one recognized option: the IANA timezone
/// identifier. Everything else about the engine is input-driven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_ZONE.into(),
        }
    }
}

impl Config {
    /// Read `DESKBOOK_TZ`, falling back to [`DEFAULT_ZONE`].
    pub fn from_env() -> Self {
        Self {
            timezone: env::var("DESKBOOK_TZ").unwrap_or_else(|_| DEFAULT_ZONE.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tz::TimeZoneConverter;

    #[test]
    fn default_zone_is_a_known_zone() {
        let cfg = Config::default();
        assert!(TimeZoneConverter::new(&cfg.timezone).is_ok());
    }
}
