use serde::{Deserialize, Serialize};

/// Measurement system reported by forecast endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Units {
    #[default]
    Us,
    Metric,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Us => "US",
            Units::Metric => "METRIC",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-client settings, fixed for the lifetime of the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote API version; selects the base URI path segment.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Measurement system used when a call does not override it.
    #[serde(default)]
    pub units: Units,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self { version: default_version(), units: Units::default() }
    }
}

impl Config {
    /// Base URI of the public API for the configured version.
    pub fn base_uri(&self) -> String {
        format!("https://api.rach.io/{}/public", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_version_one_us_units() {
        let cfg = Config::default();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.units, Units::Us);
    }

    #[test]
    fn base_uri_tracks_version() {
        assert_eq!(Config::default().base_uri(), "https://api.rach.io/1/public");

        let cfg = Config { version: 2, ..Config::default() };
        assert_eq!(cfg.base_uri(), "https://api.rach.io/2/public");
    }

    #[test]
    fn units_render_as_api_expects() {
        assert_eq!(Units::Us.as_str(), "US");
        assert_eq!(Units::Metric.as_str(), "METRIC");
        assert_eq!(Units::Metric.to_string(), "METRIC");
    }

    #[test]
    fn units_serde_roundtrip() {
        let json = serde_json::to_string(&Units::Metric).expect("serialize");
        assert_eq!(json, "\"METRIC\"");

        let parsed: Units = serde_json::from_str("\"US\"").expect("deserialize");
        assert_eq!(parsed, Units::Us);
    }
}
