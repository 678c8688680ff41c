//! Application configuration from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::stations::SearchSettings;
use crate::wfs::{CoordinateOrder, FetchLimits, WfsConfig, WithinFilter};

/// Environment variable holding the feature API key.
pub const API_KEY_VAR: &str = "OS_API_KEY";

const WFS_URL_VAR: &str = "STATION_FINDER_WFS_URL";
const TYPE_NAMES_VAR: &str = "STATION_FINDER_TYPE_NAMES";
const BOUNDARY_VAR: &str = "STATION_FINDER_BOUNDARY";
const PAGE_SIZE_VAR: &str = "STATION_FINDER_PAGE_SIZE";
const MAX_PAGES_VAR: &str = "STATION_FINDER_MAX_PAGES";
const MAX_FEATURES_VAR: &str = "STATION_FINDER_MAX_FEATURES";
const AXIS_ORDER_VAR: &str = "STATION_FINDER_AXIS_ORDER";
const ADDR_VAR: &str = "STATION_FINDER_ADDR";
const MOCK_FEATURES_VAR: &str = "STATION_FINDER_MOCK_FEATURES";

/// Default boundary file.
const DEFAULT_BOUNDARY: &str = "data/camden-simplified.json";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required variable not set
    #[error("{0} is not set")]
    Missing(&'static str),

    /// Variable set to an unusable value
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where features come from.
#[derive(Clone, PartialEq, Eq)]
pub enum FeatureSource {
    /// The live feature API.
    Live { api_key: String },
    /// A local GeoJSON file served by the mock client.
    Mock { features: PathBuf },
}

impl std::fmt::Debug for FeatureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureSource::Live { .. } => f.write_str("Live { api_key: <redacted> }"),
            FeatureSource::Mock { features } => {
                f.debug_struct("Mock").field("features", features).finish()
            }
        }
    }
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: FeatureSource,
    pub wfs: WfsConfig,
    pub search: SearchSettings,
    pub boundary_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let source = match get(MOCK_FEATURES_VAR) {
            Some(path) => FeatureSource::Mock {
                features: PathBuf::from(path),
            },
            None => FeatureSource::Live {
                api_key: get(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?,
            },
        };

        let mut wfs = WfsConfig::default();
        if let Some(url) = get(WFS_URL_VAR) {
            wfs = wfs.with_base_url(url);
        }

        let defaults = SearchSettings::default();
        let search = SearchSettings {
            type_names: get(TYPE_NAMES_VAR).unwrap_or(defaults.type_names),
            // NonZeroU32 parsing rejects a zero page size
            page_size: parse_or(&get, PAGE_SIZE_VAR, defaults.page_size)?,
            filter: WithinFilter::default().with_order(parse_or(
                &get,
                AXIS_ORDER_VAR,
                CoordinateOrder::default(),
            )?),
            limits: FetchLimits {
                max_pages: parse_or(&get, MAX_PAGES_VAR, defaults.limits.max_pages)?,
                max_features: parse_or(&get, MAX_FEATURES_VAR, defaults.limits.max_features)?,
            },
        };

        let boundary_path = get(BOUNDARY_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BOUNDARY));

        let bind_addr = parse_or(&get, ADDR_VAR, default_addr())?;

        Ok(Self {
            source,
            wfs,
            search,
            boundary_path,
            bind_addr,
        })
    }
}

/// Default HTTP bind address.
fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn parse_or<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
