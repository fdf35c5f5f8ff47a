//! Logical query shapes understood by the gateway.

use url::Url;

/// An abstract request, independent of the concrete upstream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalQuery {
    /// The full station list.
    Stations,
    /// Historical weather observations for one station.
    HistoricalWeather { station_id: String },
}

impl LogicalQuery {
    /// Canonical string form used as the cache key.
    pub fn cache_key(&self) -> String {
        match self {
            Self::Stations => "/stations|".to_string(),
            Self::HistoricalWeather { station_id } => {
                format!("/historical_weather|{station_id}")
            }
        }
    }

    /// Resolve the query to a concrete upstream URL.
    ///
    /// # Errors
    /// Returns a parse error when `base_url` is not a valid URL.
    pub fn upstream_url(&self, base_url: &str) -> Result<Url, url::ParseError> {
        match self {
            Self::Stations => Url::parse(&format!("{base_url}/stations")),
            Self::HistoricalWeather { station_id } => {
                let mut url = Url::parse(&format!("{base_url}/historical_weather"))?;
                url.query_pairs_mut().append_pair("station", station_id);
                Ok(url)
            }
        }
    }
}
