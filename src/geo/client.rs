//! Geolocation lookup client with timeout and graceful degradation.

use std::time::Duration;

use serde::Deserialize;
use tokio::time::timeout;

use crate::config::GeoConfig;

/// The answer handed back to the browser form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoAnswer {
    pub language: String,
    pub country_code: String,
    pub detected: bool,
}

/// Wire shape of the external lookup service.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: Option<String>,
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
}

pub struct GeoClient {
    http: reqwest::Client,
    config: GeoConfig,
    lookup_timeout: Duration,
}

impl GeoClient {
    pub fn new(config: GeoConfig) -> Self {
        let lookup_timeout = Duration::from_millis(config.lookup_timeout_ms);
        Self {
            http: reqwest::Client::new(),
            config,
            lookup_timeout,
        }
    }

    /// Resolve a language preference for a caller address.
    ///
    /// Never fails: lookup errors, timeouts, and unrecognized statuses
    /// all degrade to the anchor-country default with `detected = false`.
    pub async fn resolve(&self, ip: &str) -> GeoAnswer {
        match self.lookup(ip).await {
            Some(country_code) => self.answer_for(country_code),
            None => self.fallback(),
        }
    }

    fn answer_for(&self, country_code: String) -> GeoAnswer {
        let language = if country_code == self.config.anchor_country {
            self.config.primary_language.clone()
        } else {
            self.config.secondary_language.clone()
        };
        GeoAnswer {
            language,
            country_code,
            detected: true,
        }
    }

    fn fallback(&self) -> GeoAnswer {
        GeoAnswer {
            language: self.config.primary_language.clone(),
            country_code: self.config.anchor_country.clone(),
            detected: false,
        }
    }

    /// Single best-effort call to the lookup service.
    async fn lookup(&self, ip: &str) -> Option<String> {
        let url = format!(
            "{}/{}?fields=countryCode,status",
            self.config.endpoint.trim_end_matches('/'),
            ip
        );

        let response = match timeout(self.lookup_timeout, self.http.get(&url).send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Geolocation lookup failed");
                return None;
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "Geolocation lookup timed out"
                );
                return None;
            }
        };

        let body: LookupResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Geolocation response was not decodable");
                return None;
            }
        };

        if body.status.as_deref() != Some("success") {
            return None;
        }
        body.country_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeoClient {
        GeoClient::new(GeoConfig::default())
    }

    #[test]
    fn anchor_country_maps_to_primary_language() {
        let answer = client().answer_for("BR".to_string());
        assert_eq!(answer.language, "pt");
        assert_eq!(answer.country_code, "BR");
        assert!(answer.detected);
    }

    #[test]
    fn other_countries_map_to_secondary_language() {
        for code in ["AR", "MX", "US"] {
            let answer = client().answer_for(code.to_string());
            assert_eq!(answer.language, "es");
            assert!(answer.detected);
        }
    }

    #[test]
    fn fallback_is_the_anchor_default() {
        let answer = client().fallback();
        assert_eq!(
            answer,
            GeoAnswer {
                language: "pt".to_string(),
                country_code: "BR".to_string(),
                detected: false,
            }
        );
    }
}
