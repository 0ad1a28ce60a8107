use log::info;
use std::env;
use std::time::Duration;
use url::Url;

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub endpoint: Url,
    /// None disables automatic refresh
    pub refresh_interval: Option<Duration>,
}

impl MonitorConfig {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_endpoint = lookup("SENSOR_API_ENDPOINT")
            .ok_or("SENSOR_API_ENDPOINT environment variable not set")?;

        let endpoint = Url::parse(raw_endpoint.trim())
            .map_err(|e| format!("Invalid SENSOR_API_ENDPOINT '{}': {}", raw_endpoint, e))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(format!(
                "SENSOR_API_ENDPOINT must be an http(s) URL, got scheme '{}'",
                endpoint.scheme()
            )
            .into());
        }

        let refresh_secs = match lookup("REFRESH_INTERVAL_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("Invalid REFRESH_INTERVAL_SECS '{}': {}", value, e))?,
            None => DEFAULT_REFRESH_INTERVAL_SECS,
        };
        let refresh_interval = match refresh_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        info!("Service endpoint: {}", endpoint);
        match refresh_interval {
            Some(interval) => info!("Automatic refresh every {}s", interval.as_secs()),
            None => info!("Automatic refresh disabled"),
        }

        Ok(MonitorConfig {
            endpoint,
            refresh_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn endpoint_is_required() {
        let err = MonitorConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("SENSOR_API_ENDPOINT"));
    }

    #[test]
    fn defaults_refresh_interval() {
        let config =
            MonitorConfig::from_lookup(lookup(&[("SENSOR_API_ENDPOINT", "https://example.com/prod")]))
                .unwrap();
        assert_eq!(config.endpoint.as_str(), "https://example.com/prod");
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_interval_disables_refresh() {
        let config = MonitorConfig::from_lookup(lookup(&[
            ("SENSOR_API_ENDPOINT", "http://localhost:8080"),
            ("REFRESH_INTERVAL_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.refresh_interval, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(MonitorConfig::from_lookup(lookup(&[("SENSOR_API_ENDPOINT", "not a url")])).is_err());
        assert!(MonitorConfig::from_lookup(lookup(&[("SENSOR_API_ENDPOINT", "ftp://host/x")])).is_err());
        assert!(MonitorConfig::from_lookup(lookup(&[
            ("SENSOR_API_ENDPOINT", "http://localhost"),
            ("REFRESH_INTERVAL_SECS", "soon"),
        ]))
        .is_err());
    }
}
