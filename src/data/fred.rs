//! FRED API integration for single indicator series.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::Sample;
use crate::error::AppError;

const OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const SERIES_URL: &str = "https://api.stlouisfed.org/fred/series";
const OBS_LIMIT: usize = 100_000;

/// Descriptive metadata for a FRED series.
#[derive(Debug, Clone)]
pub struct SeriesInfo {
    pub id: String,
    pub title: String,
    pub units: String,
}

pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .map_err(|_| AppError::input("Missing FRED_API_KEY in environment (.env)."))?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Observations in ascending date order, optionally bounded (inclusive).
    pub fn fetch_series(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Sample>, AppError> {
        let mut req = self.client.get(OBSERVATIONS_URL).query(&[
            ("series_id", series_id),
            ("api_key", &self.api_key),
            ("file_type", "json"),
            ("sort_order", "asc"),
            ("limit", &OBS_LIMIT.to_string()),
        ]);
        if let Some(date) = start {
            req = req.query(&[("observation_start", &date.to_string())]);
        }
        if let Some(date) = end {
            req = req.query(&[("observation_end", &date.to_string())]);
        }

        tracing::info!(series_id, "fetching FRED observations");
        let resp = req
            .send()
            .map_err(|e| AppError::upstream(format!("FRED request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "FRED request failed with status {}.",
                resp.status()
            )));
        }

        let body: ObservationsResponse = resp
            .json()
            .map_err(|e| AppError::upstream(format!("Failed to parse FRED response: {e}")))?;

        let total = body.observations.len();
        let samples = observations_to_samples(body.observations)?;
        if samples.len() < total {
            let skipped = total - samples.len();
            tracing::debug!(series_id, skipped, "missing FRED values skipped");
        }
        Ok(samples)
    }

    pub fn fetch_series_info(&self, series_id: &str) -> Result<SeriesInfo, AppError> {
        let resp = self
            .client
            .get(SERIES_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", &self.api_key),
                ("file_type", "json"),
            ])
            .send()
            .map_err(|e| AppError::upstream(format!("FRED request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "FRED series lookup failed with status {}.",
                resp.status()
            )));
        }

        let body: SeriesResponse = resp
            .json()
            .map_err(|e| AppError::upstream(format!("Failed to parse FRED series response: {e}")))?;
        let meta = body
            .seriess
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::upstream(format!("FRED returned no metadata for series {series_id}."))
            })?;

        Ok(SeriesInfo {
            id: meta.id,
            title: meta.title,
            units: meta.units,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    seriess: Vec<SeriesMeta>,
}

#[derive(Debug, Deserialize)]
struct SeriesMeta {
    id: String,
    title: String,
    #[serde(default)]
    units: String,
}

fn observations_to_samples(observations: Vec<Observation>) -> Result<Vec<Sample>, AppError> {
    let mut out = Vec::with_capacity(observations.len());
    for obs in observations {
        let Some(value) = parse_value(&obs.value) else {
            continue;
        };
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| AppError::upstream(format!("Invalid FRED date '{}': {e}", obs.date)))?;
        out.push(Sample::new(date, value));
    }
    Ok(out)
}

/// FRED marks missing observations with `"."`.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_are_skipped() {
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value(" 1.25 "), Some(1.25));
        assert_eq!(parse_value("NaN"), None);
    }

    #[test]
    fn observations_parse_from_json() {
        let body: ObservationsResponse = serde_json::from_str(
            r#"{"observations":[
                {"date":"2024-01-01","value":"3.1"},
                {"date":"2024-02-01","value":"."},
                {"date":"2024-03-01","value":"3.4"}
            ]}"#,
        )
        .unwrap();
        let samples = observations_to_samples(body.observations).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(samples[1].value, 3.4);
    }

    #[test]
    fn bad_date_is_upstream_error() {
        let obs = vec![Observation {
            date: "01/02/2024".to_string(),
            value: "1".to_string(),
        }];
        assert_eq!(observations_to_samples(obs).unwrap_err().exit_code(), 4);
    }

    #[test]
    fn series_metadata_parses() {
        let json = r#"{"seriess":[{
            "id":"CPIAUCSL",
            "title":"Consumer Price Index",
            "units":"Index 1982-1984=100"
        }]}"#;
        let body: SeriesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.seriess[0].title, "Consumer Price Index");
    }
}
