//! Current-weather snapshot for a fixed city list, mirroring
//! `harvester/sources/weather.py` and `harvester_weather.py`
//! (`SPEC_FULL.md` §4.3.1).

use std::time::Duration;

use async_trait::async_trait;

use super::HarvestSource;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const CITIES: &[(&str, f64, f64)] = &[
    ("london", 51.5074, -0.1278),
    ("tokyo", 35.6762, 139.6503),
    ("sao_paulo", -23.5505, -46.6333),
];

pub struct WeatherSource {
    period: Duration,
    http: reqwest::Client,
}

impl Default for WeatherSource {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(600),
            http: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("failed to build weather HTTP client"),
        }
    }
}

#[async_trait]
impl HarvestSource for WeatherSource {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn sample(&self) -> Option<Vec<u8>> {
        // Rotate cities by wall-clock minute so successive samples hit
        // different stations even on a short period.
        let minute = (chrono::Utc::now().timestamp() / 60) as usize;
        let (name, lat, lon) = CITIES[minute % CITIES.len()];
        let url = format!(
            "https://api.open-meteo.com/v1/forecast?latitude={lat}&longitude={lon}&current_weather=true"
        );

        match self.http.get(&url).send().await {
            Ok(resp) => match resp.bytes().await {
                Ok(body) if !body.is_empty() => Some(body.to_vec()),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(event = "weather_sample_failed", city = name, error = %err, "body read failed");
                    None
                }
            },
            Err(err) => {
                tracing::warn!(event = "weather_sample_failed", city = name, error = %err, "request failed");
                None
            }
        }
    }
}
