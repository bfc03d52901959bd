use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::configs::PlantApi;

/// Search hit from the plant-information service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantMatch {
    pub id: i64,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scientific_name: Vec<String>,
}

/// Ideal growing conditions of a species. Fetched per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceConditions {
    pub sunlight: Vec<String>,
    pub sunlight_level: Option<Value>,
    pub watering_rate: Option<String>,
    pub watering_days: Option<Value>,
    pub watering_schedule: Option<Value>,
    pub hardiness_zone: Option<Value>,
}

/// Source of horticultural reference data.
///
/// Implementations never fail: transport errors and unexpected payloads are logged and degrade to
/// an empty result.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn find_plant_by_name(&self, name: &str) -> Vec<PlantMatch>;

    async fn get_conditions(&self, id: i64) -> Option<ReferenceConditions>;

    /// Conditions of the first species matching `name`.
    async fn lookup_conditions(&self, name: &str) -> Option<(PlantMatch, ReferenceConditions)> {
        let plant = self.find_plant_by_name(name).await.into_iter().next()?;
        let conditions = self.get_conditions(plant.id).await?;

        Some((plant, conditions))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct SpeciesList {
    data: Vec<PlantMatch>,
}

#[derive(Deserialize)]
struct SpeciesDetails {
    #[allow(dead_code)]
    id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    sunlight: Vec<String>,
    #[serde(default, rename = "xSunlightDuration")]
    sunlight_duration: Option<Value>,
    #[serde(default)]
    watering: Option<String>,
    #[serde(default)]
    watering_general_benchmark: Option<Value>,
    #[serde(default, rename = "xWateringPeriod")]
    watering_period: Option<Value>,
    #[serde(default)]
    hardiness: Option<Value>,
}

// The details endpoint has been seen both bare and wrapped in a `data` list.
#[derive(Deserialize)]
#[serde(untagged)]
enum DetailsBody {
    Wrapped { data: Vec<SpeciesDetails> },
    Bare(SpeciesDetails),
}

impl From<SpeciesDetails> for ReferenceConditions {
    fn from(details: SpeciesDetails) -> Self {
        ReferenceConditions {
            sunlight: details.sunlight,
            sunlight_level: details.sunlight_duration,
            watering_rate: details.watering,
            watering_days: details.watering_general_benchmark,
            watering_schedule: details.watering_period,
            hardiness_zone: details.hardiness,
        }
    }
}

/// Perenual v2 client. <https://perenual.com/docs/api>
#[derive(Clone)]
pub struct PerenualClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PerenualClient {
    pub fn new(config: &PlantApi) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, reqwest::Error> {
        let response = self
            .http_client
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        let body = match response {
            Ok(response) => response.json::<Value>().await,
            Err(e) => Err(e),
        };

        // The request URL carries the API key.
        body.map_err(reqwest::Error::without_url)
    }
}

#[async_trait]
impl ReferenceSource for PerenualClient {
    async fn find_plant_by_name(&self, name: &str) -> Vec<PlantMatch> {
        let url = format!("{}/species-list", self.base_url);

        let body = match self.get_json(&url, &[("q", name)]).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("plant search for {name:?} failed: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_value::<SpeciesList>(body) {
            Ok(list) => list.data,
            Err(e) => {
                tracing::warn!("unexpected plant search response for {name:?}: {e}");
                Vec::new()
            }
        }
    }

    async fn get_conditions(&self, id: i64) -> Option<ReferenceConditions> {
        let url = format!("{}/species/details/{id}", self.base_url);

        let body = match self.get_json(&url, &[]).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("plant details request for {id} failed: {e}");
                return None;
            }
        };

        match serde_json::from_value::<DetailsBody>(body) {
            Ok(DetailsBody::Bare(details)) => Some(details.into()),
            Ok(DetailsBody::Wrapped { data }) => data.into_iter().next().map(Into::into),
            Err(e) => {
                tracing::warn!("unexpected plant details response for {id}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_lookups_do_not_log_api_key() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let client = PerenualClient::new(&PlantApi {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: "SECRET-KEY-123".to_string(),
            timeout: 5,
        })
        .unwrap();

        assert!(client.find_plant_by_name("fig").await.is_empty());
        assert!(client.get_conditions(2961).await.is_none());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("plant search for \"fig\" failed"));
        assert!(output.contains("plant details request for 2961 failed"));
        assert!(!output.contains("SECRET-KEY-123"));
    }

    #[test]
    fn test_bare_details_are_mapped() {
        let body = json!({
            "id": 1,
            "common_name": "European Silver Fir",
            "sunlight": ["full sun", "part shade"],
            "watering": "Frequent",
            "watering_general_benchmark": { "value": "7-10", "unit": "days" },
            "hardiness": { "min": "7", "max": "7" }
        });

        let DetailsBody::Bare(details) = serde_json::from_value(body).unwrap() else {
            panic!("expected a bare details object");
        };
        let conditions = ReferenceConditions::from(details);

        assert_eq!(conditions.sunlight, vec!["full sun", "part shade"]);
        assert_eq!(conditions.watering_rate.as_deref(), Some("Frequent"));
        assert_eq!(conditions.watering_days, Some(json!({ "value": "7-10", "unit": "days" })));
        assert_eq!(conditions.hardiness_zone, Some(json!({ "min": "7", "max": "7" })));
        assert_eq!(conditions.sunlight_level, None);
    }

    #[test]
    fn test_wrapped_details_are_accepted() {
        let body = json!({ "data": [{ "id": 2, "watering": "Average" }] });

        assert!(matches!(
            serde_json::from_value::<DetailsBody>(body).unwrap(),
            DetailsBody::Wrapped { .. }
        ));
    }

    #[test]
    fn test_details_without_id_are_rejected() {
        let body = json!({ "message": "Surpassed API Rate Limit" });

        assert!(serde_json::from_value::<DetailsBody>(body).is_err());
    }

    #[test]
    fn test_species_list_tolerates_missing_names() {
        let body = json!({ "data": [{ "id": 7, "scientific_name": null }, { "id": 8, "common_name": "fig", "scientific_name": ["Ficus carica"] }] });

        let list: SpeciesList = serde_json::from_value(body).unwrap();

        assert_eq!(list.data.len(), 2);
        assert_eq!(list.data[0].common_name, None);
        assert_eq!(list.data[1].scientific_name, vec!["Ficus carica"]);
    }
}
