//! Location sample and batch result types

use serde::{Deserialize, Deserializer, Serialize};

/// A single geolocation sample as submitted by a client
///
/// Every field is optional on input: a missing or `null` value reads as
/// zero (or empty). `accuracy` and `speed` are omitted from the stored JSON
/// when zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default, deserialize_with = "null_as_default")]
    pub latitude: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub longitude: f64,

    /// Epoch seconds; unique per user for keying purposes
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: i64,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub accuracy: f64,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub speed: f64,

    /// Not validated; an empty id still produces a (shared) store key
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
}

/// Read `null` as `T::default()`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl Sample {
    /// Key under which this sample is persisted
    pub fn store_key(&self) -> String {
        format!("location:{}:{}", self.user_id, self.timestamp)
    }
}

/// Body of `POST /api/location/batch`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BatchRequest {
    /// A missing or `null` field is treated as an empty batch
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<Sample>,
}

/// Derived view of one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizedView {
    pub compressed: bool,
    pub accuracy: f64,
    pub speed: f64,
}

/// Outcome of processing one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub user_id: String,
    pub timestamp: i64,
    pub processed: bool,
    pub optimized: OptimizedView,
}

/// Response of `POST /api/location/batch`
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub processed: usize,
    pub results: Vec<ProcessedResult>,
    pub timestamp: i64,
}

/// Response of `GET /api/location/stats`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub processed_locations: i64,
    pub uptime: String,
    pub service: String,
    pub active_workers: usize,
    pub max_workers: usize,
}

/// Response of `GET /api/location/optimize`
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteOptimization {
    pub user_id: String,
    pub optimization_score: f64,
    pub estimated_savings: f64,
    pub route_points: Vec<String>,
}
