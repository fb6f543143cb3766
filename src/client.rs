//! Per-resource client over the public API.

use std::sync::Arc;

use chrono::Local;
use serde_json::Value;

use crate::config::{Config, Units};
use crate::error::{Error, Result};
use crate::filter::{self, Criteria};
use crate::transport::{HttpTransport, Transport};

/// Client for the irrigation-controller public API, one method per
/// remote resource.
///
/// A client is stateless beyond its immutable access token and
/// [`Config`]; every method maps to one HTTP GET, except the two
/// composite lookups ([`get_devices`](Self::get_devices) and
/// [`get_device_forecast_today`](Self::get_device_forecast_today))
/// which chain two dependent calls in sequence.
#[derive(Debug, Clone)]
pub struct RachioClient {
    api: Arc<dyn Transport>,
    config: Config,
}

impl RachioClient {
    /// Client with the default configuration (API version 1, US units).
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_config(access_token, Config::default())
    }

    pub fn with_config(access_token: impl Into<String>, config: Config) -> Self {
        let transport = HttpTransport::new(config.base_uri(), access_token);
        Self { api: Arc::new(transport), config }
    }

    /// Client routed through a caller-supplied transport.
    pub fn with_transport(transport: Arc<dyn Transport>, config: Config) -> Self {
        Self { api: transport, config }
    }

    /// Info for the person owning the access token.
    pub async fn get_person_info(&self) -> Result<Value> {
        self.api.get("/person/info", &[]).await
    }

    pub async fn get_person(&self, id: &str) -> Result<Value> {
        self.api.get(&format!("/person/{id}"), &[]).await
    }

    pub async fn get_device(&self, id: &str) -> Result<Value> {
        self.api.get(&format!("/device/{id}"), &[]).await
    }

    pub async fn get_device_current_schedule(&self, id: &str) -> Result<Value> {
        self.api.get(&format!("/device/{id}/current_schedule"), &[]).await
    }

    /// Events for a device within `[start_time, end_time]` epoch
    /// milliseconds, narrowed client-side by `criteria`.
    pub async fn get_device_events(
        &self,
        id: &str,
        start_time: i64,
        end_time: i64,
        criteria: Criteria,
    ) -> Result<Vec<Value>> {
        let query = [
            ("startTime", Some(start_time.to_string())),
            ("endTime", Some(end_time.to_string())),
        ];
        let response = self.api.get(&format!("/device/{id}/event"), &query).await?;
        let events = into_array(response, "events")?;
        Ok(criteria.apply(events))
    }

    /// Current weather conditions at the device, from the forecast
    /// endpoint's `current` block.
    pub async fn get_device_current_conditions(
        &self,
        id: &str,
        units: Option<Units>,
    ) -> Result<Value> {
        let response = self.forecast_response(id, units).await?;
        field(response, "current")
    }

    /// Forecast records for a device, optionally narrowed to the
    /// half-open window `[start_time, end_time)` over each record's
    /// `localizedTimeStamp`. A missing `end_time` defaults to one day
    /// past `start_time`.
    pub async fn get_device_forecast(
        &self,
        id: &str,
        start_time: Option<i64>,
        end_time: Option<i64>,
        units: Option<Units>,
    ) -> Result<Vec<Value>> {
        let response = self.forecast_response(id, units).await?;
        let records = array_field(response, "forecast")?;
        Ok(filter::time_window(records, start_time, end_time))
    }

    /// The forecast record for the current local calendar day, or
    /// `None` when the response has no record in today's bounds.
    pub async fn get_device_forecast_today(
        &self,
        id: &str,
        units: Option<Units>,
    ) -> Result<Option<Value>> {
        let (start, end) = filter::local_day_window(Local::now());
        let mut records = self.get_device_forecast(id, Some(start), Some(end), units).await?;
        Ok(if records.is_empty() { None } else { Some(records.remove(0)) })
    }

    /// All devices on the token's account: person info, then the full
    /// person record it points at, then that record's `devices`.
    pub async fn get_devices(&self) -> Result<Vec<Value>> {
        let info = self.get_person_info().await?;
        let id = info.get("id").and_then(Value::as_str).ok_or(Error::Shape("id"))?;
        let person = self.get_person(id).await?;
        array_field(person, "devices")
    }

    pub async fn get_zones_by_device(&self, device_id: &str) -> Result<Vec<Value>> {
        let device = self.get_device(device_id).await?;
        array_field(device, "zones")
    }

    pub async fn get_webhook_types(&self) -> Result<Value> {
        self.api.get("/notification/webhook_event_type", &[]).await
    }

    pub async fn get_webhooks_by_device(&self, device_id: &str) -> Result<Value> {
        self.api.get(&format!("/notification/{device_id}/webhook"), &[]).await
    }

    pub async fn get_webhook(&self, webhook_id: &str) -> Result<Value> {
        self.api.get(&format!("/notification/webhook/{webhook_id}"), &[]).await
    }

    async fn forecast_response(&self, id: &str, units: Option<Units>) -> Result<Value> {
        let units = units.unwrap_or(self.config.units);
        let query = [("units", Some(units.as_str().to_string()))];
        self.api.get(&format!("/device/{id}/forecast"), &query).await
    }
}

fn field(value: Value, name: &'static str) -> Result<Value> {
    match value {
        Value::Object(mut map) => map.remove(name).ok_or(Error::Shape(name)),
        _ => Err(Error::Shape(name)),
    }
}

fn array_field(value: Value, name: &'static str) -> Result<Vec<Value>> {
    match field(value, name)? {
        Value::Array(items) => Ok(items),
        _ => Err(Error::Shape(name)),
    }
}

fn into_array(value: Value, name: &'static str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(Error::Shape(name)),
    }
}
