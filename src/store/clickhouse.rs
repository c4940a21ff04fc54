//! ClickHouse-backed segment store over the HTTP interface.
//!
//! # Responsibilities
//! - Run the single read query (active segment by key, newest first, limit 1)
//! - Bind the port ids as query parameters, never by string interpolation
//! - Decode the `JSONEachRow` response line into a [`SegmentRow`]
//! - Enforce a bounded request timeout

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ClickHouseConfig;
use crate::observability::metrics;
use crate::segment::SegmentKey;
use crate::store::{SegmentRow, SegmentStore, StoreError};

pub struct ClickHouseStore {
    client: reqwest::Client,
    url: String,
    query: String,
    user: Option<String>,
    password: Option<String>,
}

impl ClickHouseStore {
    pub fn new(config: &ClickHouseConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        // Identifiers are validated at config load; only the port ids are
        // request-supplied, and those travel as bound parameters.
        let query = format!(
            "SELECT origin_port_id, destination_port_id, coordinates, route_type, \
             distance_nm, distance_km, toString(created_at) AS created_at, \
             toString(updated_at) AS updated_at, created_by, version, metadata, is_active \
             FROM {database}.{table} \
             WHERE origin_port_id = {{origin:String}} \
             AND destination_port_id = {{destination:String}} \
             AND is_active = 1 \
             ORDER BY updated_at DESC \
             LIMIT 1 \
             FORMAT JSONEachRow",
            database = config.database,
            table = config.table,
        );

        Ok(Self {
            client,
            url: config.url.clone(),
            query,
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }
}

#[async_trait]
impl SegmentStore for ClickHouseStore {
    async fn fetch_active(&self, key: &SegmentKey) -> Result<Option<SegmentRow>, StoreError> {
        let mut request = self
            .client
            .post(&self.url)
            .query(&[
                ("param_origin", key.origin()),
                ("param_destination", key.destination()),
            ])
            .body(self.query.clone());

        if let Some(user) = &self.user {
            request = request.header("X-ClickHouse-User", user);
        }
        if let Some(password) = &self.password {
            request = request.header("X-ClickHouse-Key", password);
        }

        let response = request.send().await.map_err(|e| {
            metrics::record_store_query("error");
            if e.is_timeout() || e.is_connect() {
                StoreError::Unavailable(e.to_string())
            } else {
                StoreError::Query(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if !status.is_success() {
            metrics::record_store_query("error");
            return Err(StoreError::Query(format!(
                "status {status}: {}",
                body.trim()
            )));
        }

        match body.lines().find(|line| !line.trim().is_empty()) {
            None => {
                metrics::record_store_query("not_found");
                Ok(None)
            }
            Some(line) => {
                let row: SegmentRow = serde_json::from_str(line)?;
                metrics::record_store_query("found");
                Ok(Some(row))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClickHouseConfig;

    #[test]
    fn query_binds_parameters_and_orders_by_update_time() {
        let store = ClickHouseStore::new(&ClickHouseConfig::default()).unwrap();
        assert!(store.query.contains("{origin:String}"));
        assert!(store.query.contains("{destination:String}"));
        assert!(store.query.contains("is_active = 1"));
        assert!(store.query.contains("ORDER BY updated_at DESC"));
        assert!(store.query.contains("LIMIT 1"));
        assert!(store.query.ends_with("FORMAT JSONEachRow"));
    }

    #[test]
    fn row_decodes_from_json_each_row_line() {
        let line = r#"{"origin_port_id":"NLRTM","destination_port_id":"SGSIN","coordinates":"[[4.0,51.9]]","route_type":"generated","distance_nm":8300.5,"distance_km":15372.5,"created_at":"2024-05-01 10:00:00","updated_at":"2024-05-02 10:00:00","created_by":"pipeline","version":7,"metadata":"{}","is_active":1}"#;
        let row: SegmentRow = serde_json::from_str(line).unwrap();
        assert_eq!(row.origin_port_id, "NLRTM");
        assert_eq!(row.version, 7);
        assert_eq!(row.is_active, 1);
    }
}
