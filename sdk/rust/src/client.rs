use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: CoordinatePair,
    pub dest: CoordinatePair,
    /// "kilometers", "miles" or "nauticalmiles"; the service defaults to
    /// kilometers when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CoordinatePair {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub found: bool,
    /// Present only when `found` is true.
    pub segment: Option<Value>,
}

pub struct SegmentServiceClient {
    client: Client,
    base_url: String,
}

impl SegmentServiceClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Compute a route between two coordinates. An empty coordinate list
    /// means no route exists.
    pub async fn generate_route(
        &self,
        req: RouteRequest,
    ) -> Result<RouteResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/route-generation", self.base_url))
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("service returned status {}: {}", status, text).into());
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Look up the saved segment for an ordered port pair.
    pub async fn lookup_segment(
        &self,
        origin_port_id: &str,
        destination_port_id: &str,
    ) -> Result<LookupResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/segment-lookup", self.base_url))
            .query(&[
                ("originPortId", origin_port_id),
                ("destinationPortId", destination_port_id),
            ])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("service returned status {}: {}", status, text).into());
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch service health as raw JSON.
    pub async fn health(&self) -> Result<Value, reqwest::Error> {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .json()
            .await
    }
}
