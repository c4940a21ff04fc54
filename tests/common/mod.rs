//! Shared utilities for integration testing.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;

use searoute_api::cache::SegmentCache;
use searoute_api::config::ServiceConfig;
use searoute_api::geo::{Coordinate, Unit};
use searoute_api::http::{AppState, HttpServer};
use searoute_api::lifecycle::Shutdown;
use searoute_api::lookup::SegmentLookupService;
use searoute_api::provider::{ProviderError, RouteProvider};
use searoute_api::segment::SegmentKey;
use searoute_api::store::{SegmentRow, SegmentStore, StoreError};

/// Store fake with an atomic call counter, optionally failing.
pub struct FakeStore {
    rows: HashMap<(String, String), SegmentRow>,
    calls: AtomicU32,
    fail: bool,
}

impl FakeStore {
    pub fn with_rows(rows: Vec<SegmentRow>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|r| ((r.origin_port_id.clone(), r.destination_port_id.clone()), r))
                .collect(),
            calls: AtomicU32::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            rows: HashMap::new(),
            calls: AtomicU32::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SegmentStore for FakeStore {
    async fn fetch_active(&self, key: &SegmentKey) -> Result<Option<SegmentRow>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::Unavailable("store down".into()));
        }
        Ok(self
            .rows
            .get(&(key.origin().to_string(), key.destination().to_string()))
            .cloned())
    }
}

/// Provider fake recording the unit it was asked for.
pub struct FakeProvider {
    line: Option<Vec<[f64; 2]>>,
    fail: bool,
    last_unit: Mutex<Option<Unit>>,
}

impl FakeProvider {
    pub fn with_line(line: Vec<[f64; 2]>) -> Self {
        Self {
            line: Some(line),
            fail: false,
            last_unit: Mutex::new(None),
        }
    }

    pub fn without_route() -> Self {
        Self {
            line: None,
            fail: false,
            last_unit: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            line: None,
            fail: true,
            last_unit: Mutex::new(None),
        }
    }

    pub fn last_unit(&self) -> Option<Unit> {
        *self.last_unit.lock().unwrap()
    }
}

#[async_trait]
impl RouteProvider for FakeProvider {
    async fn compute(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        unit: Unit,
    ) -> Result<Option<Vec<[f64; 2]>>, ProviderError> {
        *self.last_unit.lock().unwrap() = Some(unit);
        if self.fail {
            return Err(ProviderError::Request("engine unreachable".into()));
        }
        Ok(self.line.clone())
    }
}

pub fn segment_row(origin: &str, destination: &str) -> SegmentRow {
    SegmentRow {
        origin_port_id: origin.into(),
        destination_port_id: destination.into(),
        coordinates: "[[4.0,51.9],[3.3,51.3],[-5.6,36.0]]".into(),
        route_type: "generated".into(),
        distance_nm: 8300.5,
        distance_km: 15372.5,
        created_at: "2024-05-01 10:00:00".into(),
        updated_at: "2024-05-02 10:00:00".into(),
        created_by: "pipeline".into(),
        version: 1,
        metadata: r#"{"source":"import"}"#.into(),
        is_active: 1,
    }
}

/// Build application state around injected fakes with default TTLs.
pub fn state_with(
    cache: Arc<dyn SegmentCache>,
    store: Arc<dyn SegmentStore>,
    provider: Arc<dyn RouteProvider>,
) -> AppState {
    let lookup = Arc::new(SegmentLookupService::new(
        cache,
        store,
        Duration::from_secs(3600),
        Duration::from_secs(60),
    ));
    AppState::new(lookup, provider)
}

/// Start the service on an ephemeral port. The returned [`Shutdown`] must be
/// kept alive for the lifetime of the test.
pub async fn spawn_service(state: AppState) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(ServiceConfig::default(), state);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
