//! In-process stand-in for the upstream job listing service.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use url::Url;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: String,
    pub api_key: Option<String>,
    pub accept: Option<String>,
}

impl RecordedRequest {
    fn from_request(req: &HttpRequest) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };

        Self {
            path: req.path().to_string(),
            query: req.query_string().to_string(),
            api_key: header("x-api-key"),
            accept: header("accept"),
        }
    }
}

/// HTTP server on an ephemeral port answering every request with a fixed
/// status and body, recording what it received.
pub struct FakeUpstream {
    pub url: Url,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl FakeUpstream {
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_delayed(status, body, Duration::ZERO).await
    }

    /// Like `start`, but every response is held back for `delay`.
    pub async fn start_delayed(status: u16, body: &str, delay: Duration) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let status = StatusCode::from_u16(status).unwrap();
        let body = body.to_string();

        let server_recorded = recorded.clone();
        let server = HttpServer::new(move || {
            let recorded = server_recorded.clone();
            let body = body.clone();
            App::new().default_service(web::to(move |req: HttpRequest| {
                let recorded = recorded.clone();
                let body = body.clone();
                async move {
                    recorded
                        .lock()
                        .unwrap()
                        .push(RecordedRequest::from_request(&req));
                    if !delay.is_zero() {
                        actix_web::rt::time::sleep(delay).await;
                    }
                    HttpResponse::build(status)
                        .content_type("application/json")
                        .body(body)
                }
            }))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            url: Url::parse(&format!("http://{addr}/jobs")).unwrap(),
            recorded,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        // Stopping returns a future; dropping it still signals the server.
        drop(self.handle.stop(false));
    }
}

/// URL of a local port nothing listens on
pub fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/jobs")).unwrap()
}

pub fn config_for(upstream_url: Url) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        upstream_url,
        upstream_api_key: "test-key".to_string(),
        upstream_timeout: Duration::from_secs(5),
        log_dir: "logs".to_string(),
    }
}

/// Second page of a 42 hit search, one listing with and one without `externeUrl`
pub fn sample_page() -> Value {
    json!({
        "stellenangebote": [
            {
                "beruf": "Softwareentwickler/in",
                "titel": "Rust Backend Entwickler (m/w/d)",
                "refnr": "10000-1198765432-S",
                "arbeitgeber": "Beispiel GmbH",
                "arbeitsort": {
                    "ort": "Köln",
                    "region": "Nordrhein-Westfalen",
                    "koordinaten": { "lat": 50.9375, "lon": 6.9603 }
                },
                "aktuelleVeroeffentlichungsdatum": "2024-05-02",
                "externeUrl": "https://jobs.example.de/rust-backend"
            },
            {
                "beruf": "Fachinformatiker/in - Anwendungsentwicklung",
                "titel": "Junior Entwickler (m/w/d)",
                "refnr": "10001-1000123456-S",
                "arbeitgeber": "Muster AG",
                "arbeitsort": {
                    "ort": "Bonn",
                    "region": "Nordrhein-Westfalen"
                },
                "aktuelleVeroeffentlichungsdatum": "2024-04-28"
            }
        ],
        "maxErgebnisse": 42,
        "page": 2,
        "size": 20
    })
}
