//! Mock catalog HTTP server.
//!
//! Serves canned catalog JSON per route. Responses queued for a path take
//! precedence over the canned ones, one per request.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Pages served for `/titles` and keyword searches.
pub const PAGES: u32 = 3;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay_ms: u64,
}

impl MockResponse {
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay_ms: 0,
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "message": message }).to_string(),
            delay_ms: 0,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    scripted: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
}

pub struct MockCatalog {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockCatalog {
    pub async fn start() -> Self {
        let state = MockState::default();
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock catalog");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answers the next request to `path` with `response`.
    pub async fn enqueue(&self, path: &str, response: MockResponse) {
        self.state
            .scripted
            .lock()
            .await
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().await.clone()
    }

    /// Captured requests whose path is exactly `path`.
    pub async fn requests_to(&self, path: &str) -> Vec<CapturedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Drop for MockCatalog {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().to_string();
    let query: HashMap<String, String> = req
        .uri()
        .query()
        .map(|q| {
            q.split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();
    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    state.requests.lock().await.push(CapturedRequest {
        path: path.clone(),
        query: query.clone(),
        headers,
    });

    let scripted = state
        .scripted
        .lock()
        .await
        .get_mut(&path)
        .and_then(|queue| queue.pop_front());
    let response = scripted.unwrap_or_else(|| canned(&path, &query));

    if response.delay_ms > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(response.delay_ms)).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(response.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(response.body))
        .unwrap()
}

fn canned(path: &str, query: &HashMap<String, String>) -> MockResponse {
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    match segments.as_slice() {
        ["titles"] => {
            let prefix = query.get("genre").map(String::as_str).unwrap_or("tt");
            MockResponse::json(page_json(prefix, page))
        }
        ["titles", "utils", "genres"] => {
            MockResponse::json(json!({ "results": [null, "Comedy", "Drama"] }))
        }
        ["titles", "utils", "lists"] => {
            MockResponse::json(json!({ "results": ["most_pop_movies", "top_rated_250"] }))
        }
        ["titles", "random"] => MockResponse::json(json!({ "results": [title_json("tt0000042")] })),
        ["titles", "search", "keyword", keyword] => {
            MockResponse::json(page_json(&format!("kw-{}", keyword), page))
        }
        ["titles", id] => MockResponse::json(json!({ "results": title_json(id) })),
        _ => MockResponse::error(404, "no such route"),
    }
}

/// Catalog page with two titles, `next` set until [`PAGES`].
pub fn page_json(prefix: &str, page: u32) -> Value {
    let next = if page < PAGES {
        Value::String(format!("/titles?page={}", page + 1))
    } else {
        Value::Null
    };
    json!({
        "page": page,
        "next": next,
        "entries": 2,
        "results": [
            title_json(&format!("{}-{}-a", prefix, page)),
            title_json(&format!("{}-{}-b", prefix, page)),
        ],
    })
}

pub fn title_json(id: &str) -> Value {
    json!({
        "_id": format!("internal-{}", id),
        "id": id,
        "primaryImage": {
            "id": format!("rm-{}", id),
            "width": 800,
            "height": 1200,
            "url": format!("https://images.example/{}.jpg", id),
            "caption": { "plainText": format!("Poster of {}", id), "__typename": "Markdown" },
            "__typename": "Image"
        },
        "titleType": {
            "text": "Movie",
            "id": "movie",
            "isSeries": false,
            "isEpisode": false,
            "__typename": "TitleType"
        },
        "titleText": { "text": format!("Title {}", id), "__typename": "TitleText" },
        "originalTitleText": { "text": format!("Original {}", id), "__typename": "TitleText" },
        "releaseYear": { "year": 1999, "endYear": null, "__typename": "YearRange" },
        "releaseDate": { "day": 31, "month": 3, "year": 1999, "__typename": "ReleaseDate" }
    })
}
