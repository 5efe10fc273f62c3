//! Local stand-in for the exchange-rate provider.

use std::sync::{Arc, Mutex};

use axum::http::{StatusCode, Uri};
use axum::Router;
use serde_json::json;

/// Serve `body` with `status` for every path; returns the base URL and
/// the list of request paths seen.
pub async fn spawn_provider(
    status: StatusCode,
    body: String,
) -> (String, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();

    let app = Router::new().fallback(move |uri: Uri| {
        let body = body.clone();
        let recorded = recorded.clone();
        async move {
            recorded.lock().unwrap().push(uri.path().to_string());
            (status, body)
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), seen)
}

pub fn usd_rates() -> String {
    json!({
        "result": "success",
        "base_code": "USD",
        "conversion_rates": {
            "USD": 1.0,
            "EUR": 0.856,
            "JPY": 149.5,
            "INR": 83.12
        }
    })
    .to_string()
}
