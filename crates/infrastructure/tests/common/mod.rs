//! Local stub servers for integration tests.

#![allow(dead_code)]

use axum::Router;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server runs");
    });
    format!("http://{addr}")
}
