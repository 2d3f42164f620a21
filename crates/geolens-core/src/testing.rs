//! Test helpers: local HTTP stand-ins for the upstream APIs.

use std::net::SocketAddr;

/// Serve `router` on an ephemeral localhost port and return its address.
pub(crate) async fn spawn_upstream(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
