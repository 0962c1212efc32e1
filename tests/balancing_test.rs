//! End-to-end round-robin behavior through the full proxy.

use std::net::SocketAddr;
use std::time::Duration;

use rr_proxy::config::ProxyConfig;
use rr_proxy::http::HttpServer;
use rr_proxy::lifecycle::Shutdown;

mod common;

async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn alternates_between_two_backends() {
    let b1 = common::spawn_backend("b1").await;
    let b2 = common::spawn_backend("b2").await;

    let config = ProxyConfig {
        backends: vec![format!("http://{b1}"), format!("http://{b2}")],
        ..ProxyConfig::default()
    };
    let (proxy, shutdown) = start_proxy(config).await;

    let client = client();
    let mut bodies = Vec::new();
    for _ in 0..6 {
        let res = client
            .get(format!("http://{proxy}/"))
            .send()
            .await
            .expect("proxy unreachable");
        assert_eq!(res.status(), 200);
        bodies.push(res.text().await.unwrap());
    }

    // Consecutive requests land on different backends.
    for pair in bodies.windows(2) {
        assert_ne!(pair[0], pair[1], "round robin repeated a backend: {bodies:?}");
    }
    // And the split is exactly even.
    let b1_hits = bodies.iter().filter(|b| *b == "b1").count();
    assert_eq!(b1_hits, 3);

    shutdown.trigger();
}

#[tokio::test]
async fn joins_endpoint_base_path_with_request_path() {
    let echo = common::spawn_echo_backend().await;

    let config = ProxyConfig {
        backends: vec![format!("http://{echo}/api")],
        ..ProxyConfig::default()
    };
    let (proxy, shutdown) = start_proxy(config).await;

    let res = client()
        .get(format!("http://{proxy}/users/5"))
        .send()
        .await
        .expect("proxy unreachable");
    let body = res.text().await.unwrap();
    let path = body.split('|').next().unwrap();

    assert_eq!(path, "/api/users/5");

    shutdown.trigger();
}

#[tokio::test]
async fn propagates_request_id_to_backend() {
    let echo = common::spawn_echo_backend().await;

    let config = ProxyConfig {
        backends: vec![format!("http://{echo}")],
        ..ProxyConfig::default()
    };
    let (proxy, shutdown) = start_proxy(config).await;

    // Client-supplied ID is forwarded verbatim.
    let res = client()
        .get(format!("http://{proxy}/x"))
        .header("x-request-id", "it-test-42")
        .send()
        .await
        .unwrap();
    let body = res.text().await.unwrap();
    assert_eq!(body.split('|').nth(1).unwrap(), "it-test-42");

    // Without one, the proxy generates an ID.
    let res = client().get(format!("http://{proxy}/x")).send().await.unwrap();
    let body = res.text().await.unwrap();
    let generated = body.split('|').nth(1).unwrap();
    assert_ne!(generated, "-");

    shutdown.trigger();
}
