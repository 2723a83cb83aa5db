//! End-to-end tests driving the server over real sockets with raw
//! HTTP/1.1 byte strings.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc, Semaphore};
use tokio::time::timeout;

use stockroom::{Assets, Item, ItemStore, Server, ServerConfig, GLOBAL_CONFIG};

fn ensure_config() {
    GLOBAL_CONFIG
        .get_or_init(|| ServerConfig::set_up_config("conf.toml").expect("load conf.toml"));
}

async fn start_test_server(store: Arc<ItemStore>) -> SocketAddr {
    ensure_config();
    let assets = Arc::new(Assets::load("templates", "static").expect("load assets"));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let (notify_shutdown, _) = broadcast::channel(1);
    let (shutdown_complete_tx, _shutdown_complete_rx) = mpsc::channel(1);
    let server = Server::new(
        listener,
        Arc::new(Semaphore::new(16)),
        notify_shutdown,
        shutdown_complete_tx,
        store,
        assets,
    );
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    addr
}

async fn read_response(mut stream: TcpStream) -> String {
    let mut response = Vec::new();
    timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("response timed out")
        .expect("read response");
    String::from_utf8_lossy(&response).into_owned()
}

async fn send_raw(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream.write_all(raw).await.expect("write request");
    read_response(stream).await
}

fn form_post(path: &str, content_type: &str, body: &str) -> Vec<u8> {
    format!(
        "POST {} HTTP/1.1\r\nHost: localhost\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n{}",
        path,
        content_type,
        body.len(),
        body
    )
    .into_bytes()
}

#[tokio::test]
async fn test_listing_renders_seeded_items() {
    let store = Arc::new(ItemStore::new());
    store.append(Item::new("Cemento gris", 2, 150.0));
    let addr = start_test_server(store).await;

    let response = send_raw(addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Type: text/html; charset=utf-8"));
    assert!(response.contains("Cemento gris"));
    assert!(response.contains("300.00"));
}

#[tokio::test]
async fn test_edit_route_matrix() {
    let store = Arc::new(ItemStore::new());
    store.append(Item::new("Arena", 5, 80.0));
    let addr = start_test_server(store).await;

    let found = send_raw(addr, b"GET /edit?index=0 HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(found.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(found.contains("Arena"));
    assert!(found.contains("value=\"5\""));

    let missing = send_raw(addr, b"GET /edit?index=5 HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(missing.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(missing.contains("El item solicitado no existe"));

    let no_param = send_raw(addr, b"GET /edit HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(no_param.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(no_param.contains("Índice de item requerido"));

    let bad_param = send_raw(addr, b"GET /edit?index=abc HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(bad_param.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(bad_param.contains("Índice de item inválido"));
}

#[tokio::test]
async fn test_submit_appends_item_and_redirects() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store.clone()).await;

    let request = form_post(
        "/submit",
        "application/x-www-form-urlencoded",
        "itemName=Widget&itemCost=3.50",
    );
    let response = send_raw(addr, &request).await;
    assert!(response.starts_with("HTTP/1.1 303 See Other\r\n"));
    assert!(response.contains("Location: /\r\n"));

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(0), Some(Item::new("Widget", 1, 3.5)));
}

#[tokio::test]
async fn test_submit_rejects_other_content_types() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store.clone()).await;

    let request = form_post("/submit", "application/json", "{\"itemName\":\"Widget\"}");
    let response = send_raw(addr, &request).await;
    assert!(response.starts_with("HTTP/1.1 415 Unsupported Media Type\r\n"));
    assert!(response.contains("Contenido no soportado"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_content_type_header_is_case_insensitive() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store.clone()).await;

    let body = "itemName=Clavos&itemQuantity=3&itemCost=1.25";
    let raw = format!(
        "POST /submit HTTP/1.1\r\nHost: localhost\r\nCONTENT-TYPE: application/x-www-form-urlencoded\r\nCONTENT-LENGTH: {}\r\n\r\n{}",
        body.len(),
        body
    );
    let response = send_raw(addr, raw.as_bytes()).await;
    assert!(response.starts_with("HTTP/1.1 303 See Other\r\n"));
    assert_eq!(store.get(0), Some(Item::new("Clavos", 3, 1.25)));
}

#[tokio::test]
async fn test_fragmented_request_parses_like_a_single_write() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store.clone()).await;

    let whole = form_post(
        "/submit",
        "application/x-www-form-urlencoded",
        "itemName=Tubo&itemQuantity=2&itemCost=9.75",
    );
    let single_write = send_raw(addr, &whole).await;

    let mut stream = TcpStream::connect(addr).await.expect("connect");
    for chunk in whole.chunks(7) {
        stream.write_all(chunk).await.expect("write chunk");
        stream.flush().await.expect("flush chunk");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    let fragmented = read_response(stream).await;

    assert_eq!(single_write, fragmented);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(0), store.get(1));
}

#[tokio::test]
async fn test_short_body_answers_after_peer_close() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store.clone()).await;

    // declares 100 bytes but sends only a fragment, then closes its write
    // side; the reader falls back to what arrived instead of hanging
    let raw = "POST /submit HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: 100\r\n\r\nitemName=X";
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream.write_all(raw.as_bytes()).await.expect("write");
    stream.shutdown().await.expect("shutdown write half");

    let response = read_response(stream).await;
    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("Faltan campos requeridos."));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_empty_request_closes_silently() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store).await;

    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream.shutdown().await.expect("shutdown write half");
    let response = read_response(stream).await;
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_unmatched_route_is_404_page() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store).await;

    let response = send_raw(addr, b"GET /missing HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(response.contains("404 - Recurso no encontrado"));
}

#[tokio::test]
async fn test_malformed_request_line_is_bad_request() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store).await;

    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream.write_all(b"GET / HTTP/1.1").await.expect("write");
    stream.shutdown().await.expect("shutdown write half");
    let response = read_response(stream).await;
    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.contains("Petición inválida"));
}

#[tokio::test]
async fn test_export_returns_csv_attachment() {
    let store = Arc::new(ItemStore::new());
    store.append(Item::new("Cemento", 2, 10.0));
    store.append(Item::new("Arena \"fina\"", 1, 5.5));
    let addr = start_test_server(store).await;

    let response = send_raw(addr, b"GET /export HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Type: text/csv; charset=utf-8"));
    assert!(response.contains("Content-Disposition: attachment; filename=\"items.csv\""));
    assert!(response.contains("Nombre,Cantidad,Costo Unitario,Total"));
    assert!(response.contains("\"Cemento\",2,\"10.00\",\"20.00\""));
    assert!(response.contains("\"Arena \"\"fina\"\"\",1,\"5.50\",\"5.50\""));
    assert!(response.contains("\"Total\",,,\"25.50\""));
}

#[tokio::test]
async fn test_update_replaces_item_in_place() {
    let store = Arc::new(ItemStore::new());
    store.append(Item::new("Arena", 1, 5.0));
    let addr = start_test_server(store.clone()).await;

    let request = form_post(
        "/update",
        "application/x-www-form-urlencoded",
        "itemIndex=0&itemName=Grava&itemQuantity=4&itemCost=7.25",
    );
    let response = send_raw(addr, &request).await;
    assert!(response.starts_with("HTTP/1.1 303 See Other\r\n"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(0), Some(Item::new("Grava", 4, 7.25)));

    let out_of_range = form_post(
        "/update",
        "application/x-www-form-urlencoded",
        "itemIndex=9&itemName=Grava&itemCost=7.25",
    );
    let missing = send_raw(addr, &out_of_range).await;
    assert!(missing.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(missing.contains("El item solicitado no existe."));
}

#[tokio::test]
async fn test_oversized_declared_body_is_rejected() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store).await;

    let raw = "POST /submit HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: 2000000\r\n\r\n";
    let response = send_raw(addr, raw.as_bytes()).await;
    assert!(response.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
    assert!(response.contains("Petición demasiado grande"));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let store = Arc::new(ItemStore::new());
    let addr = start_test_server(store).await;

    let styles = send_raw(addr, b"GET /static/styles.css HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(styles.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(styles.contains("Content-Type: text/css; charset=utf-8"));

    let script =
        send_raw(addr, b"GET /static/formatter.js HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(script.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(script.contains("Content-Type: application/javascript; charset=utf-8"));

    let unknown =
        send_raw(addr, b"GET /static/other.txt HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(unknown.starts_with("HTTP/1.1 404 Not Found\r\n"));
}
