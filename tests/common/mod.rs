//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use broker_service::config::BrokerConfig;
use broker_service::http::BrokerServer;
use broker_service::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A request seen by a stub service.
#[derive(Debug, Clone)]
pub struct Captured {
    pub head: String,
    pub body: String,
}

/// A downstream service stub that answers every request the same way.
pub struct StubService {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    captured: Arc<Mutex<Vec<Captured>>>,
}

#[allow(dead_code)]
impl StubService {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a stub on an ephemeral port replying with `status` and `body`.
pub async fn start_stub_service(status: u16, body: &'static str) -> StubService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let captured = Arc::new(Mutex::new(Vec::new()));

    let (c, cap) = (calls.clone(), captured.clone());
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let c = c.clone();
                    let cap = cap.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        c.fetch_add(1, Ordering::SeqCst);
                        cap.lock().unwrap().push(request);

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    StubService {
        addr,
        calls,
        captured,
    }
}

/// Start a stub that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_hanging_service() -> StubService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));

    let c = calls.clone();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            c.fetch_add(1, Ordering::SeqCst);
            held.push(socket);
        }
    });

    StubService {
        addr,
        calls,
        captured: Arc::new(Mutex::new(Vec::new())),
    }
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        202 => "202 Accepted",
        400 => "400 Bad Request",
        401 => "401 Unauthorized",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Read one HTTP/1.1 message (head + Content-Length body).
async fn read_request(socket: &mut TcpStream) -> Option<Captured> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buf[head_end..]).to_string();
    Some(Captured { head, body })
}

/// Read one HTTP/1.1 response off a raw connection.
#[allow(dead_code)]
pub async fn read_response(socket: &mut TcpStream) -> Option<Captured> {
    read_request(socket).await
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Config whose targets point at the given URLs.
pub fn broker_config(auth_url: String, logger_url: String) -> BrokerConfig {
    let mut config = BrokerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.services.auth.url = auth_url;
    config.services.logger.url = logger_url;
    config.timeouts.downstream_secs = 2;
    config.timeouts.connect_secs = 1;
    config
}

/// Start a broker whose targets point at the given URLs.
pub async fn start_broker(auth_url: String, logger_url: String) -> (SocketAddr, Shutdown) {
    start_broker_with(broker_config(auth_url, logger_url)).await
}

/// Start a broker on an ephemeral port with `config`.
pub async fn start_broker_with(config: BrokerConfig) -> (SocketAddr, Shutdown) {
    let server = BrokerServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
