//! Loopback Redirect Listener
//!
//! Desktop stand-in for a sign-in popup: the provider redirects the system
//! browser to `http://localhost:<port>/__/auth/handler`, and this listener
//! captures that URL.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use url::Url;

use super::provider::{AuthError, AuthResult};

pub const CALLBACK_PATH: &str = "/__/auth/handler";

/// Per-connection budget for sending the request head
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(10);

const DONE_PAGE: &str = "<html><body><h3>Signed in.</h3><p>You can close this window and return to Pantry Tracker.</p></body></html>";
const FAILED_PAGE: &str = "<html><body><h3>Sign-in was not completed.</h3><p>You can close this window.</p></body></html>";

pub struct CallbackListener {
    listener: TcpListener,
    port: u16,
}

/// What one browser request told us
#[derive(Debug, PartialEq, Eq)]
enum Callback {
    /// Redirect reached the handler; full URL
    Captured(String),
    /// Provider redirected with `error=...`
    Rejected(String),
}

impl CallbackListener {
    /// Bind an ephemeral port on 127.0.0.1
    pub async fn bind() -> AuthResult<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .map_err(|e| AuthError::Callback(format!("bind failed: {}", e)))?;
        let port = listener
            .local_addr()
            .map_err(|e| AuthError::Callback(e.to_string()))?
            .port();
        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn continue_uri(&self) -> String {
        format!("http://localhost:{}{}", self.port, CALLBACK_PATH)
    }

    /// Serve requests until the callback arrives, returning its full URL
    ///
    /// Each connection is handled on its own task, so an idle or broken
    /// connection (speculative preconnects, favicon requests) never holds
    /// up the redirect.
    pub async fn accept(self) -> AuthResult<String> {
        let (tx, mut rx) = mpsc::channel::<Callback>(1);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, _)) => {
                        let tx = tx.clone();
                        let port = self.port;
                        tokio::spawn(async move {
                            match tokio::time::timeout(REQUEST_READ_TIMEOUT, handle_connection(stream, port)).await {
                                Ok(Ok(Some(callback))) => {
                                    let _ = tx.send(callback).await;
                                }
                                Ok(Ok(None)) => {}
                                Ok(Err(e)) => log::debug!("Callback connection dropped: {}", e),
                                Err(_) => log::debug!("Callback connection sent no request"),
                            }
                        });
                    }
                    Err(e) => log::warn!("Callback listener accept failed: {}", e),
                },
                Some(callback) = rx.recv() => {
                    return match callback {
                        Callback::Captured(url) => Ok(url),
                        Callback::Rejected(error) => Err(AuthError::Callback(format!(
                            "provider returned error: {}",
                            error
                        ))),
                    };
                }
            }
        }
    }
}

async fn handle_connection(mut stream: TcpStream, port: u16) -> std::io::Result<Option<Callback>> {
    let (reader, mut writer) = stream.split();
    let mut reader = BufReader::new(reader);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    // Drain headers so closing the socket does not reset the connection
    loop {
        let mut header = String::new();
        let read = reader.read_line(&mut header).await?;
        if read == 0 || header.trim().is_empty() {
            break;
        }
    }

    let url = match request_target(&request_line)
        .and_then(|target| Url::parse(&format!("http://localhost:{}{}", port, target)).ok())
    {
        Some(url) => url,
        None => {
            respond(&mut writer, "400 Bad Request", "").await?;
            return Ok(None);
        }
    };

    if url.path() != CALLBACK_PATH {
        respond(&mut writer, "404 Not Found", "").await?;
        return Ok(None);
    }

    if let Some((_, error)) = url.query_pairs().find(|(key, _)| key == "error") {
        respond(&mut writer, "200 OK", FAILED_PAGE).await?;
        return Ok(Some(Callback::Rejected(error.into_owned())));
    }

    respond(&mut writer, "200 OK", DONE_PAGE).await?;
    Ok(Some(Callback::Captured(url.into())))
}

/// `GET /path?query HTTP/1.1` -> `/path?query`
fn request_target(request_line: &str) -> Option<&str> {
    let mut parts = request_line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("GET"), Some(target)) if target.starts_with('/') => Some(target),
        _ => None,
    }
}

async fn respond<W>(writer: &mut W, status: &str, body: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    writer.write_all(response.as_bytes()).await?;
    writer.flush().await
}
