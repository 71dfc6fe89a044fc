//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use crate::error::BrowserError;
use crate::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo};
use crate::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(crate) type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// In-flight requests waiting for their response.
pub(crate) type PendingMap = Mutex<HashMap<u64, oneshot::Sender<Result<Value, BrowserError>>>>;

const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// CDP client connected to one Chrome instance.
///
/// Commands are matched to responses by request id; CDP events are not
/// consumed here — page state is observed by polling the DOM, which keeps
/// the single-threaded wait discipline simple.
pub struct CdpClient {
    http_endpoint: String,
    ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
    request_id: Arc<AtomicU64>,
    pending: Arc<PendingMap>,
    _recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given debugging endpoint
    /// (e.g. `http://localhost:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, BrowserError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();

        let version_url = format!("{http_endpoint}/json/version");
        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .map_err(|e| BrowserError::ConnectionFailed(format!("{endpoint}: {e}")))?
            .json()
            .await
            .map_err(|e| BrowserError::ConnectionFailed(format!("{endpoint}: {e}")))?;

        debug!("Connecting to {}", version.browser);

        let (ws_stream, _) = tokio_tungstenite::connect_async(&version.web_socket_debugger_url)
            .await
            .map_err(|e| BrowserError::ConnectionFailed(format!("WebSocket: {e}")))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: Arc<PendingMap> = Arc::new(Mutex::new(HashMap::new()));

        let recv_task = {
            let pending = pending.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending).await;
            })
        };

        Ok(Self {
            http_endpoint,
            ws_tx: Arc::new(tokio::sync::Mutex::new(ws_sink)),
            request_id: Arc::new(AtomicU64::new(1)),
            pending,
            _recv_task: recv_task,
        })
    }

    /// Route incoming messages to their waiting caller; drop events.
    async fn receive_loop(mut ws_source: WsSource, pending: Arc<PendingMap>) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    let resp = match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => resp,
                        Err(e) => {
                            warn!("Unparsable CDP message: {}", e);
                            continue;
                        }
                    };

                    let Some(id) = resp.id else {
                        // Event; page state is read by polling instead.
                        continue;
                    };

                    if let Some(tx) = pending.lock().remove(&id) {
                        let result = match resp.error {
                            Some(err) => Err(BrowserError::Protocol {
                                code: err.code,
                                message: err.message,
                            }),
                            None => Ok(resp.result.unwrap_or(Value::Null)),
                        };
                        let _ = tx.send(result);
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("CDP WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("CDP WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    }

    /// Send a CDP command and wait for its response.
    pub async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, BrowserError> {
        send_command(
            &self.ws_tx,
            &self.pending,
            &self.request_id,
            method,
            params,
            session_id.map(str::to_string),
        )
        .await
    }

    /// Open a new page, attach to it, and enable the required domains.
    pub async fn new_page(&self, url: &str) -> Result<PageSession, BrowserError> {
        // Chrome requires PUT for /json/new
        let create_url = format!("{}/json/new?{}", self.http_endpoint, url);
        let page_info: PageInfo = reqwest::Client::new()
            .put(&create_url)
            .send()
            .await?
            .json()
            .await?;
        debug!("Created page {} at {}", page_info.id, page_info.url);

        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": page_info.id,
                    "flatten": true,
                })),
                None,
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| BrowserError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(
            page_info.id,
            session_id,
            self.ws_tx.clone(),
            self.pending.clone(),
            self.request_id.clone(),
        );
        session.enable_domains().await?;
        Ok(session)
    }

    /// Close a page by target id.
    pub async fn close_page(&self, target_id: &str) -> Result<(), BrowserError> {
        self.call(
            "Target.closeTarget",
            Some(json!({"targetId": target_id})),
            None,
        )
        .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self._recv_task.abort();
    }
}

/// Shared command dispatch for the client and its page sessions.
pub(crate) async fn send_command(
    ws_tx: &tokio::sync::Mutex<WsSink>,
    pending: &PendingMap,
    request_id: &AtomicU64,
    method: &str,
    params: Option<Value>,
    session_id: Option<String>,
) -> Result<Value, BrowserError> {
    let id = request_id.fetch_add(1, Ordering::SeqCst);
    let request = CdpRequest {
        id,
        method: method.to_string(),
        params,
        session_id,
    };

    let json = serde_json::to_string(&request)?;
    trace!("CDP send: {}", json);

    let (tx, rx) = oneshot::channel();
    pending.lock().insert(id, tx);

    {
        let mut ws = ws_tx.lock().await;
        ws.send(Message::Text(json.into())).await?;
    }

    match tokio::time::timeout(COMMAND_TIMEOUT, rx).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(BrowserError::SessionClosed),
        Err(_) => {
            pending.lock().remove(&id);
            Err(BrowserError::Timeout(format!("Command {method} timed out")))
        }
    }
}
