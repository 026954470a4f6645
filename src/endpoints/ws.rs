use anyhow::Result;
use futures::channel::mpsc::unbounded;
use futures::future::join;
use futures::StreamExt;
use hyper::header::{CONNECTION, SEC_WEBSOCKET_ACCEPT, SEC_WEBSOCKET_KEY, UPGRADE};
use hyper::upgrade::Upgraded;
use hyper::{Body, Request, Response, StatusCode};
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::shared::types::{MessageReceiver, MessageSender, StdResult};
use crate::shared::ConnectionId;
use crate::utils::*;
use crate::ws::error::SessionError;
use crate::ws::handshake::generate_key_from;
use crate::ws::message::MessageKind;
use crate::ws::session::{CloseReason, Session};

/// True when the request asks to switch to the websocket protocol.
pub fn is_websocket_upgrade(req: &Request<Body>) -> bool {
    req.headers()
        .get(UPGRADE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().eq_ignore_ascii_case("websocket"))
        .unwrap_or(false)
}

async fn log_messages(id: ConnectionId, mut receiver: MessageReceiver) -> usize {
    let mut logged = 0;
    while let Some(message) = receiver.next().await {
        match message.kind {
            MessageKind::Text => {
                info!("{}: <-- {}", id, String::from_utf8_lossy(&message.payload))
            }
            MessageKind::Binary => {
                info!("{}: <-- {} bytes of binary", id, message.payload.len())
            }
        }
        logged += 1;
    }
    debug!("{}: stopping message logging", id);
    logged
}

/// Runs the session and the message logger side by side. The logger keeps
/// draining after the session ends, with or without an error, so every
/// completed message is logged. Returns the session result and the number
/// of messages logged.
async fn serve_connection<S>(
    id: ConnectionId,
    stream: S,
    max_payload: u64,
) -> (StdResult<CloseReason, SessionError>, usize)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (sender, receiver): (MessageSender, MessageReceiver) = unbounded();

    let session_future = Session::new(id, stream, sender, max_payload).run();
    let log_future = log_messages(id, receiver);

    join(session_future, log_future).await
}

async fn handle_upgraded_connection(
    id: ConnectionId,
    upgraded: Upgraded,
    max_payload: u64,
) -> Result<()> {
    let (result, logged) = serve_connection(id, upgraded, max_payload).await;
    let reason = result?;
    info!("{}: connection closed ({:?}), {} messages", id, reason, logged);

    Ok(())
}

pub fn handle_ws(req: Request<Body>, max_payload: u64) -> Response<Body> {
    let sec_accept = match req.headers().get(SEC_WEBSOCKET_KEY) {
        Some(sec_key) => generate_key_from(sec_key.as_bytes()),
        None => {
            warn!("upgrade request without sec-websocket-key");
            return text_response(StatusCode::BAD_REQUEST, "Missing Sec-WebSocket-Key");
        }
    };

    let id = ConnectionId::generate();
    info!("{}: ws incoming connection", id);

    tokio::spawn(async move {
        match hyper::upgrade::on(req).await {
            Ok(upgraded) => {
                debug!("{}: upgraded", id);
                if let Err(e) = handle_upgraded_connection(id, upgraded, max_payload).await {
                    warn!("{}: error handling upgraded connection: {}", id, e);
                }
            }
            Err(e) => warn!("{}: upgrade error: {}", id, e),
        }
    });

    Response::builder()
        .status(StatusCode::SWITCHING_PROTOCOLS)
        .header(UPGRADE, "websocket")
        .header(CONNECTION, "Upgrade")
        .header(SEC_WEBSOCKET_ACCEPT, sec_accept)
        .body(Body::empty())
        .unwrap_or_else(|e| {
            warn!("{}: failed to build handshake response: {}", id, e);
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        })
}

#[cfg(test)]
mod tests {
    use tokio::io::{duplex, AsyncWriteExt};

    use super::*;
    use crate::ws::error::FrameError;
    use crate::ws::frame::Frame;
    use crate::ws::opcode::Opcode;

    fn upgrade_request(key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .uri("/chat")
            .header(UPGRADE, "WebSocket")
            .header(CONNECTION, "Upgrade");
        if let Some(key) = key {
            builder = builder.header(SEC_WEBSOCKET_KEY, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn detects_upgrade_header() {
        assert!(is_websocket_upgrade(&upgrade_request(None)));
        let plain = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert!(!is_websocket_upgrade(&plain));
    }

    #[test]
    fn missing_key_is_bad_request() {
        let response = handle_ws(upgrade_request(None), 1024);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn answers_with_switching_protocols() {
        let response = handle_ws(upgrade_request(Some("dGhlIHNhbXBsZSBub25jZQ==")), 1024);
        assert_eq!(response.status(), StatusCode::SWITCHING_PROTOCOLS);
        let headers = response.headers();
        assert_eq!(headers[UPGRADE], "websocket");
        assert_eq!(headers[CONNECTION], "Upgrade");
        assert_eq!(headers[SEC_WEBSOCKET_ACCEPT], "s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
    }

    #[tokio::test]
    async fn messages_before_truncated_frame_are_logged() {
        let (mut client, server) = duplex(1024);
        let mut input = Frame::new(Opcode::Text, b"hello".to_vec()).encode();
        input.push(0x81);
        client.write_all(&input).await.unwrap();
        client.shutdown().await.unwrap();

        let (result, logged) = serve_connection(ConnectionId::generate(), server, 1024).await;

        assert!(matches!(
            result,
            Err(SessionError::Frame(FrameError::Truncated { .. }))
        ));
        assert_eq!(logged, 1);
    }

    #[tokio::test]
    async fn close_handshake_logs_every_message() {
        let (mut client, server) = duplex(1024);
        let input = [
            Frame::new(Opcode::Text, b"one".to_vec()).encode(),
            Frame::new(Opcode::Binary, vec![2, 2]).encode(),
            Frame::new(Opcode::Close, Vec::new()).encode(),
        ]
        .concat();
        client.write_all(&input).await.unwrap();

        let (result, logged) = serve_connection(ConnectionId::generate(), server, 1024).await;

        assert_eq!(result.unwrap(), CloseReason::CloseHandshake);
        assert_eq!(logged, 2);
    }
}
