use futures::{Sink, SinkExt};
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use super::error::SessionError;
use super::frame::Frame;
use super::message::{Message, MessageKind};
use super::opcode::Opcode;
use super::read::read_frame;
use super::write::write_frame;
use crate::shared::ConnectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer closed the stream between two frames.
    Disconnected,
    /// The peer sent a close frame and it was echoed back.
    CloseHandshake,
}

/// Drives one upgraded connection: reads frames, answers pings and close
/// frames, and hands every reassembled message to `handler`.
///
/// Replies are written before the next frame is read, so they keep the order
/// of the frames that caused them.
pub struct Session<S, H> {
    id: ConnectionId,
    stream: S,
    handler: H,
    max_payload: u64,
    // `Some` while a fragmented message is being accumulated
    message: Option<Message>,
}

impl<S, H> Session<S, H>
where
    S: AsyncRead + AsyncWrite + Unpin,
    H: Sink<Message> + Unpin,
{
    pub fn new(id: ConnectionId, stream: S, handler: H, max_payload: u64) -> Self {
        Session {
            id,
            stream,
            handler,
            max_payload,
            message: None,
        }
    }

    /// Runs until the peer disconnects or completes the close handshake.
    /// The stream is dropped on return.
    pub async fn run(mut self) -> Result<CloseReason, SessionError> {
        loop {
            let mut frame = match read_frame(&mut self.stream, self.max_payload).await? {
                Some(frame) => frame,
                None => {
                    if self.message.is_some() {
                        debug!("{}: disconnected with a message in progress", self.id);
                    }
                    return Ok(CloseReason::Disconnected);
                }
            };

            if frame.masking_key.is_none() {
                debug!("{}: received unmasked {:?} frame", self.id, frame.opcode);
            }
            if frame.opcode.is_control() && !frame.is_final() {
                debug!("{}: received fragmented {:?} frame", self.id, frame.opcode);
            }
            frame.unmask();

            match frame.opcode {
                Opcode::Close => {
                    if self.message.take().is_some() {
                        debug!("{}: discarding unfinished message on close", self.id);
                    }
                    let payload = std::mem::take(&mut frame.payload);
                    let reply = frame.reply(Opcode::Close, payload);
                    write_frame(&mut self.stream, &reply)
                        .await
                        .map_err(SessionError::Write)?;
                    info!("{}: close handshake completed", self.id);
                    return Ok(CloseReason::CloseHandshake);
                }
                Opcode::Ping => {
                    let payload = std::mem::take(&mut frame.payload);
                    let reply = frame.reply(Opcode::Pong, payload);
                    write_frame(&mut self.stream, &reply)
                        .await
                        .map_err(SessionError::Write)?;
                    debug!("{}: answered ping", self.id);
                }
                Opcode::Pong => debug!("{}: pong received", self.id),
                opcode if opcode.is_data() => {
                    self.accumulate(frame).await?;
                }
                other => warn!("{}: ignoring frame with reserved opcode {:?}", self.id, other),
            }
        }
    }

    async fn accumulate(&mut self, frame: Frame) -> Result<(), SessionError> {
        let kind = match frame.opcode {
            Opcode::Text => MessageKind::Text,
            _ => MessageKind::Binary,
        };
        let message = self.message.get_or_insert_with(|| Message::new(kind));
        message.payload.extend_from_slice(&frame.payload);

        if !frame.is_final() {
            return Ok(());
        }
        if let Some(message) = self.message.take() {
            debug!(
                "{}: {:?} message of {} bytes complete",
                self.id,
                message.kind,
                message.payload.len()
            );
            self.handler
                .send(message)
                .await
                .map_err(|_| SessionError::HandlerGone)?;
        }
        Ok(())
    }
}
