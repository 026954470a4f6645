use std::io;

use log::trace;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::consts::{LENGTH_MASK, LENGTH_U16, LENGTH_U64};
use super::error::FrameError;
use super::frame::{Frame, Headers};
use super::opcode::Opcode;

fn truncated(stage: &'static str) -> impl FnOnce(io::Error) -> FrameError {
    move |source| FrameError::Truncated { stage, source }
}

pub async fn read_length_u16<T: AsyncRead + Unpin>(reader: &mut T) -> Result<u64, FrameError> {
    let mut buf = [0u8; 2];
    reader
        .read_exact(&mut buf)
        .await
        .map_err(truncated("16 bit length"))?;
    Ok(u16::from_be_bytes(buf) as u64)
}
pub async fn read_length_u64<T: AsyncRead + Unpin>(reader: &mut T) -> Result<u64, FrameError> {
    let mut buf = [0u8; 8];
    reader
        .read_exact(&mut buf)
        .await
        .map_err(truncated("64 bit length"))?;
    Ok(u64::from_be_bytes(buf))
}

pub async fn read_mask<T: AsyncRead + Unpin>(reader: &mut T) -> Result<[u8; 4], FrameError> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .await
        .map_err(truncated("masking key"))?;
    Ok(buf)
}

/// Reads exactly one frame off the stream.
///
/// Returns `Ok(None)` when the stream ends before the first byte of a frame,
/// which is how a peer disconnects in an orderly way. The payload is
/// returned as it was on the wire, still masked if the frame was masked.
/// A declared length above `max_payload` fails before anything is allocated.
pub async fn read_frame<T: AsyncRead + Unpin>(
    reader: &mut T,
    max_payload: u64,
) -> Result<Option<Frame>, FrameError> {
    let first = match reader.read_u8().await {
        Ok(byte) => byte,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(FrameError::Io(e)),
    };
    let second = reader
        .read_u8()
        .await
        .map_err(truncated("second header byte"))?;

    let headers = Headers::decode(first, second);
    let opcode = Opcode::decode(first);

    let length = match second & LENGTH_MASK {
        LENGTH_U16 => read_length_u16(reader).await?,
        LENGTH_U64 => read_length_u64(reader).await?,
        value => value as u64,
    };
    if length > max_payload {
        return Err(FrameError::PayloadTooLarge {
            length,
            limit: max_payload,
        });
    }

    let masking_key = if headers.mask {
        Some(read_mask(reader).await?)
    } else {
        None
    };

    // reading payload data, still masked
    let mut payload = vec![0; length as usize];
    reader
        .read_exact(&mut payload)
        .await
        .map_err(truncated("payload"))?;

    trace!(
        "read frame {:?} fin={} masked={} length={}",
        opcode,
        headers.fin,
        headers.mask,
        length
    );

    Ok(Some(Frame {
        headers,
        opcode,
        masking_key,
        payload,
    }))
}
