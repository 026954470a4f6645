use std::io;

use log::trace;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::consts::*;
use super::encoding::encode_length;
use super::frame::Frame;

impl Frame {
    /// Serializes the frame as is. The payload must already be in the state
    /// the mask flag says it is in, nothing is masked or unmasked here.
    pub fn encode(&self) -> Vec<u8> {
        let headers = &self.headers;
        let first_byte = bit(headers.fin, FIN_MASK)
            | bit(headers.rsv1, RSV1_MASK)
            | bit(headers.rsv2, RSV2_MASK)
            | bit(headers.rsv3, RSV3_MASK)
            | self.opcode.encode();

        let mut length = encode_length(self.payload_length());
        length[0] |= bit(headers.mask, MASKED_MASK);

        let key: &[u8] = match (&self.masking_key, headers.mask) {
            (Some(key), true) => key,
            _ => &[],
        };
        [&[first_byte][..], &length, key, &self.payload].concat()
    }
}

pub async fn write_frame<T: AsyncWrite + Unpin>(writer: &mut T, frame: &Frame) -> io::Result<()> {
    let buffer = frame.encode();
    trace!(
        "writing frame {:?} fin={} length={}",
        frame.opcode,
        frame.headers.fin,
        frame.payload_length()
    );
    writer.write_all(&buffer).await?;
    writer.flush().await
}
