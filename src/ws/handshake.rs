use sha1::{Digest, Sha1};

const WS_MAGIC_CONST: &[u8] = b"258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

fn sha1(msg: &[u8]) -> [u8; 20] {
    let mut buffer = [0; 20];
    buffer.copy_from_slice(&Sha1::digest(msg));
    buffer
}

/// Value of the `Sec-WebSocket-Accept` header for a given `Sec-WebSocket-Key`.
pub fn generate_key_from(input: &[u8]) -> String {
    let concatenated = [input, WS_MAGIC_CONST].concat();
    let hash = sha1(&concatenated);
    base64::encode(&hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc_sample_key() {
        assert_eq!(
            generate_key_from(b"dGhlIHNhbXBsZSBub25jZQ=="),
            "s3pPLMBiTxaQ9kYGzzhZRbK+xOo="
        );
    }
}
