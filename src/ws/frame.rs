use super::consts::*;
use super::mask::apply_mask;
use super::opcode::Opcode;

/// Flags carried by the first two bytes of a frame, unpacked to booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headers {
    pub fin: bool,
    pub rsv1: bool,
    pub rsv2: bool,
    pub rsv3: bool,
    pub mask: bool,
}
impl Headers {
    // first byte holds fin and reserved bits, second byte holds the mask bit
    pub fn decode(first: u8, second: u8) -> Self {
        Headers {
            fin: is_fin(first),
            rsv1: is_rsv1(first),
            rsv2: is_rsv2(first),
            rsv3: is_rsv3(first),
            mask: is_mask(second),
        }
    }
    /// Final frame, no reserved bits, no mask.
    #[cfg(test)]
    pub fn fin() -> Self {
        Headers {
            fin: true,
            rsv1: false,
            rsv2: false,
            rsv3: false,
            mask: false,
        }
    }
}

/// One frame as it travels on the wire.
///
/// `payload` is kept in whatever state it was read or built in: a frame
/// read from a client still carries the masked bytes until [`Frame::unmask`]
/// is called. `masking_key` is `Some` exactly when `headers.mask` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub headers: Headers,
    pub opcode: Opcode,
    pub masking_key: Option<[u8; 4]>,
    pub payload: Vec<u8>,
}
impl Frame {
    /// An unmasked, final frame with no reserved bits.
    #[cfg(test)]
    pub fn new(opcode: Opcode, payload: Vec<u8>) -> Self {
        Frame {
            headers: Headers::fin(),
            opcode,
            masking_key: None,
            payload,
        }
    }

    pub fn payload_length(&self) -> u64 {
        self.payload.len() as u64
    }

    pub fn is_final(&self) -> bool {
        self.headers.fin
    }

    /// XORs the payload against the masking key and drops the key.
    /// Calling it again is a no-op.
    pub fn unmask(&mut self) {
        if let Some(key) = self.masking_key.take() {
            apply_mask(&mut self.payload, key);
        }
        self.headers.mask = false;
    }

    /// Copy of this frame with another opcode, unmasked and carrying the
    /// given payload. Used for pong and close replies.
    pub fn reply(&self, opcode: Opcode, payload: Vec<u8>) -> Self {
        Frame {
            headers: Headers {
                mask: false,
                ..self.headers.clone()
            },
            opcode,
            masking_key: None,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_from_bytes() {
        let headers = Headers::decode(0b1010_0001, 0b1000_0101);
        assert!(headers.fin);
        assert!(!headers.rsv1);
        assert!(headers.rsv2);
        assert!(!headers.rsv3);
        assert!(headers.mask);
    }

    #[test]
    fn unmask_is_idempotent() {
        let key = [0x37, 0xfa, 0x21, 0x3d];
        let mut payload = b"Hello".to_vec();
        apply_mask(&mut payload, key);

        let mut frame = Frame {
            headers: Headers {
                mask: true,
                ..Headers::fin()
            },
            opcode: Opcode::Text,
            masking_key: Some(key),
            payload,
        };
        frame.unmask();
        assert_eq!(frame.payload, b"Hello");
        assert_eq!(frame.masking_key, None);
        assert!(!frame.headers.mask);

        frame.unmask();
        assert_eq!(frame.payload, b"Hello");
    }

    #[test]
    fn unmask_of_plain_frame_keeps_payload() {
        let mut frame = Frame::new(Opcode::Binary, vec![1, 2, 3]);
        frame.unmask();
        assert_eq!(frame.payload, vec![1, 2, 3]);
    }

    #[test]
    fn reply_keeps_flags_and_drops_mask() {
        let frame = Frame {
            headers: Headers {
                fin: true,
                rsv1: true,
                rsv2: false,
                rsv3: false,
                mask: true,
            },
            opcode: Opcode::Ping,
            masking_key: Some([1, 2, 3, 4]),
            payload: vec![9, 9],
        };
        let pong = frame.reply(Opcode::Pong, b"abc".to_vec());
        assert_eq!(pong.opcode, Opcode::Pong);
        assert!(pong.headers.rsv1);
        assert!(!pong.headers.mask);
        assert_eq!(pong.masking_key, None);
        assert_eq!(pong.payload_length(), 3);
    }
}
