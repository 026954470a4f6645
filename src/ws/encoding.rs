use super::consts::{LENGTH_U16, LENGTH_U64, MAX_INLINE_LENGTH};

/// Encodes the 7 bit length field and the extended length that follows it,
/// always picking the shortest form. The mask bit is not included.
pub fn encode_length(length: u64) -> Vec<u8> {
    if length <= MAX_INLINE_LENGTH as u64 {
        // the first byte is the length
        vec![length as u8]
    } else if length <= u16::MAX as u64 {
        // the first byte is 126, read the next 2 bytes as u16 for a length
        [&[LENGTH_U16][..], &(length as u16).to_be_bytes()].concat()
    } else {
        // the first byte is 127, read the next 8 bytes as u64 for a length
        [&[LENGTH_U64][..], &length.to_be_bytes()].concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_minimal_form() {
        assert_eq!(encode_length(0), vec![0]);
        assert_eq!(encode_length(10), vec![10]);
        assert_eq!(encode_length(125), vec![125]);
        assert_eq!(encode_length(126), vec![126, 0, 126]);
        assert_eq!(encode_length(200), vec![126, 0, 200]);
        assert_eq!(encode_length(65535), vec![126, 0xff, 0xff]);
        assert_eq!(encode_length(65536), vec![127, 0, 0, 0, 0, 0, 1, 0, 0]);
        assert_eq!(
            encode_length(70000),
            vec![127, 0, 0, 0, 0, 0, 0x01, 0x11, 0x70]
        );
    }
}
