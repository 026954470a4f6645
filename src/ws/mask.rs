/// XORs `payload[i]` with `key[i % 4]` in place. Masking and unmasking are
/// the same operation.
pub fn apply_mask(payload: &mut [u8], key: [u8; 4]) {
    for (i, byte) in payload.iter_mut().enumerate() {
        *byte ^= key[i % 4];
    }
}
