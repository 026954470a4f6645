#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Binary,
}

/// A data message reassembled from one or more frames, payload unmasked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub payload: Vec<u8>,
}
impl Message {
    pub fn new(kind: MessageKind) -> Self {
        Message {
            kind,
            payload: Vec::new(),
        }
    }
}
