use std::fmt;

use uuid::Uuid;

/// Random name for one connection, used only to tell connections apart in
/// the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u128);

impl ConnectionId {
    pub fn generate() -> Self {
        ConnectionId(Uuid::new_v4().as_u128())
    }
}

impl From<u128> for ConnectionId {
    fn from(value: u128) -> Self {
        ConnectionId(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the top 32 bits are plenty to read logs by
        write!(f, "{:08x}", (self.0 >> 96) as u32)
    }
}
