mod id;
pub mod types;

pub use id::ConnectionId;
