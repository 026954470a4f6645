pub mod consts;
mod encoding;
pub mod error;
pub mod frame;
pub mod handshake;
pub mod mask;
pub mod message;
pub mod opcode;
pub mod read;
pub mod session;
pub mod write;
