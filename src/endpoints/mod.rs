mod hello;
mod not_found;
mod ws;

pub use hello::hello;
pub use not_found::not_found;
pub use ws::{handle_ws, is_websocket_upgrade};
