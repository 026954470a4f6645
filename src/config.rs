use std::net::SocketAddr;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "raw-websocket-server",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Config {
    /// bind:
    ///
    /// the address and port the http server listens on.
    /// websocket upgrade requests are accepted on any path.
    #[clap(long)]
    #[clap(env = "WS_BIND")]
    #[clap(default_value = "0.0.0.0:3031")]
    pub bind: SocketAddr,

    /// log level:
    ///
    /// one of off, error, warn, info, debug, trace.
    /// frame level details are only visible at debug and trace.
    #[clap(long)]
    #[clap(env = "WS_LOG_LEVEL")]
    #[clap(default_value = "info")]
    pub log_level: LevelFilter,

    /// max frame size:
    ///
    /// the largest payload a single frame may declare, in bytes.
    /// a frame declaring more closes the connection before
    /// anything is allocated for it.
    #[clap(long)]
    #[clap(env = "WS_MAX_FRAME_SIZE")]
    #[clap(default_value_t = 16 * 1024 * 1024)]
    pub max_frame_size: u64,
}

impl Config {
    pub fn load() -> Self {
        Self::parse()
    }
}
