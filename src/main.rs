use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use log::{debug, info};

mod config;
mod endpoints;
mod shared;
mod utils;
mod ws;

use config::Config;
use endpoints::*;
use shared::types::StdResult;

async fn request_router(
    req: Request<Body>,
    config: Arc<Config>,
) -> StdResult<Response<Body>, Infallible> {
    debug!("{} {}", req.method(), req.uri());
    if is_websocket_upgrade(&req) {
        return Ok(handle_ws(req, config.max_frame_size));
    }
    let response = match req.uri().path() {
        "/" => hello(),
        _ => not_found(),
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Arc::new(Config::load());
    simple_logger::SimpleLogger::new()
        .with_level(config.log_level)
        .init()?;

    let addr = config.bind;
    let service = make_service_fn(move |_addr| {
        let config = config.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                request_router(req, config.clone())
            }))
        }
    });
    let server = Server::try_bind(&addr)?.serve(service);

    info!("Listening at http://{}", addr);

    server.await?;

    Ok(())
}
