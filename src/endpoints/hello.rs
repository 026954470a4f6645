use hyper::{Body, Response, StatusCode};

use crate::utils::*;

pub fn hello() -> Response<Body> {
    text_response(StatusCode::OK, "Hi client\r\n")
}
