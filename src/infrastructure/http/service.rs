//! Handler Service
//!
//! 把 `HttpHandler` 包装成 tower `Service`，供 Router 挂载

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{extract::Request, response::Response};
use futures_util::future::{ready, Ready};
use tower::Service;

use crate::infrastructure::plugin::HttpHandler;

#[derive(Clone)]
pub struct HandlerService {
    handler: Arc<dyn HttpHandler>,
}

impl HandlerService {
    pub fn new(handler: Arc<dyn HttpHandler>) -> Self {
        Self { handler }
    }
}

impl Service<Request> for HandlerService {
    type Response = Response;
    type Error = Infallible;
    type Future = Ready<Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // 请求体不参与处理
        let (parts, _body) = request.into_parts();
        ready(Ok(self.handler.serve(&parts)))
    }
}
