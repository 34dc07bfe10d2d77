use std::fmt::Display;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::{Layer, Service};

use crate::types::request::Request;

/// Logs each request on the way in and each failure on the way out.
pub struct TraceService<S> {
    inner: S,
}

impl<S> TraceService<S> {
    fn new(inner: S) -> Self {
        TraceService { inner }
    }
}

impl<S> Service<Request> for TraceService<S>
where
    S: Service<Request>,
    S::Response: 'static,
    S::Error: Display + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // Steps are issued every tick, keep them out of the log.
        let description = (request != Request::Step).then(|| format!("{request:?}"));
        if let Some(request) = &description {
            tracing::debug!(%request, "request received");
        }
        let fut = self.inner.call(request);

        Box::pin(async move {
            let result = fut.await;
            if let Err(e) = &result {
                match &description {
                    Some(request) => tracing::warn!(%request, "request rejected: {e}"),
                    None => tracing::warn!("step rejected: {e}"),
                }
            }
            result
        })
    }
}

pub struct TraceLayer;

impl<S> Layer<S> for TraceLayer {
    type Service = TraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TraceService::new(inner)
    }
}
