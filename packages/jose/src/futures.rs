//! Concrete Future type for bridge operations.
//!
//! Work runs on a blocking worker and reports back over a oneshot channel;
//! the future only waits for that single message.

use crate::{
    api::{Promise, Rejection},
    error::{JoseError, JoseResult},
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// Pending result of one bridge operation
#[must_use = "the operation result is delivered only when awaited or settled"]
pub struct JoseOperation {
    rx: oneshot::Receiver<JoseResult<String>>,
}

impl JoseOperation {
    pub(crate) fn new(rx: oneshot::Receiver<JoseResult<String>>) -> Self {
        Self { rx }
    }

    /// Await the result and hand it to a callback-style promise
    pub async fn settle<P: Promise>(self, promise: P) {
        match self.await {
            Ok(value) => promise.resolve(jose_common::on_result(value)),
            Err(rejection) => {
                let rejection = jose_common::on_error(rejection);
                promise.reject(rejection.code, &rejection.message);
            }
        }
    }
}

impl Future for JoseOperation {
    type Output = Result<String, Rejection>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result.map_err(Rejection::from)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(Rejection::from(JoseError::TaskFailed))),
            Poll::Pending => Poll::Pending,
        }
    }
}
