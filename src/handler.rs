//! Action handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! Every `async fn` has its own concrete type, and so does the future it
//! returns. A controller still keeps all of its actions in one
//! `Vec<Action>`, and a `Vec` holds one type only. So at registration each
//! handler is hidden behind the [`ErasedHandler`] trait object and every
//! action stores the same thing: an `Arc<dyn ErasedHandler>`.
//!
//! ```text
//! async fn show(req: Request) -> Response { … }   ← user writes this
//!        ↓ Action::new("show", Method::GET, &["{i}"], show)
//! show.into_boxed_handler()                       ← Handler blanket impl
//!        ↓
//! Arc<dyn ErasedHandler>                          ← stored on the Action
//!        ↓
//! handler.call(req)                               ← once per dispatched request
//!        ↓
//! Box::pin(async { show(req).await.into_response() })
//! ```
//!
//! A dispatched request costs one virtual call and one boxed future, which
//! is noise next to the socket I/O around it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// Pinned because the runtime polls it in place and it must not move after
/// the first poll. `Send + 'static` so tokio may run it on any worker.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` because it appears in the signature of the public
/// [`Handler`] trait.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// Shared by every request that reaches the action: cloning the `Arc` is one
/// atomic increment, the handler itself is never copied.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid action handler:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// You never implement it yourself. It is sealed (the `Sealed` supertrait
/// lives in a private module) so only the blanket impl below satisfies it,
/// which keeps the handler shape free to change.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Bridges a concrete handler `F` to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        // Call the wrapped function for its concrete future, then box it
        // behind the common return type.
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_path(req: Request) -> String {
        req.path().to_owned()
    }

    #[tokio::test]
    async fn test_erased_handler_converts_output() {
        let handler = echo_path.into_boxed_handler();
        let res = handler.call(Request::get("/users/1")).await;
        assert_eq!(res.body_str(), Some("/users/1"));
    }
}
