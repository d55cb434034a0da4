//! Middleware system
//!
//! Middleware sits between `dispatch` and the reducer:
//!
//! ```text
//! Action → Middleware Chain → Reducer → State
//! ```
//!
//! Each middleware receives the action, the store API and the `next` link
//! of the chain. It can:
//! - Inspect actions and state
//! - Dispatch new actions
//! - Replace the action passed on, or return a different one
//! - Block the action by not calling `next`
//!
//! [`apply_middleware`] builds an [`Enhancer`] installing the chain. The
//! first middleware in the list is the outermost link: it sees every action
//! first, and the last one calls the store's own dispatch.

pub mod logging;

use std::sync::Arc;

use crate::dispatcher::{DispatchResult, Dispatcher};
use crate::enhancer::{Enhancer, StoreCreator};
use crate::error::DispatchPhase;
use crate::store::Store;

pub use logging::LoggingMiddleware;

/// Read/dispatch access to the store handed to every middleware.
///
/// Both operations are bound to the store without middleware: actions
/// dispatched here go straight to the reducer.
pub struct MiddlewareApi<S, A> {
    store: Store<S, A>,
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S, A> MiddlewareApi<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    fn new(store: Store<S, A>) -> Self {
        Self { store }
    }

    /// Current state of the store
    pub fn get_state(&self) -> S {
        self.store.get_state()
    }

    /// Dispatch an action on the base store
    pub fn dispatch(&self, action: A) -> DispatchResult<A> {
        self.store.dispatch(action)
    }

    /// See [`Store::dispatch_phase`]
    pub fn dispatch_phase(&self) -> Option<DispatchPhase> {
        self.store.dispatch_phase()
    }
}

/// Middleware trait - intercepts actions before they reach the reducer
pub trait Middleware<S, A>: Send + Sync {
    /// Handle an action
    ///
    /// - `action`: The action being dispatched
    /// - `api`: Read the state or dispatch on the base store
    /// - `next`: The rest of the chain; call it to let the action through
    fn handle(&self, action: A, api: &MiddlewareApi<S, A>, next: &Dispatcher<A>) -> DispatchResult<A>;
}

/// Middleware backed by a closure, see [`from_fn`]
pub struct FnMiddleware<F>(F);

impl<S, A, F> Middleware<S, A> for FnMiddleware<F>
where
    F: Fn(A, &MiddlewareApi<S, A>, &Dispatcher<A>) -> DispatchResult<A> + Send + Sync,
{
    fn handle(&self, action: A, api: &MiddlewareApi<S, A>, next: &Dispatcher<A>) -> DispatchResult<A> {
        (self.0)(action, api, next)
    }
}

/// Turn a closure into a middleware
pub fn from_fn<S, A, F>(handle: F) -> FnMiddleware<F>
where
    F: Fn(A, &MiddlewareApi<S, A>, &Dispatcher<A>) -> DispatchResult<A> + Send + Sync,
{
    FnMiddleware(handle)
}

/// Build an enhancer that wraps the store's dispatch with `middlewares`,
/// in order.
///
/// No middleware leaves the store's dispatch untouched; a single middleware
/// wraps the store's dispatch directly.
pub fn apply_middleware<S, A>(middlewares: Vec<Box<dyn Middleware<S, A>>>) -> Enhancer<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    let middlewares: Arc<[Box<dyn Middleware<S, A>>]> = middlewares.into();

    Enhancer::new(move |create_store: StoreCreator<S, A>| {
        let middlewares = Arc::clone(&middlewares);
        StoreCreator::new(move |reducer, preloaded_state| {
            let store = create_store.create(reducer, preloaded_state)?;
            let api = MiddlewareApi::new(store.clone());
            let dispatcher = chain(&middlewares, &api, store.dispatcher());
            log::debug!(
                "[{}] Installed {} middleware",
                store.name(),
                middlewares.len()
            );
            Ok(store.with_dispatcher(dispatcher))
        })
    })
}

/// Compose the chain right to left around `base`
fn chain<S, A>(
    middlewares: &Arc<[Box<dyn Middleware<S, A>>]>,
    api: &MiddlewareApi<S, A>,
    base: Dispatcher<A>,
) -> Dispatcher<A>
where
    S: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    (0..middlewares.len()).rev().fold(base, |next, index| {
        let middlewares = Arc::clone(middlewares);
        let api = api.clone();
        Dispatcher::new(move |action| middlewares[index].handle(action, &api, &next))
    })
}
