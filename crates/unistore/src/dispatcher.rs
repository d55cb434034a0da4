//! Dispatcher - the dispatch capability handed to middleware and action creators
//!
//! A store's own dispatch and every link of a middleware chain are
//! Dispatchers, so a middleware's `next` and the store's outermost
//! dispatch have the same shape.

use std::sync::Arc;

use crate::error::StoreError;

/// Result of a dispatch: the action that went through, or why it did not
pub type DispatchResult<A> = Result<A, StoreError>;

type DispatchFn<A> = dyn Fn(A) -> DispatchResult<A> + Send + Sync;

/// Cheap clonable handle to a dispatch function
pub struct Dispatcher<A> {
    dispatch: Arc<DispatchFn<A>>,
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

impl<A: 'static> Dispatcher<A> {
    pub fn new<F>(dispatch: F) -> Self
    where
        F: Fn(A) -> DispatchResult<A> + Send + Sync + 'static,
    {
        Self {
            dispatch: Arc::new(dispatch),
        }
    }
}

impl<A> Dispatcher<A> {
    /// Dispatch an action
    pub fn dispatch(&self, action: A) -> DispatchResult<A> {
        (self.dispatch)(action)
    }
}
