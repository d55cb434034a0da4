//! Action-creator binding
//!
//! Turns functions that build actions into functions that build and
//! dispatch them in one call. Purely a convenience over
//! `dispatcher.dispatch(creator(args))`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dispatcher::{DispatchResult, Dispatcher};

/// A function building an action from its arguments.
///
/// Several arguments are passed as a tuple; `()` for none.
pub type ActionCreator<Args, A> = Box<dyn Fn(Args) -> A + Send + Sync>;

type BoundFn<Args, A> = dyn Fn(Args) -> DispatchResult<A> + Send + Sync;

/// An action creator that dispatches what it creates
pub struct BoundActionCreator<Args, A> {
    call: Arc<BoundFn<Args, A>>,
}

impl<Args, A> Clone for BoundActionCreator<Args, A> {
    fn clone(&self) -> Self {
        Self {
            call: Arc::clone(&self.call),
        }
    }
}

impl<Args, A> BoundActionCreator<Args, A> {
    /// Create the action from `args` and dispatch it, returning the
    /// dispatch result.
    pub fn call(&self, args: Args) -> DispatchResult<A> {
        (self.call)(args)
    }
}

/// Bind a single action creator to `dispatcher`
pub fn bind_action_creator<Args, A, F>(creator: F, dispatcher: Dispatcher<A>) -> BoundActionCreator<Args, A>
where
    F: Fn(Args) -> A + Send + Sync + 'static,
    Args: 'static,
    A: 'static,
{
    BoundActionCreator {
        call: Arc::new(move |args| dispatcher.dispatch(creator(args))),
    }
}

/// Bind every action creator of a map, keeping the keys
pub fn bind_action_creators<K, Args, A, I>(
    creators: I,
    dispatcher: &Dispatcher<A>,
) -> BTreeMap<K, BoundActionCreator<Args, A>>
where
    I: IntoIterator<Item = (K, ActionCreator<Args, A>)>,
    K: Ord,
    Args: 'static,
    A: 'static,
{
    creators
        .into_iter()
        .map(|(key, creator)| (key, bind_action_creator(creator, dispatcher.clone())))
        .collect()
}
