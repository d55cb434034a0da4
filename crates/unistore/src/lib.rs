//! Unidirectional state container
//!
//! A single state value owned by a [`Store`], changed only by dispatching
//! actions through a pure [`Reducer`], observed through subscriptions and
//! extended with [`Middleware`] installed by an [`Enhancer`].
//!
//! ```text
//! dispatch(action) → Middleware Chain → Reducer → commit → Listeners
//! ```

mod bind;
mod dispatcher;
mod enhancer;
mod error;
mod reducer;
mod store;

pub mod middleware;

pub use bind::{bind_action_creator, bind_action_creators, ActionCreator, BoundActionCreator};
pub use dispatcher::{DispatchResult, Dispatcher};
pub use enhancer::{compose_enhancers, Enhancer, StoreCreator};
pub use error::{DispatchPhase, StoreError};
pub use middleware::{apply_middleware, Middleware, MiddlewareApi};
pub use reducer::{combine_reducers, Input, Reducer};
pub use store::{create_store, Store, StoreOptions, Unsubscribe};

pub use unistore_config::{ReentrancyPolicy, StoreConfig};
