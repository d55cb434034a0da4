//! Store creators and enhancers
//!
//! An [`Enhancer`] decorates a [`StoreCreator`] and returns another one with
//! the same signature, so cross-cutting behaviour (such as a middleware
//! pipeline) is installed before the store is built.

use std::sync::Arc;

use unistore_config::StoreConfig;

use crate::error::StoreError;
use crate::reducer::Reducer;
use crate::store::Store;

type CreateFn<S, A> = dyn Fn(Reducer<S, A>, Option<S>) -> Result<Store<S, A>, StoreError> + Send + Sync;

/// A store-construction function: `(reducer, preloaded_state) -> store`
pub struct StoreCreator<S, A> {
    create: Arc<CreateFn<S, A>>,
}

impl<S, A> Clone for StoreCreator<S, A> {
    fn clone(&self) -> Self {
        Self {
            create: Arc::clone(&self.create),
        }
    }
}

impl<S, A> StoreCreator<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    pub fn new<F>(create: F) -> Self
    where
        F: Fn(Reducer<S, A>, Option<S>) -> Result<Store<S, A>, StoreError> + Send + Sync + 'static,
    {
        Self {
            create: Arc::new(create),
        }
    }

    /// The plain creator: builds a store with no enhancement
    pub fn base(config: StoreConfig) -> Self {
        Self::new(move |reducer, preloaded_state| Store::build(reducer, preloaded_state, &config))
    }

    pub fn create(&self, reducer: Reducer<S, A>, preloaded_state: Option<S>) -> Result<Store<S, A>, StoreError> {
        (self.create)(reducer, preloaded_state)
    }
}

type EnhanceFn<S, A> = dyn Fn(StoreCreator<S, A>) -> StoreCreator<S, A> + Send + Sync;

/// Decorator over a [`StoreCreator`]
pub struct Enhancer<S, A> {
    enhance: Arc<EnhanceFn<S, A>>,
}

impl<S, A> Clone for Enhancer<S, A> {
    fn clone(&self) -> Self {
        Self {
            enhance: Arc::clone(&self.enhance),
        }
    }
}

impl<S, A> Enhancer<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    pub fn new<F>(enhance: F) -> Self
    where
        F: Fn(StoreCreator<S, A>) -> StoreCreator<S, A> + Send + Sync + 'static,
    {
        Self {
            enhance: Arc::new(enhance),
        }
    }

    /// Enhancer that returns the creator it is given
    pub fn identity() -> Self {
        Self::new(|create_store| create_store)
    }

    pub fn apply(&self, create_store: StoreCreator<S, A>) -> StoreCreator<S, A> {
        (self.enhance)(create_store)
    }
}

/// Compose enhancers into one. The first enhancer is the outermost
/// decorator: `compose([f, g]).apply(c) == f.apply(g.apply(c))`.
pub fn compose_enhancers<S, A, I>(enhancers: I) -> Enhancer<S, A>
where
    I: IntoIterator<Item = Enhancer<S, A>>,
    S: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    let mut enhancers: Vec<Enhancer<S, A>> = enhancers.into_iter().collect();
    match enhancers.len() {
        0 => Enhancer::identity(),
        1 => enhancers.remove(0),
        _ => Enhancer::new(move |create_store| {
            enhancers
                .iter()
                .rev()
                .fold(create_store, |create_store, enhancer| enhancer.apply(create_store))
        }),
    }
}
