//! Store - holds the application state and runs the dispatch loop
//!
//! The state changes only through [`Store::dispatch`]:
//!
//! 1. the reducer computes the next state from the current one,
//! 2. the new state is committed,
//! 3. every listener registered when notification starts is called once.
//!
//! Dispatches on one store are serialized. A dispatch issued by a listener
//! while notification is running is queued (or refused, see
//! [`ReentrancyPolicy`]) and applied once the current pass has finished,
//! before the outer `dispatch` returns. If a reducer or listener panics
//! while actions are still queued, those actions stay queued and are
//! applied at the start of the next dispatch, ahead of its own action.
//! Dispatching from inside the reducer is always refused.

use std::cell::Cell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::fmt::Debug;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use unistore_config::{ReentrancyPolicy, StoreConfig};

use crate::dispatcher::{DispatchResult, Dispatcher};
use crate::enhancer::{compose_enhancers, Enhancer, StoreCreator};
use crate::error::{DispatchPhase, StoreError};
use crate::middleware::{apply_middleware, logging::LoggingMiddleware, Middleware};
use crate::reducer::{Input, Reducer};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Registered listeners keyed by a handle that never gets reused.
/// Iteration follows registration order.
#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, Listener>,
}

impl Listeners {
    fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, listener);
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        self.entries.remove(&id).is_some()
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    fn snapshot(&self) -> Vec<(u64, Listener)> {
        self.entries
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect()
    }
}

/// Bookkeeping of the dispatch currently running on this store
#[derive(Default)]
struct DispatchCycle {
    phase: Cell<Option<DispatchPhase>>,
    queued: Cell<usize>,
}

struct Core<S, A> {
    name: String,
    reducer: Reducer<S, A>,
    state: RwLock<S>,
    listeners: Arc<Mutex<Listeners>>,
    // Re-entrant so a listener on the dispatching thread reaches the phase check
    // instead of deadlocking; other threads wait for the running dispatch.
    cycle: ReentrantMutex<DispatchCycle>,
    queue: Mutex<VecDeque<A>>,
    reentrancy: ReentrancyPolicy,
    max_queued_actions: usize,
}

impl<S: Clone, A: Clone> Core<S, A> {
    fn dispatch(&self, action: A) -> DispatchResult<A> {
        let cycle = self.cycle.lock();
        match cycle.phase.get() {
            Some(DispatchPhase::Reducing) => {
                log::warn!("[{}] Refused dispatch from inside the reducer", self.name);
                return Err(StoreError::ReentrantDispatch(DispatchPhase::Reducing));
            }
            Some(DispatchPhase::Notifying) => return self.enqueue(&cycle, action),
            None => {}
        }

        // Runs on return and on unwind out of a reducer or listener.
        // Queued actions survive an unwind and are drained below next time.
        let _reset = scopeguard::guard(&*cycle, |cycle| {
            cycle.phase.set(None);
            cycle.queued.set(0);
        });

        while let Some(left_over) = self.next_queued() {
            log::debug!("[{}] Applying action queued before a panic", self.name);
            self.apply(&cycle, &left_over);
        }

        self.apply(&cycle, &action);
        while let Some(queued) = self.next_queued() {
            self.apply(&cycle, &queued);
        }

        Ok(action)
    }

    fn apply(&self, cycle: &DispatchCycle, action: &A) {
        cycle.phase.set(Some(DispatchPhase::Reducing));
        let current = S::clone(&self.state.read());
        let next = self.reducer.reduce(Some(current), Input::Action(action));
        *self.state.write() = next;

        cycle.phase.set(Some(DispatchPhase::Notifying));
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.listeners.lock().snapshot();
        for (id, listener) in snapshot {
            // Skip listeners unsubscribed earlier in this pass
            let active = self.listeners.lock().contains(id);
            if active {
                listener();
            }
        }
    }

    fn enqueue(&self, cycle: &DispatchCycle, action: A) -> DispatchResult<A> {
        if self.reentrancy == ReentrancyPolicy::Reject {
            log::warn!("[{}] Refused dispatch from a listener", self.name);
            return Err(StoreError::ReentrantDispatch(DispatchPhase::Notifying));
        }

        let queued = cycle.queued.get();
        if queued >= self.max_queued_actions {
            log::warn!(
                "[{}] Dispatch queue is full after {} actions",
                self.name,
                queued
            );
            return Err(StoreError::QueueFull {
                limit: self.max_queued_actions,
            });
        }

        cycle.queued.set(queued + 1);
        self.queue.lock().push_back(action.clone());
        log::trace!("[{}] Queued nested dispatch #{}", self.name, queued + 1);
        Ok(action)
    }

    /// Phase of the dispatch running on the calling thread, if any
    fn phase(&self) -> Option<DispatchPhase> {
        self.cycle.try_lock().and_then(|cycle| cycle.phase.get())
    }

    fn next_queued(&self) -> Option<A> {
        self.queue.lock().pop_front()
    }
}

/// Store - holds application state and manages the Redux loop
///
/// A `Store` is a cheap handle: clones share state, listeners and
/// dispatch. Enhancers may hand out a store whose dispatch is wrapped (see
/// [`apply_middleware`]); everything else stays shared with the base store.
pub struct Store<S, A> {
    core: Arc<Core<S, A>>,
    dispatcher: Dispatcher<A>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.core.name)
            .finish_non_exhaustive()
    }
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Build a plain store: state comes from `reducer(preloaded_state, Init)`,
    /// no listeners, dispatch goes straight to the reducer.
    pub(crate) fn build(
        reducer: Reducer<S, A>,
        preloaded_state: Option<S>,
        config: &StoreConfig,
    ) -> Result<Self, StoreError> {
        config
            .validate()
            .map_err(|e| StoreError::Configuration(format!("{e:#}")))?;

        let state = reducer.reduce(preloaded_state, Input::Init);
        log::debug!("[{}] Store created", config.name);

        let core = Arc::new(Core {
            name: config.name.clone(),
            reducer,
            state: RwLock::new(state),
            listeners: Arc::new(Mutex::new(Listeners::default())),
            cycle: ReentrantMutex::new(DispatchCycle::default()),
            queue: Mutex::new(VecDeque::new()),
            reentrancy: config.reentrancy,
            max_queued_actions: config.max_queued_actions,
        });

        let inner = Arc::clone(&core);
        let dispatcher = Dispatcher::new(move |action| inner.dispatch(action));

        Ok(Self { core, dispatcher })
    }

    /// Get the current state
    pub fn get_state(&self) -> S {
        S::clone(&self.core.state.read())
    }

    /// Register a listener called after every committed dispatch.
    ///
    /// Registering the same callback twice yields two independent
    /// subscriptions.
    pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.core.listeners.lock().insert(Arc::new(listener));
        log::debug!("[{}] Listener {} subscribed", self.core.name, id);
        Unsubscribe {
            id,
            listeners: Arc::downgrade(&self.core.listeners),
        }
    }

    /// Dispatch an action through the installed middleware chain (if any),
    /// then the reducer.
    pub fn dispatch(&self, action: A) -> DispatchResult<A> {
        self.dispatcher.dispatch(action)
    }

    /// The dispatch capability of this store
    pub fn dispatcher(&self) -> Dispatcher<A> {
        self.dispatcher.clone()
    }

    /// A store sharing everything with this one except dispatch
    pub fn with_dispatcher(&self, dispatcher: Dispatcher<A>) -> Self {
        Self {
            core: Arc::clone(&self.core),
            dispatcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    /// Phase of a dispatch in progress on the calling thread.
    ///
    /// `Some(DispatchPhase::Notifying)` after a dispatch returned means the
    /// action was queued, not applied yet.
    pub fn dispatch_phase(&self) -> Option<DispatchPhase> {
        self.core.phase()
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Dropping the handle keeps the subscription alive; call
/// [`Unsubscribe::unsubscribe`] to end it.
#[derive(Clone)]
pub struct Unsubscribe {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Unsubscribe {
    /// Remove the listener. Calling this more than once has no further effect.
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if listeners.lock().remove(self.id) {
                log::debug!("Listener {} unsubscribed", self.id);
            }
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}

/// Options for [`create_store`]
pub struct StoreOptions<S, A> {
    preloaded_state: Option<S>,
    enhancer: Option<Enhancer<S, A>>,
    config: StoreConfig,
}

impl<S, A> Default for StoreOptions<S, A> {
    fn default() -> Self {
        Self {
            preloaded_state: None,
            enhancer: None,
            config: StoreConfig::default(),
        }
    }
}

impl<S, A> StoreOptions<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for `config`, with the logging middleware installed when
    /// `config.log_actions` is set.
    pub fn from_config(config: StoreConfig) -> Self
    where
        S: Debug,
        A: Debug,
    {
        let log_actions = config.log_actions;
        let options = Self::new().config(config);
        if !log_actions {
            return options;
        }

        let logging: Box<dyn Middleware<S, A>> = Box::new(LoggingMiddleware::new(&options.config.name));
        options.enhancer(apply_middleware(vec![logging]))
    }

    /// State handed to the reducer together with the init pseudo-action
    pub fn preloaded_state(mut self, state: S) -> Self {
        self.preloaded_state = Some(state);
        self
    }

    /// Add an enhancer. Enhancers added earlier wrap the ones added later.
    pub fn enhancer(mut self, enhancer: Enhancer<S, A>) -> Self {
        self.enhancer = Some(match self.enhancer.take() {
            Some(outer) => compose_enhancers([outer, enhancer]),
            None => enhancer,
        });
        self
    }

    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }
}

/// Create a store.
///
/// With an enhancer, construction is handed over entirely: the enhancer
/// receives the plain creator and the creator it returns is called with
/// `(reducer, preloaded_state)`.
pub fn create_store<S, A>(reducer: Reducer<S, A>, options: StoreOptions<S, A>) -> Result<Store<S, A>, StoreError>
where
    S: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    let StoreOptions {
        preloaded_state,
        enhancer,
        config,
    } = options;

    let create_store = StoreCreator::base(config);
    match enhancer {
        Some(enhancer) => enhancer.apply(create_store).create(reducer, preloaded_state),
        None => create_store.create(reducer, preloaded_state),
    }
}
