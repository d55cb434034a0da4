use std::fmt::Debug;

use crate::dispatcher::{DispatchResult, Dispatcher};
use crate::error::DispatchPhase;
use crate::middleware::{Middleware, MiddlewareApi};

/// LoggingMiddleware - logs all actions passing through
///
/// Actions are logged at `debug` before they continue down the chain, the
/// resulting state at `trace` once the chain returns. An action dispatched
/// by a listener is only queued when the chain returns, so for it the
/// state is not logged.
pub struct LoggingMiddleware {
    name: String,
}

impl LoggingMiddleware {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    S: Debug + Clone + Send + Sync + 'static,
    A: Debug + Clone + Send + Sync + 'static,
{
    fn handle(&self, action: A, api: &MiddlewareApi<S, A>, next: &Dispatcher<A>) -> DispatchResult<A> {
        log::debug!("[{}] Action: {:?}", self.name, action);

        let result = next.dispatch(action);
        match &result {
            Ok(_) if api.dispatch_phase() == Some(DispatchPhase::Notifying) => {
                log::trace!("[{}] Action queued until listeners finish", self.name);
            }
            Ok(_) if log::log_enabled!(log::Level::Trace) => {
                log::trace!("[{}] State: {:?}", self.name, api.get_state());
            }
            Ok(_) => {}
            Err(e) => log::warn!("[{}] Dispatch failed: {}", self.name, e),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::apply_middleware;
    use crate::reducer::Reducer;
    use crate::store::{create_store, StoreOptions};
    use crate::test_support::{counter, Counter};

    #[test]
    fn test_logging_passes_actions_through() {
        let logging: Box<dyn Middleware<i64, Counter>> = Box::new(LoggingMiddleware::new("counter"));
        let store = create_store(
            Reducer::new(counter),
            StoreOptions::new().enhancer(apply_middleware(vec![logging])),
        )
        .unwrap();

        assert_eq!(store.dispatch(Counter::Add(2)).unwrap(), Counter::Add(2));
        assert_eq!(store.dispatch(Counter::Decrement).unwrap(), Counter::Decrement);
        assert_eq!(store.get_state(), 1);
    }
}
