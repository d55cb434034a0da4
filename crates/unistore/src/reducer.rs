//! Reducers and reducer composition

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// What a reducer is asked to handle.
///
/// `Init` is the reserved pseudo-action a store sends once at construction
/// to obtain its initial state. Applications cannot build it as one of
/// their own actions, so every well-formed reducer falls through to its
/// default branch for it.
pub enum Input<'a, A> {
    Init,
    Action(&'a A),
}

impl<'a, A> Input<'a, A> {
    /// The dispatched action, or `None` for the init pseudo-action
    pub fn action(self) -> Option<&'a A> {
        match self {
            Input::Init => None,
            Input::Action(action) => Some(action),
        }
    }

    pub fn is_init(self) -> bool {
        matches!(self, Input::Init)
    }
}

impl<A> Clone for Input<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Input<'_, A> {}

impl<A: fmt::Debug> fmt::Debug for Input<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Init => write!(f, "Init"),
            Input::Action(action) => f.debug_tuple("Action").field(action).finish(),
        }
    }
}

type ReduceFn<S, A> = dyn Fn(Option<S>, Input<'_, A>) -> S + Send + Sync;

/// Reducer - pure function that produces new state from current state + action
///
/// `None` state means no state exists yet; the reducer must then return its
/// default. Actions it does not recognise must return the state unchanged.
pub struct Reducer<S, A> {
    reduce: Arc<ReduceFn<S, A>>,
}

impl<S, A> Clone for Reducer<S, A> {
    fn clone(&self) -> Self {
        Self {
            reduce: Arc::clone(&self.reduce),
        }
    }
}

impl<S: 'static, A: 'static> Reducer<S, A> {
    pub fn new<F>(reduce: F) -> Self
    where
        F: Fn(Option<S>, Input<'_, A>) -> S + Send + Sync + 'static,
    {
        Self {
            reduce: Arc::new(reduce),
        }
    }

    /// Build a reducer from a `fn(state, &action) -> state` style function
    /// and the state to start from when none exists yet.
    pub fn with_initial<F>(initial: S, reduce: F) -> Self
    where
        S: Clone + Send + Sync,
        F: Fn(S, &A) -> S + Send + Sync + 'static,
    {
        Self::new(move |state: Option<S>, input: Input<'_, A>| {
            let state = state.unwrap_or_else(|| initial.clone());
            match input {
                Input::Init => state,
                Input::Action(action) => reduce(state, action),
            }
        })
    }
}

impl<S, A> Reducer<S, A> {
    pub fn reduce(&self, state: Option<S>, input: Input<'_, A>) -> S {
        (self.reduce)(state, input)
    }

    /// The state this reducer produces when nothing has been stored yet
    pub fn initial_state(&self) -> S {
        self.reduce(None, Input::Init)
    }
}

/// Combine named reducers into one reducer over a map of their states.
///
/// Every sub-reducer sees every action together with its own slice of the
/// previous state. The result holds exactly the keys of `reducers`: slices
/// of the previous state without a reducer are dropped.
pub fn combine_reducers<K, S, A, I>(reducers: I) -> Reducer<BTreeMap<K, S>, A>
where
    I: IntoIterator<Item = (K, Reducer<S, A>)>,
    K: Ord + Clone + Send + Sync + 'static,
    S: 'static,
    A: 'static,
{
    let reducers: BTreeMap<K, Reducer<S, A>> = reducers.into_iter().collect();

    Reducer::new(move |state: Option<BTreeMap<K, S>>, input| {
        let mut previous = state.unwrap_or_default();
        reducers
            .iter()
            .map(|(key, reducer)| (key.clone(), reducer.reduce(previous.remove(key), input)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{counter, Counter};
    use serde_json::{json, Value};

    fn label(state: Option<String>, input: Input<'_, Counter>) -> String {
        let state = state.unwrap_or_else(|| "idle".to_string());
        match input {
            Input::Action(Counter::Add(_)) => "added".to_string(),
            _ => state,
        }
    }

    fn slices() -> Reducer<BTreeMap<&'static str, Value>, Counter> {
        let count = Reducer::new(|state: Option<Value>, input: Input<'_, Counter>| {
            let value = counter(state.and_then(|v| v.as_i64()), input);
            json!(value)
        });
        let name = Reducer::new(|state: Option<Value>, input: Input<'_, Counter>| {
            let value = label(state.and_then(|v| v.as_str().map(str::to_string)), input);
            json!(value)
        });
        combine_reducers([("count", count), ("name", name)])
    }

    #[test]
    fn test_input_accessors() {
        let action = Counter::Increment;
        assert!(Input::<Counter>::Init.is_init());
        assert_eq!(Input::<Counter>::Init.action(), None);
        assert_eq!(Input::Action(&action).action(), Some(&Counter::Increment));
    }

    #[test]
    fn test_with_initial_handles_init() {
        let reducer = Reducer::with_initial(10, |state: i64, action: &Counter| match action {
            Counter::Increment => state + 1,
            _ => state,
        });
        assert_eq!(reducer.initial_state(), 10);
        assert_eq!(reducer.reduce(Some(3), Input::Init), 3);
        assert_eq!(reducer.reduce(None, Input::Action(&Counter::Increment)), 11);
    }

    #[test]
    fn test_combined_initial_state_matches_sub_reducers() {
        let combined = slices();
        let state = combined.initial_state();

        let mut expected = BTreeMap::new();
        expected.insert("count", json!(counter(None, Input::Init)));
        expected.insert("name", json!(label(None, Input::Init)));
        assert_eq!(state, expected);
    }

    #[test]
    fn test_combined_routes_action_to_every_slice() {
        let combined = slices();
        let state = combined.reduce(None, Input::Action(&Counter::Add(5)));
        assert_eq!(state["count"], json!(5));
        assert_eq!(state["name"], json!("added"));
    }

    #[test]
    fn test_combined_drops_unknown_keys() {
        let combined = combine_reducers([("x", Reducer::new(counter))]);

        let mut previous = BTreeMap::new();
        previous.insert("x", 1);
        previous.insert("stale", 99);

        let state = combined.reduce(Some(previous), Input::Action(&Counter::Increment));
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("x"), Some(&2));
        assert!(!state.contains_key("stale"));
    }

    #[test]
    fn test_combined_missing_slice_gets_default() {
        let combined = combine_reducers([("x", Reducer::new(counter)), ("y", Reducer::new(counter))]);

        let mut previous = BTreeMap::new();
        previous.insert("x", 7);

        let state = combined.reduce(Some(previous), Input::Action(&Counter::Decrement));
        assert_eq!(state.get("x"), Some(&6));
        assert_eq!(state.get("y"), Some(&-1));
    }

    #[test]
    fn test_combine_without_reducers_is_empty() {
        let combined = combine_reducers(Vec::<(String, Reducer<i64, Counter>)>::new());
        assert!(combined.initial_state().is_empty());
    }
}
