use anyhow::anyhow;
use unistore::{DispatchResult, Dispatcher, Middleware, MiddlewareApi, StoreError};

use crate::actions::Action;
use crate::reducers::{read_todos, AppState, TODOS};

/// ValidationMiddleware - refuses actions that make no sense for the
/// current state instead of letting the reducer silently ignore them
pub struct ValidationMiddleware;

impl Middleware<AppState, Action> for ValidationMiddleware {
    fn handle(&self, action: Action, api: &MiddlewareApi<AppState, Action>, next: &Dispatcher<Action>) -> DispatchResult<Action> {
        match &action {
            Action::AddTodo(text) if text.trim().is_empty() => {
                return Err(StoreError::from(anyhow!("todo text must not be empty")));
            }
            Action::ToggleTodo(index) => {
                let count = read_todos(api.get_state().get(TODOS)).len();
                if *index >= count {
                    return Err(StoreError::from(anyhow!(
                        "no todo #{} (there are {})",
                        index + 1,
                        count
                    )));
                }
            }
            _ => {}
        }

        next.dispatch(action)
    }
}
