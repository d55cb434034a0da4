//! Reducers for the demo state
//!
//! The root state is a map of named slices, each slice kept as JSON so the
//! whole state can be printed as one document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use unistore::{combine_reducers, Input, Reducer};

use crate::actions::Action;

pub type AppState = BTreeMap<String, Value>;

pub const COUNTER: &str = "counter";
pub const TODOS: &str = "todos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// Root reducer over all slices
pub fn root() -> Reducer<AppState, Action> {
    combine_reducers([
        (COUNTER.to_string(), Reducer::new(counter)),
        (TODOS.to_string(), Reducer::new(todos)),
    ])
}

pub fn counter(state: Option<Value>, input: Input<'_, Action>) -> Value {
    let count = state.as_ref().and_then(Value::as_i64).unwrap_or(0);
    match input {
        Input::Action(Action::Increment) => json!(count + 1),
        Input::Action(Action::Decrement) => json!(count - 1),
        Input::Action(Action::Reset) => json!(0),
        _ => state.unwrap_or_else(|| json!(count)),
    }
}

/// Todo list slice. A slice that does not parse as a todo list is treated
/// as empty.
pub fn todos(state: Option<Value>, input: Input<'_, Action>) -> Value {
    let Some(action) = input.action() else {
        return state.unwrap_or_else(|| json!([]));
    };

    let mut list = read_todos(state.as_ref());
    match action {
        Action::AddTodo(text) => list.push(Todo {
            text: text.clone(),
            done: false,
        }),
        Action::ToggleTodo(index) => {
            if let Some(todo) = list.get_mut(*index) {
                todo.done = !todo.done;
            }
        }
        Action::ClearCompleted => list.retain(|todo| !todo.done),
        _ => return state.unwrap_or_else(|| json!([])),
    }
    json!(list)
}

/// Decode the todo slice of a state
pub fn read_todos(slice: Option<&Value>) -> Vec<Todo> {
    slice
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}
