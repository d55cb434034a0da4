//! Text commands read from stdin and the actions they dispatch

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use unistore::{bind_action_creator, bind_action_creators, ActionCreator, BoundActionCreator, Dispatcher};

use crate::actions::Action;

/// What the input loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Print,
    Mute,
    Unmute,
    Quit,
}

/// Action creators bound to the store's dispatch
pub struct Commands {
    simple: BTreeMap<&'static str, BoundActionCreator<(), Action>>,
    add_todo: BoundActionCreator<String, Action>,
    toggle_todo: BoundActionCreator<usize, Action>,
}

impl Commands {
    pub fn bind(dispatcher: &Dispatcher<Action>) -> Self {
        let simple: [(&'static str, ActionCreator<(), Action>); 4] = [
            ("inc", Box::new(|_: ()| Action::Increment)),
            ("dec", Box::new(|_: ()| Action::Decrement)),
            ("reset", Box::new(|_: ()| Action::Reset)),
            ("clear", Box::new(|_: ()| Action::ClearCompleted)),
        ];

        Self {
            simple: bind_action_creators(simple, dispatcher),
            add_todo: bind_action_creator(Action::AddTodo, dispatcher.clone()),
            // Users count todos from 1
            toggle_todo: bind_action_creator(|n: usize| Action::ToggleTodo(n.saturating_sub(1)), dispatcher.clone()),
        }
    }

    /// Run one input line
    pub fn run(&self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => Ok(Outcome::Continue),
            "state" => Ok(Outcome::Print),
            "mute" => Ok(Outcome::Mute),
            "unmute" => Ok(Outcome::Unmute),
            "quit" | "exit" => Ok(Outcome::Quit),
            "add" => {
                self.add_todo.call(rest.to_string())?;
                Ok(Outcome::Continue)
            }
            "toggle" => {
                let n: usize = rest
                    .parse()
                    .with_context(|| format!("'{}' is not a todo number", rest))?;
                if n == 0 {
                    bail!("todos are numbered from 1");
                }
                self.toggle_todo.call(n)?;
                Ok(Outcome::Continue)
            }
            other => match self.simple.get(other) {
                Some(creator) => {
                    creator.call(())?;
                    Ok(Outcome::Continue)
                }
                None => bail!("unknown command '{}'", other),
            },
        }
    }
}
