/// Everything the demo store can be asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Increment,
    Decrement,
    Reset,
    AddTodo(String),
    /// Flip the done flag of the todo at this (0-based) position
    ToggleTodo(usize),
    ClearCompleted,
}
