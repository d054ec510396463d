//! Todo service module.

mod service;

pub use service::{
    default_todo_sort, CreateTodo, TodoService, TodoServiceConfig, UpdateTodo, TODO_SORT_FIELDS,
};

#[cfg(test)]
mod tests;
