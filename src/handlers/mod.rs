//! HTTP handlers for the todo resource.

pub mod todos;
