//! Core library modules: the todo entity, error types, configuration,
//! messaging and terminal rendering.

pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod todo;
pub mod view;
