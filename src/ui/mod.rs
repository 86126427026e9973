//! Terminal UI
//!
//! Rendering only: nothing here decides what runs.

pub mod components;
pub mod context;
pub mod error;
pub mod events;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
