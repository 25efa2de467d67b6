//! Foundation types for the Yafe site engine.
//!
//! This crate contains the types shared by all engine crates: the menu
//! model, booking records, the relay sink trait, URL handling, UI events,
//! site configuration, and error types.

pub mod config;
pub mod error;
pub mod event;
pub mod menu;
pub mod record;
pub mod url;
