//! wavo - A Minimal Wayland-Style Compositor Core
//!
//! wavo tracks client windows ("views") in a shared scene, routes keyboard
//! and pointer input to the focused client, and supports interactive move
//! and resize of views driven by the pointer.
//!
//! # Architecture
//!
//! The rendering engine, protocol transport and device backend are external
//! collaborators hidden behind the [`backend::Backend`] trait. Everything
//! else is the compositor core:
//!
//! - [`state`]: Central compositor state and the event dispatch entry point
//! - [`input`]: Input device registry and seat routing
//! - [`shell`]: View lifecycle and interactive grabs
//! - [`output`]: Output lifecycle and the frame cycle
//! - [`focus`]: Hit-testing screen coordinates against the scene
//! - [`config`]: Static configuration loaded at startup
//! - [`backend`]: Collaborator contract and the headless test backend

#![warn(rust_2018_idioms)]

pub mod backend;
pub mod config;
pub mod error;
pub mod event;
pub mod focus;
pub mod input;
pub mod output;
pub mod shell;
pub mod state;
pub mod utils;

pub use state::WavoState;
