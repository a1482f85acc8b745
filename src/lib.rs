//! Freehand shape game: draw a circle (or a square) and get scored on how
//! uniform its radius is.
//!
//! The core is window-free: [`session::Session`] takes [`session::Signal`]s
//! and talks to the outside only through the sink traits in [`feedback`].

pub mod capture;
pub mod config;
pub mod draw;
pub mod error;
pub mod feedback;
pub mod hud;
pub mod input;
pub mod score;
pub mod session;
pub mod types;
