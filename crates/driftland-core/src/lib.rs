//! # Driftland core
//!
//! Endless tile world, deterministic terrain and player movement for a small
//! 2D building sandbox. Rendering and input devices live outside this crate;
//! they drive a [`game::GameSession`] once per frame.

pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod world;

pub use error::{Result, WorldError};
pub use game::GameSession;

