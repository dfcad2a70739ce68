//! Skyhop game logic
//!
//! Everything client-local for the platformer: the fixed-schema game world,
//! tuning configuration, the simulation tick, and the relay snapshot. The
//! binary in `main.rs` drives this; renderer, input devices, and the relay
//! connect from outside.

pub mod components;
pub mod config;
pub mod simulation;
pub mod snapshot;
pub mod world;
