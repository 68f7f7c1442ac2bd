//! Shared core of the trackside status dashboard.
//!
//! This crate contains platform-agnostic code shared between the simulator
//! and the Pico 2 firmware:
//!
//! - [`message`]: Keyword and structured telemetry decoding
//! - [`handoff`]: Critical-section handoff between the receive context and the polling loop
//! - [`inbox`]: Receive path (decode, filter, publish)
//! - [`liveness`]: Per-vehicle driving/stuck tracking with the debounced charger entity
//! - [`series`]: Fixed-capacity sliding-window series buffers
//! - [`transitions`]: Trailing-hour lap counter and its long-window trend
//! - [`graph`]: Time-windowed line graph projection and drawing
//! - [`dashboard`]: The per-tick update function tying it all together
//! - [`widgets`]: Fleet board, telemetry panel, header and log page drawing
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p trackside-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware build stays `no_std`.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod alarm;
pub mod bridge;
pub mod colors;
pub mod config;
pub mod dashboard;
pub mod delay;
pub mod graph;
pub mod handoff;
pub mod inbox;
pub mod liveness;
pub mod log;
pub mod message;
pub mod pages;
pub mod radio;
pub mod render;
pub mod series;
pub mod styles;
pub mod telemetry;
pub mod thresholds;
pub mod transitions;
pub mod widgets;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use dashboard::{Dashboard, TickReport};
pub use inbox::{Inbox, Receipt};
pub use pages::Page;
