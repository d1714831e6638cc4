//! # Triton-Lite Controller Library
//!
//! A Rust library for configuring the Triton-Lite underwater vehicle over a
//! serial link. The vehicle firmware accepts newline-terminated text
//! commands that set how long it waits before surfacing and before diving.
//!
//! ## Features
//!
//! - Enumerate serial ports and manage a single connection (9600 baud)
//! - Send the surface delay (`SUP_START`) and dive delay (`EXH_START`)
//! - Drain and record the device's reply lines after each command
//! - Keep a timestamped session log of everything sent and received
//!
//! ## Example
//!
//! ```no_run
//! use triton_lite::Triton;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut triton = Triton::new();
//!     triton.connect("/dev/ttyACM0")?;
//!     let report = triton.apply_settings("30", "45")?;
//!     for line in report.responses() {
//!         println!("Device: {}", line);
//!     }
//!     Ok(())
//! }
//! ```

pub mod constants;
pub mod error;
pub mod link;
pub mod protocol;
pub mod session;
pub mod types;

pub use error::{Result, TritonError};
pub use link::Link;
pub use protocol::Triton;
pub use session::{LogEntry, SessionLog};
pub use types::*;
