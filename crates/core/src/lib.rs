//! Heuristic face counting for a live camera feed.
//!
//! Each bounded context keeps its traits and pure logic under `domain` and
//! its adapters to cameras, windows, HTTP and image libraries under
//! `infrastructure`. The [`pipeline`] module wires them into the main loop.

pub mod annotation;
pub mod capture;
pub mod detection;
pub mod display;
pub mod pipeline;
pub mod shared;
pub mod telemetry;
