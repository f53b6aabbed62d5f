//! Adaptive-learning recommendation engine.
//!
//! [`adaptive`] holds the pure analytic core; [`config`] and [`logging`]
//! are the ambient pieces a host service wires up around it.

pub mod adaptive;
pub mod config;
pub mod constants;
pub mod logging;
