//! cmdeck - an embeddable command console.
//!
//! Register [`CommandContainer`](commands::CommandContainer)s on a
//! [`Console`](console::Console), then feed it input lines to execute and
//! partial lines to complete.

pub mod commands;
pub mod config;
pub mod console;
pub mod demo;
pub mod error;
pub mod headless;
pub mod log;
pub mod logging;
