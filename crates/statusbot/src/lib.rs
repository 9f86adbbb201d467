//! Slack status bot for monitored retail sites.
//!
//! This crate provides:
//! - Slack event payload parsing and token verification
//! - A Block Kit message model and the Slack `chat.postMessage` notifier
//! - PRTG sensor and Meraki wireless client lookups
//! - The `status`, `clovers`, `wifi` and `help` commands
//! - HTTP server for the Slack events endpoint (standalone service)

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Most lookups are fallible HTTP calls

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod meraki;
pub mod prtg;
pub mod server;
pub mod slack;

pub use commands::{Command, Dispatcher};
pub use config::Config;
pub use error::{CommandError, LookupError};
pub use meraki::{MerakiClient, WirelessDirectory};
pub use prtg::{PrtgClient, SensorProvider};
pub use slack::{ChatNotifier, SlackNotifier};
