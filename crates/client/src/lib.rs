//! Status page client for the PDV API.
//!
//! On initialization the [`StatusPanel`] issues the liveness and environment
//! queries as two independent tasks. Each outcome updates its own part of the
//! [`DisplayState`]; a failure in one never affects the other, and nothing is
//! retried.

pub mod config;
pub mod error;
pub mod panel;
pub mod services;
pub mod state;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use panel::{DisplayState, PanelTasks, StatusPanel};
pub use services::{HttpStatusApi, InMemoryStatusApi, StatusApi, Stubbed};
pub use state::QueryState;
