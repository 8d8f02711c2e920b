//! This crate is a client for the `app-planer.online` task/calendar REST service.
//!
//! It provides an HTTP client in the [`client`] module (and the matching login/registration
//! calls in [`auth`]), that can be used as a stand-alone module.
//!
//! Tasks are kept locally in a [`TaskStore`](store::TaskStore): one ordered bucket of tasks
//! per calendar date, with ids unique within each bucket.
//!
//! These two sides (remote client and local store) are meant to be used together through a
//! [`Provider`](provider::Provider). \
//! A `Provider` runs the user-level flows: it fetches notes and merges the new ones into the
//! store, and performs each create/toggle/edit/delete against the server before applying it
//! locally, so the store never gets ahead of the server.

pub mod traits;

pub mod store;
pub use store::DateKey;
pub use store::TaskStore;
mod task;
pub use task::NewTask;
pub use task::Task;
pub use task::TaskPatch;
pub mod provider;
pub use provider::Provider;

pub mod auth;
pub mod client;
pub mod session;
pub use session::Session;
pub mod wire;

pub mod mock_behaviour;
pub mod mock_source;

pub mod config;
pub mod utils;
