//! This crate manages a personal list of tasks.
//!
//! Tasks are tagged with the [`Timeframe`] they should be completed in, and can be grouped into named [`TaskList`]s.
//!
//! They are stored in two independent places:
//! * a local snapshot, handled by the [`cache`] module. This is the source of truth, which is loaded on startup and saved as a whole,
//! * a remote record store (see [`traits::RecordStore`]), to which single tasks are pushed on a best-effort basis by the [`remote`] module.
//!
//! A [`TaskManager`](manager::TaskManager) ties these together with the in-memory [`AppState`](state::AppState).

pub mod traits;

mod task;
pub use task::{Task, TaskId, Timeframe, ParseTimeframeError};
mod list;
pub use list::TaskList;
pub mod symbol;
pub use symbol::{Symbol, SymbolCatalog};
pub mod error;
pub use error::{StoreError, RemoteError};

pub mod cache;
pub mod remote;
pub mod resource;
pub mod mock_behaviour;
pub mod state;
pub mod manager;
pub use manager::TaskManager;

pub mod config;
pub mod utils;
