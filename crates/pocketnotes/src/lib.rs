//! `pocketnotes` - Colored groups of timestamped notes, kept locally
//!
//! This library provides the group and note model, the persistent store that
//! mirrors it into a key-value blob, group creation rules, and the text views
//! used by the `pnotes` front end.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod creation;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

pub use config::Config;
pub use creation::{GroupForm, NewGroup};
pub use error::{Error, Result, ValidationError};
pub use logging::init_logging;
pub use model::{Group, GroupColor, GroupId, Note, NoteId};
pub use storage::{BlobStats, BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use store::{LoadOutcome, Store, StoreOptions};
pub use view::NotesView;
