//! The authoritative group collection and its persistence mirror.
//!
//! [`Store`] is the only thing that mutates groups. Every successful mutation
//! is followed by a full-collection write to the [`BlobStore`]; the in-memory
//! change is kept even if that write fails, and the failure is returned as
//! [`Error::Persist`] so the caller can warn and carry on.

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::{Error, Result};
use crate::model::{
    Clock, Group, GroupColor, GroupId, IdGenerator, Note, NoteId, SystemClock, TimestampIds,
};
use crate::storage::BlobStore;

/// How the store mirrors itself to the blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Blob key holding the serialized collection.
    pub key: String,
    /// Write the collection even when it holds no groups.
    pub persist_empty: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            persist_empty: false,
        }
    }
}

/// What [`Store::load`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key.
    Absent,
    /// The stored collection was restored.
    Loaded {
        /// Number of groups restored.
        groups: usize,
    },
    /// The stored blob could not be parsed and was ignored.
    Recovered,
}

/// Owner of the group collection.
#[derive(Debug)]
pub struct Store<B: BlobStore> {
    blob: B,
    options: StoreOptions,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    groups: Vec<Group>,
}

impl<B: BlobStore> Store<B> {
    /// Create an empty store over `blob` without reading it.
    #[must_use]
    pub fn new(blob: B, options: StoreOptions) -> Self {
        Self {
            blob,
            options,
            ids: Box::new(TimestampIds::new()),
            clock: Box::new(SystemClock),
            groups: Vec::new(),
        }
    }

    /// Create a store over `blob` and restore the persisted collection.
    ///
    /// # Errors
    ///
    /// Returns an error only if the blob store itself cannot be read; an
    /// unparseable blob is logged and treated as absent.
    pub fn open(blob: B, options: StoreOptions) -> Result<Self> {
        let mut store = Self::new(blob, options);
        store.load()?;
        Ok(store)
    }

    /// Replace the identifier generator.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Replace the clock used for creation timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Restore the collection from the blob store, replacing what is in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob store cannot be read.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        match self.read_persisted() {
            Ok(Some(groups)) => {
                debug!(
                    "Loaded {} groups from key {}",
                    groups.len(),
                    self.options.key
                );
                let count = groups.len();
                self.groups = groups;
                Ok(LoadOutcome::Loaded { groups: count })
            }
            Ok(None) => {
                debug!("No stored groups under key {}", self.options.key);
                self.groups.clear();
                Ok(LoadOutcome::Absent)
            }
            Err(err @ Error::Deserialization { .. }) => {
                warn!("Ignoring unreadable stored groups: {}", err);
                self.groups.clear();
                Ok(LoadOutcome::Recovered)
            }
            Err(err) => Err(err),
        }
    }

    /// Parse the persisted collection without touching in-memory state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialization`] if the blob is present but malformed,
    /// or a storage error if it cannot be read.
    pub fn read_persisted(&self) -> Result<Option<Vec<Group>>> {
        let Some(raw) = self.blob.get(&self.options.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| Error::Deserialization {
                key: self.options.key.clone(),
                source,
            })
    }

    /// Write the full collection to the blob store.
    ///
    /// Skipped when the collection is empty unless `persist_empty` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the write fails.
    pub fn save(&mut self) -> Result<()> {
        if self.groups.is_empty() && !self.options.persist_empty {
            debug!("Skipping save of empty collection");
            return Ok(());
        }

        let payload = serde_json::to_string(&self.groups)?;
        self.blob
            .set(&self.options.key, &payload)
            .map_err(|e| Error::persist(self.options.key.clone(), e))
    }

    /// Append a new group and save.
    ///
    /// No validation happens here; see [`GroupForm`](crate::creation::GroupForm).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if saving fails. The group has still been added.
    pub fn create_group(&mut self, name: &str, color: GroupColor) -> Result<GroupId> {
        let group = Group {
            id: GroupId::new(self.ids.next_id()),
            name: name.to_string(),
            color,
            notes: Vec::new(),
            created_at: self.stamp(),
        };
        let id = group.id.clone();
        info!("Created group {} ({})", group.name, id);
        self.groups.push(group);

        self.save()?;
        Ok(id)
    }

    /// Append a note to the group with `group_id` and save.
    ///
    /// Returns `Ok(None)` without saving when the group does not exist or the
    /// trimmed text is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if saving fails. The note has still been added.
    pub fn append_note(&mut self, group_id: &GroupId, text: &str) -> Result<Option<NoteId>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let created_at = self.stamp();
        let Some(group) = self.groups.iter_mut().find(|g| &g.id == group_id) else {
            debug!("Ignoring note for unknown group {}", group_id);
            return Ok(None);
        };

        let note_id = NoteId::new(self.ids.next_id());
        group.notes.push(Note {
            id: note_id.clone(),
            text: text.to_string(),
            created_at,
        });
        debug!("Appended note {} to group {}", note_id, group_id);

        self.save()?;
        Ok(Some(note_id))
    }

    /// Current time truncated to the millisecond precision the blob keeps.
    fn stamp(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(3)
    }

    /// All groups in creation order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The group with `id`.
    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// The group whose name matches ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name_matches(name.trim()))
    }

    /// Look a group up by exact id first, then by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GroupNotFound`] if neither matches.
    pub fn resolve(&self, query: &str) -> Result<&Group> {
        self.groups
            .iter()
            .find(|g| g.id.as_str() == query)
            .or_else(|| self.find_by_name(query))
            .ok_or_else(|| Error::GroupNotFound(query.to_string()))
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Persistence options in effect.
    #[must_use]
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// The underlying blob store.
    #[must_use]
    pub fn blob(&self) -> &B {
        &self.blob
    }

    /// Mutable access to the underlying blob store.
    ///
    /// Writing through this bypasses the in-memory collection; call
    /// [`load`](Self::load) afterwards to pick the change up.
    pub fn blob_mut(&mut self) -> &mut B {
        &mut self.blob
    }
}
