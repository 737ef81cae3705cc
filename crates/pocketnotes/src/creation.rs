//! Group creation form and its validation rules.
//!
//! Checks run in a fixed order and stop at the first failure:
//! empty name, name shorter than two characters, name already taken
//! (ignoring case), no color chosen.

use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::model::{Group, GroupColor, GroupId};
use crate::storage::BlobStore;
use crate::store::Store;

/// Minimum length of a trimmed group name, counted in Unicode scalar values
/// rather than UTF-16 units, so a single emoji such as `📝` is too short.
pub const MIN_NAME_LEN: usize = 2;

/// A validated creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    /// Trimmed name.
    pub name: String,
    /// Chosen palette color.
    pub color: GroupColor,
}

/// Validate a candidate group against the existing collection.
///
/// # Errors
///
/// Returns the first [`ValidationError`] that applies.
pub fn validate_group(
    name: &str,
    color: Option<GroupColor>,
    existing: &[Group],
) -> std::result::Result<NewGroup, ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    if existing.iter().any(|g| g.name_matches(name)) {
        return Err(ValidationError::DuplicateName);
    }
    let color = color.ok_or(ValidationError::NoColorSelected)?;

    Ok(NewGroup {
        name: name.to_string(),
        color,
    })
}

/// State of the "create group" surface.
///
/// Opens with the first palette color selected. The last validation failure
/// is kept for display and cleared as soon as the name is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupForm {
    name: String,
    color: Option<GroupColor>,
    error: Option<ValidationError>,
}

impl Default for GroupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupForm {
    /// A blank form with the default color pre-selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            color: Some(GroupColor::default_choice()),
            error: None,
        }
    }

    /// A blank form with no color selected.
    #[must_use]
    pub fn without_color() -> Self {
        Self {
            color: None,
            ..Self::new()
        }
    }

    /// Builder-style name setter.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Builder-style color setter.
    #[must_use]
    pub fn with_color(mut self, color: GroupColor) -> Self {
        self.choose_color(color);
        self
    }

    /// Replace the name input and clear any shown error.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.error = None;
    }

    /// Select a palette color.
    pub fn choose_color(&mut self, color: GroupColor) {
        self.color = Some(color);
    }

    /// Current name input, untrimmed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currently selected color.
    #[must_use]
    pub fn color(&self) -> Option<GroupColor> {
        self.color
    }

    /// The error from the last failed submit, if still relevant.
    #[must_use]
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Run the rules against `existing` without submitting.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] that applies.
    pub fn validate(&self, existing: &[Group]) -> std::result::Result<NewGroup, ValidationError> {
        validate_group(&self.name, self.color, existing)
    }

    /// Validate and, on success, create the group in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) when a rule fails
    /// (the store is untouched), or [`Error::Persist`](crate::Error::Persist)
    /// when the group was created but could not be saved.
    pub fn submit<B: BlobStore>(&mut self, store: &mut Store<B>) -> Result<GroupId> {
        self.error = None;
        let request = match self.validate(store.groups()) {
            Ok(request) => request,
            Err(err) => {
                debug!("Rejected group {:?}: {}", self.name, err);
                self.error = Some(err);
                return Err(err.into());
            }
        };

        store.create_group(&request.name, request.color)
    }
}
