//! Owned child-collection reconciliation.
//!
//! Recipes carry tags and ingredients, movies carry characters. In every
//! case the request payload names the children inline as `{ "name": ... }`
//! descriptors, and the children themselves are per-owner rows that are
//! created the first time a name is used. [`reconcile`] is the single
//! routine behind all three collections:
//!
//! 1. every descriptor is validated before anything is written,
//! 2. each distinct name is resolved against `(owner, name)` or created,
//! 3. on update the parent's previous attachments are cleared,
//! 4. the resolved children are attached.
//!
//! Storage is abstracted behind [`ChildStore`] so the same routine runs
//! against a PostgreSQL transaction in production and an in-memory store in
//! tests. Children are never deleted here; orphans persist until removed
//! explicitly.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length (in characters) of a child name.
pub const MAX_CHILD_NAME_LENGTH: usize = 255;

/// An inline `{ "name": ... }` reference to a child inside a parent payload.
///
/// `name` is optional at the serde level so that a descriptor without a name
/// reaches [`reconcile`] and is rejected as a validation error instead of a
/// body-deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChildDescriptor {
    #[serde(default)]
    pub name: Option<String>,
}

impl ChildDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The trimmed name, or a validation error if it is missing, blank, or
    /// longer than [`MAX_CHILD_NAME_LENGTH`].
    pub fn validated_name(&self) -> Result<&str, CoreError> {
        let name = self.name.as_deref().ok_or_else(|| {
            CoreError::Validation("Child descriptor is missing required field 'name'".into())
        })?;
        validate_name(name)
    }
}

/// Trim a child name and check it is non-blank and not over-long.
pub fn validate_name(name: &str) -> Result<&str, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Child name must not be blank".into()));
    }
    if name.chars().count() > MAX_CHILD_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Child name must be at most {MAX_CHILD_NAME_LENGTH} characters"
        )));
    }
    Ok(name)
}

/// The parent whose attachment set is being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRef {
    pub id: DbId,
    pub owner: DbId,
}

/// Whether the parent was just created or already existed.
///
/// A freshly created parent has no attachments, so the clear step is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileMode {
    Create,
    Update,
}

/// Owner-scoped persistence for one child collection.
///
/// Implementations bind a concrete child kind (tags, ingredients,
/// characters) and usually an open transaction. Persistence errors are
/// returned unchanged; `Error: From<CoreError>` lets [`reconcile`] report
/// validation and ownership failures through the same channel.
#[async_trait]
pub trait ChildStore: Send {
    type Error: From<CoreError> + Send;

    /// Id of the child named `name` owned by `owner`, if any.
    async fn find_by_owner_and_name(
        &mut self,
        owner: DbId,
        name: &str,
    ) -> Result<Option<DbId>, Self::Error>;

    /// Create a child for `owner` and return its id.
    async fn create(&mut self, owner: DbId, name: &str) -> Result<DbId, Self::Error>;

    /// Detach every child from the parent.
    async fn clear_attachments(&mut self, parent_id: DbId) -> Result<(), Self::Error>;

    /// Attach a child to the parent. Attaching an attached child is a no-op.
    async fn add_attachment(&mut self, parent_id: DbId, child_id: DbId)
        -> Result<(), Self::Error>;
}

/// Validate every descriptor and return the distinct names in first-seen order.
pub fn validate_descriptors(descriptors: &[ChildDescriptor]) -> Result<Vec<&str>, CoreError> {
    let mut seen = HashSet::with_capacity(descriptors.len());
    let mut names = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let name = descriptor.validated_name()?;
        if seen.insert(name) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Make the parent's attachment set exactly the children named in `descriptors`.
///
/// Returns the ids of the attached children, one per distinct name, in the
/// order the names first appear. Fails with [`CoreError::Forbidden`] if
/// `owner` does not own the parent and with [`CoreError::Validation`] if any
/// descriptor is malformed; in both cases the store is not touched.
pub async fn reconcile<S>(
    store: &mut S,
    parent: ParentRef,
    owner: DbId,
    descriptors: &[ChildDescriptor],
    mode: ReconcileMode,
) -> Result<Vec<DbId>, S::Error>
where
    S: ChildStore + ?Sized,
{
    if parent.owner != owner {
        return Err(CoreError::Forbidden(format!(
            "Parent {} is not owned by user {owner}",
            parent.id
        ))
        .into());
    }

    let names = validate_descriptors(descriptors)?;

    let mut child_ids = Vec::with_capacity(names.len());
    let mut created = 0usize;
    for name in names {
        let child_id = match store.find_by_owner_and_name(owner, name).await? {
            Some(id) => id,
            None => {
                created += 1;
                store.create(owner, name).await?
            }
        };
        child_ids.push(child_id);
    }

    if mode == ReconcileMode::Update {
        store.clear_attachments(parent.id).await?;
    }
    for &child_id in &child_ids {
        store.add_attachment(parent.id, child_id).await?;
    }

    tracing::debug!(
        parent_id = parent.id,
        owner,
        attached = child_ids.len(),
        created,
        ?mode,
        "Reconciled child collection",
    );

    Ok(child_ids)
}
