//! Selection round-trip between the field state and its association.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::RelationshipKind;
use crate::infrastructure::traits::{ManyAssociation, SingleAssociation};

/// Association the selection is persisted to.
pub enum Association<K> {
    BelongsTo(Arc<dyn SingleAssociation<K>>),
    BelongsToMany(Arc<dyn ManyAssociation<K>>),
}

impl<K> Association<K> {
    pub fn kind(&self) -> RelationshipKind {
        match self {
            Association::BelongsTo(_) => RelationshipKind::BelongsTo,
            Association::BelongsToMany(_) => RelationshipKind::BelongsToMany,
        }
    }
}

/// Field state as handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SelectionState<K> {
    Single(Option<K>),
    Many(Vec<K>),
}

pub struct SelectionService<K> {
    association: Association<K>,
}

impl<K: Clone> SelectionService<K> {
    pub fn new(association: Association<K>) -> Self {
        Self { association }
    }

    pub fn is_multiple(&self) -> bool {
        self.association.kind().is_multiple()
    }

    /// Identities currently related through a many-valued association.
    ///
    /// Returns `None` for single-valued associations: their state passes
    /// through unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn load_state(&self) -> ApplicationResult<Option<Vec<K>>> {
        match &self.association {
            Association::BelongsToMany(assoc) => {
                let ids = assoc.related_ids().with_context("load related ids")?;
                debug!("load_state: {} related ids", ids.len());
                Ok(Some(ids))
            }
            Association::BelongsTo(_) => Ok(None),
        }
    }

    /// Replace the association's members with exactly `state`.
    ///
    /// Absent state deselects everything. Single-valued associations are
    /// left to their own setter.
    #[instrument(level = "debug", skip(self, state))]
    pub fn save_state(&self, state: Option<Vec<K>>) -> ApplicationResult<()> {
        match &self.association {
            Association::BelongsToMany(assoc) => {
                let ids = state.unwrap_or_default();
                debug!("save_state: syncing {} ids", ids.len());
                assoc.sync(&ids).with_context("sync related ids")
            }
            Association::BelongsTo(_) => Ok(()),
        }
    }

    /// Current state, including the single-valued passthrough.
    pub fn current_state(&self) -> ApplicationResult<SelectionState<K>> {
        match &self.association {
            Association::BelongsToMany(assoc) => Ok(SelectionState::Many(
                assoc.related_ids().with_context("load related ids")?,
            )),
            Association::BelongsTo(assoc) => Ok(SelectionState::Single(
                assoc.get().with_context("load related id")?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::{InMemoryManyAssociation, InMemorySingleAssociation};

    #[test]
    fn given_single_association_when_loading_then_passes_through() {
        let assoc = Arc::new(InMemorySingleAssociation::new(Some(4)));
        let service = SelectionService::new(Association::BelongsTo(assoc.clone()));

        assert!(!service.is_multiple());
        assert_eq!(service.load_state().unwrap(), None);
        service.save_state(Some(vec![1, 2])).unwrap();
        assert_eq!(assoc.get().unwrap(), Some(4));
        assert_eq!(service.current_state().unwrap(), SelectionState::Single(Some(4)));
    }

    #[test]
    fn given_many_association_when_saving_then_replaces_membership() {
        let assoc = Arc::new(InMemoryManyAssociation::new(vec![1, 2]));
        let service = SelectionService::new(Association::BelongsToMany(assoc.clone()));

        service.save_state(Some(vec![2, 5])).unwrap();

        assert!(service.is_multiple());
        assert_eq!(service.load_state().unwrap(), Some(vec![2, 5]));
    }
}
