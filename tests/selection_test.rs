//! Tests for the selection round-trip

use std::sync::Arc;

use tempfile::TempDir;

use selecttree::application::services::{Association, SelectionService, SelectionState};
use selecttree::domain::RecordKey;
use selecttree::infrastructure::json::JsonFileAssociation;
use selecttree::infrastructure::traits::{
    InMemoryManyAssociation, InMemorySingleAssociation, ManyAssociation, RealFileSystem,
    SingleAssociation,
};

#[test]
fn given_populated_association_when_saving_empty_list_then_association_is_empty() {
    // Arrange
    let assoc = Arc::new(InMemoryManyAssociation::new(vec![3, 4]));
    let service = SelectionService::new(Association::BelongsToMany(assoc.clone()));

    // Act
    service.save_state(Some(vec![])).unwrap();

    // Assert
    assert!(assoc.related_ids().unwrap().is_empty());
}

#[test]
fn given_populated_association_when_saving_absent_state_then_deselects_everything() {
    let assoc = Arc::new(InMemoryManyAssociation::new(vec![3, 4]));
    let service = SelectionService::new(Association::BelongsToMany(assoc.clone()));

    service.save_state(None).unwrap();

    assert!(assoc.related_ids().unwrap().is_empty());
}

#[test]
fn given_many_association_when_loading_then_returns_related_ids_in_order() {
    let assoc = Arc::new(InMemoryManyAssociation::new(vec![9, 2, 5]));
    let service = SelectionService::new(Association::BelongsToMany(assoc));

    assert_eq!(service.load_state().unwrap(), Some(vec![9, 2, 5]));
    assert_eq!(
        service.current_state().unwrap(),
        SelectionState::Many(vec![9, 2, 5])
    );
}

#[test]
fn given_single_association_when_saving_then_value_is_untouched() {
    let assoc = Arc::new(InMemorySingleAssociation::new(Some(1)));
    let service = SelectionService::new(Association::BelongsTo(assoc.clone()));

    service.save_state(None).unwrap();

    assert_eq!(assoc.get().unwrap(), Some(1));
    assert_eq!(service.load_state().unwrap(), None);
}

#[test]
fn given_file_association_when_round_tripping_then_persists_exact_set() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("selected.json");
    let store = Arc::new(JsonFileAssociation::new(Arc::new(RealFileSystem), &path));
    let service = SelectionService::new(Association::BelongsToMany(store));

    // Act / Assert: missing file reads as empty
    assert_eq!(service.load_state().unwrap(), Some(vec![]));

    service
        .save_state(Some(vec![RecordKey::Int(3), RecordKey::Str("x".into())]))
        .unwrap();
    assert_eq!(
        service.load_state().unwrap(),
        Some(vec![RecordKey::Int(3), RecordKey::Str("x".into())])
    );

    service.save_state(Some(vec![])).unwrap();
    assert_eq!(service.load_state().unwrap(), Some(vec![]));
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
}

#[test]
fn given_file_single_association_when_reading_then_returns_scalar() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("parent.json");
    std::fs::write(&path, "42").unwrap();
    let store = JsonFileAssociation::new(Arc::new(RealFileSystem), &path);

    assert_eq!(SingleAssociation::get(&store).unwrap(), Some(RecordKey::Int(42)));

    std::fs::write(&path, "null").unwrap();
    assert_eq!(SingleAssociation::get(&store).unwrap(), None);
}
