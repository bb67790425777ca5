use crate::Note;

use googletest::prelude::*;
use uuid::Uuid;

#[test]
fn given_missing_description_when_note_created_then_defaults_to_empty() {
    let note = Note::new(Uuid::new_v4(), "Groceries".into(), None);

    assert_that!(note.description, eq(""));
}

#[test]
fn given_partial_update_when_applied_then_only_provided_fields_change() {
    let mut note = Note::new(Uuid::new_v4(), "Groceries".into(), Some("milk".into()));

    note.apply_update(None, Some("milk, eggs".into()));

    assert_that!(note.title, eq("Groceries"));
    assert_that!(note.description, eq("milk, eggs"));
}
