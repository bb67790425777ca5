mod common;

use common::{create_local_user, create_note, create_test_pool};

use notes_db::{DbError, NoteRepository, UserRepository, UserStore};

use googletest::prelude::*;
use googletest::matchers::is_empty as empty;
use sqlx::SqlitePool;
use uuid::Uuid;

async fn seeded_user(pool: &SqlitePool, email: &str) -> Uuid {
    let user = create_local_user(email);
    UserRepository::new(pool.clone()).insert(&user).await.unwrap();
    user.id
}

#[tokio::test]
async fn given_created_note_when_found_for_owner_then_returned() {
    // Given
    let pool = create_test_pool().await;
    let owner = seeded_user(&pool, "ann@x.com").await;
    let repo = NoteRepository::new(pool);
    let note = create_note(owner, "Groceries");

    // When
    repo.create(&note).await.unwrap();
    let found = repo.find_for_user(note.id, owner).await.unwrap();

    // Then
    assert_that!(found, some(anything()));
    let found = found.unwrap();
    assert_that!(found.title, eq("Groceries"));
    assert_that!(found.description, eq("Groceries body"));
}

#[tokio::test]
async fn given_note_of_other_user_when_found_then_none() {
    // Given
    let pool = create_test_pool().await;
    let owner = seeded_user(&pool, "ann@x.com").await;
    let intruder = seeded_user(&pool, "bob@x.com").await;
    let repo = NoteRepository::new(pool);
    let note = create_note(owner, "Private");
    repo.create(&note).await.unwrap();

    // When
    let found = repo.find_for_user(note.id, intruder).await.unwrap();

    // Then
    assert_that!(found, none());
}

#[tokio::test]
async fn given_notes_of_two_users_when_listed_then_only_own_notes_newest_first() {
    // Given
    let pool = create_test_pool().await;
    let owner = seeded_user(&pool, "ann@x.com").await;
    let other = seeded_user(&pool, "bob@x.com").await;
    let repo = NoteRepository::new(pool);

    let first = create_note(owner, "First");
    let mut second = create_note(owner, "Second");
    second.created_at = first.created_at + chrono::Duration::seconds(1);
    repo.create(&first).await.unwrap();
    repo.create(&second).await.unwrap();
    repo.create(&create_note(other, "Foreign")).await.unwrap();

    // When
    let notes = repo.list_for_user(owner).await.unwrap();

    // Then
    let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
    assert_that!(titles, elements_are![eq(&"Second"), eq(&"First")]);
}

#[tokio::test]
async fn given_user_without_notes_when_listed_then_empty() {
    let pool = create_test_pool().await;
    let owner = seeded_user(&pool, "ann@x.com").await;

    let notes = NoteRepository::new(pool).list_for_user(owner).await.unwrap();

    assert_that!(notes, empty());
}

#[tokio::test]
async fn given_duplicate_title_for_same_owner_when_created_then_unique_violation_on_title() {
    // Given
    let pool = create_test_pool().await;
    let owner = seeded_user(&pool, "ann@x.com").await;
    let repo = NoteRepository::new(pool);
    repo.create(&create_note(owner, "Groceries")).await.unwrap();

    // When
    let result = repo.create(&create_note(owner, "Groceries")).await;

    // Then
    match result {
        Err(DbError::UniqueViolation { field, .. }) => assert_that!(field, eq("title")),
        other => panic!("expected unique violation, got {:?}", other),
    }
}

#[tokio::test]
async fn given_same_title_for_different_owners_when_created_then_both_succeed() {
    // Given
    let pool = create_test_pool().await;
    let ann = seeded_user(&pool, "ann@x.com").await;
    let bob = seeded_user(&pool, "bob@x.com").await;
    let repo = NoteRepository::new(pool);
    repo.create(&create_note(ann, "Groceries")).await.unwrap();

    // When
    let result = repo.create(&create_note(bob, "Groceries")).await;

    // Then
    assert_that!(result, ok(anything()));
}

#[tokio::test]
async fn given_owner_when_update_for_user_then_changes_persist() {
    // Given
    let pool = create_test_pool().await;
    let owner = seeded_user(&pool, "ann@x.com").await;
    let repo = NoteRepository::new(pool);
    let mut note = create_note(owner, "Groceries");
    repo.create(&note).await.unwrap();

    // When
    note.apply_update(Some("Shopping".to_string()), None);
    let updated = repo.update_for_user(&note).await.unwrap();

    // Then
    assert_that!(updated, eq(true));
    let found = repo.find_for_user(note.id, owner).await.unwrap().unwrap();
    assert_that!(found.title, eq("Shopping"));
    assert_that!(found.description, eq("Groceries body"));
}

#[tokio::test]
async fn given_intruder_when_update_for_user_then_false_and_note_unchanged() {
    // Given
    let pool = create_test_pool().await;
    let owner = seeded_user(&pool, "ann@x.com").await;
    let intruder = seeded_user(&pool, "bob@x.com").await;
    let repo = NoteRepository::new(pool);
    let note = create_note(owner, "Groceries");
    repo.create(&note).await.unwrap();

    // When
    let mut forged = note.clone();
    forged.user_id = intruder;
    forged.title = "Hijacked".to_string();
    let updated = repo.update_for_user(&forged).await.unwrap();

    // Then
    assert_that!(updated, eq(false));
    let found = repo.find_for_user(note.id, owner).await.unwrap().unwrap();
    assert_that!(found.title, eq("Groceries"));
}

#[tokio::test]
async fn given_owner_when_delete_for_user_then_note_gone() {
    // Given
    let pool = create_test_pool().await;
    let owner = seeded_user(&pool, "ann@x.com").await;
    let repo = NoteRepository::new(pool);
    let note = create_note(owner, "Groceries");
    repo.create(&note).await.unwrap();

    // When
    let deleted = repo.delete_for_user(note.id, owner).await.unwrap();

    // Then
    assert_that!(deleted, eq(true));
    assert_that!(repo.find_for_user(note.id, owner).await.unwrap(), none());
}

#[tokio::test]
async fn given_intruder_when_delete_for_user_then_false() {
    // Given
    let pool = create_test_pool().await;
    let owner = seeded_user(&pool, "ann@x.com").await;
    let intruder = seeded_user(&pool, "bob@x.com").await;
    let repo = NoteRepository::new(pool);
    let note = create_note(owner, "Groceries");
    repo.create(&note).await.unwrap();

    // When
    let deleted = repo.delete_for_user(note.id, intruder).await.unwrap();

    // Then
    assert_that!(deleted, eq(false));
    assert_that!(repo.find_for_user(note.id, owner).await.unwrap(), some(anything()));
}
