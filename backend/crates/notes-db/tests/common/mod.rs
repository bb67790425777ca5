#![allow(dead_code)]

mod fixtures;
mod test_db;

pub use fixtures::{create_local_user, create_note};
pub use test_db::{create_file_pool, create_test_pool};
