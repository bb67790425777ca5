use notes_core::{Note, User};

use uuid::Uuid;

pub fn create_local_user(email: &str) -> User {
    User::new_local(
        User::default_name_for(email),
        email,
        "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    )
}

pub fn create_note(user_id: Uuid, title: &str) -> Note {
    Note::new(user_id, title.to_string(), Some(format!("{} body", title)))
}
