mod note;
mod provider;
mod user;
