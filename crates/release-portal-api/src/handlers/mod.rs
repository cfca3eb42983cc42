//! API route handlers

pub mod components;
pub mod health;
pub mod releases;
pub mod reports;
pub mod signoff;
pub mod teams;
pub mod user_stories;
