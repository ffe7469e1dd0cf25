pub mod profiles;
pub mod projects;
pub mod ratings;
pub mod refresh_tokens;
pub mod users;
