pub mod profile;
pub mod project;
pub mod rating;
pub mod refresh_token;
pub mod user;

pub use profile::Profile;
pub use project::{Project, ProjectStatus, ProjectView};
pub use rating::Rating;
pub use refresh_token::RefreshToken;
pub use user::User;
