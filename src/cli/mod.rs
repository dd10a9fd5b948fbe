mod auth;
mod info;
mod logout;
mod playlist;
mod recommend;

pub use auth::auth;
pub use info::info;
pub use logout::logout;
pub use playlist::playlist;
pub use recommend::{MoodRequest, recommend};
