mod callback;
mod health;

pub use callback::callback;
pub use health::health;
