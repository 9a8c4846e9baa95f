pub mod state;
pub mod views;

pub use state::{AppState, CookieSettings};
pub use views::Views;
