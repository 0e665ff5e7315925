// Presentation layer - HTTP surface and terminal front end
pub mod app_state;
pub mod handlers;
pub mod router;
pub mod terminal;
