pub mod alert;
mod app;
pub mod aperture_modal;
pub mod drag;
pub mod spring;

pub use app::ApertureApp;
