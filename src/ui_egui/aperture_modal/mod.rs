//! Modal for updating the valve's aperture time.

mod render;
mod state;
mod widgets;

pub use render::render_aperture_modal;
pub use state::{ApertureModalState, TimePickerState, NOTIFICATION_FAILED_MESSAGE};
