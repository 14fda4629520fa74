//! Parent-owned aperture state shared with the modal.

mod store;

pub use store::{ApertureObserver, ApertureStore, ObserverId};
