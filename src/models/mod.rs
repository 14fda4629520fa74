// Module exports for models

pub mod aperture;
pub mod settings;
