// Service module exports

pub mod aperture;
pub mod dispatch;
pub mod notification;
pub mod settings;
pub mod valve_api;
