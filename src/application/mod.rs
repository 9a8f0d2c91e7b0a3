pub mod popup_controller;

pub use popup_controller::{BackendStatus, PopupController};
