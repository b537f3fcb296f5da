//! 应用层服务

mod room_controller;
mod session_service;
mod signup_form;


pub use room_controller::RoomSessionController;
pub use session_service::{SessionService, SessionServiceDependencies};
pub use signup_form::SignupForm;
