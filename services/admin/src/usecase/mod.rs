pub mod content;
pub mod login;
pub mod password_reset;
pub mod profile;
pub mod register;
pub mod session;
pub mod verify_otp;
