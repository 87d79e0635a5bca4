//! sea-orm entities of the admin service.

pub mod access_tokens;
pub mod admins;
pub mod announcements;
pub mod events;
pub mod members;
pub mod one_time_passcodes;
