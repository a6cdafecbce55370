pub mod attendance;
pub mod calendar;
pub mod locks;
pub mod validation;
