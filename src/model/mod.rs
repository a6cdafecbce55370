pub mod attendance;
pub mod employee;
pub mod monthly_attendance;
pub mod week;
