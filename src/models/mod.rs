//! Data models for the CourseDesk admin console.
//!
//! These shapes match the JSON the console consumes; every record is owned by
//! the upstream submission pipeline and treated as read-only here.

mod contact;
mod dashboard;
mod enrollment;

pub use contact::*;
pub use dashboard::*;
pub use enrollment::*;
