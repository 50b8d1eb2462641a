pub mod access;
pub mod domain;
pub mod ports;
pub mod progress;

pub use domain::{Course, CourseProgress, Lecture, LectureSummary, Principal, Role};
pub use ports::{CatalogStore, ObjectStore, PortError, PortResult};
