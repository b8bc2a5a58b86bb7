//! Business logic, independent of HTTP and rendering.

pub mod greeting;
