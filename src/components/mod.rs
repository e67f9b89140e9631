//! Page components.

pub mod showcase;
