//! Small helpers shared by domain types.

pub mod duration_ms;
pub mod string;
