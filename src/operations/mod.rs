//! The operation surface: trading, bond economics, resolution, and the
//! administrative action queue.

pub mod admin;
pub mod bonds;
pub mod queries;
pub mod resolution;
pub mod trading;
