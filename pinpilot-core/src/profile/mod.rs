//! Profile types
//!
//! Immutable board and peripheral descriptors. The engine never loads or
//! validates these itself; a collaborator hands them over already parsed.

pub mod board;
pub mod bus;
pub mod peripheral;

pub use board::*;
pub use bus::{BusProtocol, BusRole};
pub use peripheral::*;
