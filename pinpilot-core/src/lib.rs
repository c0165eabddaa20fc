//! Board-agnostic GPIO allocation engine
//!
//! This crate assigns physical GPIOs to the logical pin roles a set of
//! peripherals needs, using nothing but the board's metadata:
//!
//! - Board and peripheral descriptors (`profile`)
//! - Requirement extraction and priority ordering
//! - Candidate ranking via a fixed stack of scoring rules
//! - Greedy, forward-only allocation
//! - Result assembly with rationale and boot-safety warnings
//!
//! The engine holds no state between calls. Every [`allocate`] call builds
//! its own used-pin set and accumulators and drops them on return.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod engine;
pub mod profile;

pub use engine::{
    allocate, AllocationError, AllocationOptions, AllocationResult, Allocator, AssignmentKey,
    PinPick, PinRequirement, Priority, Ranker, ReasonTag, Score,
};
pub use profile::{
    BoardProfile, BusProtocol, BusRole, Gpio, GpioRange, PeripheralProfile, PinDescriptor,
};
