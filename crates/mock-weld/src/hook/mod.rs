//! Runtime model of generated mocks
//!
//! [`BehaviorController`] and [`CallRecord`] behave like the controller and
//! call record types the generator emits for every method, so their
//! contracts can be exercised from Rust.

pub mod controller;
pub mod record;

pub use controller::{Behavior, BehaviorController};
pub use record::{CallRecord, Values};
