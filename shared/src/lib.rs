#![no_std]

pub mod constants;
pub mod errors;
pub mod events;
pub mod types;

pub use constants::{BASIS_POINTS, MAX_COMMISSION_BPS};
