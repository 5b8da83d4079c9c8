//! Input polling, beat scheduling, and peripheral initialisation.

pub mod blinker;
pub mod button;
pub mod hw_init;
