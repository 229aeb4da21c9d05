//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache instance.
//!
//! # Tasks
//! - Sweep: removes expired cache entries at configured intervals and
//!   returns their containers to the entry pool

mod sweeper;

pub use sweeper::SweepScheduler;
