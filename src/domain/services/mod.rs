//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod coalescer;

pub use coalescer::{Coalescer, CoalescerStats, Command};
