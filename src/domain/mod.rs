//! Domain Layer
//!
//! The core of Appix: the change-coalescing state machine and the types it
//! reasons about, without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Change notifications and push runs
//! - `value_objects/` - Watcher state, ignore patterns
//! - `services/` - The coalescing state machine
//! - `policies/` - Which paths are relevant
//! - `ports/` - Interface definitions for infrastructure (push, live reload)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the network; the only file read is
//!    loading `.appixignore`
//! 2. **Single writer** - Watcher state is owned by one `Coalescer` value
//! 3. **Ports & Adapters** - Pushing and reloading go through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
