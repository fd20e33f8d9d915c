//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache cleanup: purges expired read-through cache entries

mod cleanup;

pub use cleanup::spawn_cleanup_task;
