//! Action routing subsystem.
//!
//! # Data Flow
//! ```text
//! RequestEnvelope { action, auth?, logger? }
//!     → action.rs (parse action tag, bind its sub-payload)
//!     → target.rs (total mapping Action → ActionTarget)
//!     → router.rs (one downstream call, outcome → envelope + status)
//!
//! Target Compilation (at startup):
//!     ServicesConfig
//!     → Parse URLs, statuses
//!     → Freeze as immutable TargetTable
//! ```
//!
//! # Design Decisions
//! - Closed dispatch table: every action has exactly one target
//! - Unknown actions are an explicit error, never a pass-through
//! - Targets immutable at runtime (shared without locks)

pub mod action;
pub mod router;
pub mod target;

pub use action::{Action, Dispatch, RoutingError};
pub use router::ActionRouter;
pub use target::{ActionTarget, TargetError, TargetTable};
