//! Conversation step controller.
//!
//! # Module Structure
//!
//! - `controller`: the step machine, its snapshot and options
//! - `timer`: the `StepTimer` seam driving `site_assembly` → `personalized_hero`

mod controller;
mod timer;

pub use controller::{ControllerOptions, ConversationController, ConversationSnapshot};
pub use naible_core::conversation::question;
pub use timer::{ImmediateStepTimer, StepTimer, TokioStepTimer};
