//! HTTP routes.
//!
//! - `mock`: the stateless personalization backend used by web clients
//! - `onboarding`: the conversation, theme and privacy API over the stored state

pub mod mock;
pub mod onboarding;
