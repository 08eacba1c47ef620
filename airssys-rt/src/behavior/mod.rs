//! Plan-returning behaviors and the adapter that runs them as actors.

pub mod actor;
pub mod traits;

pub use actor::BehaviorActor;
pub use traits::{Behavior, BehaviorContext};
