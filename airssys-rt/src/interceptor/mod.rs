//! Interceptor chain: cross-cutting hooks around message send/receive.
//!
//! Grounded on the decision-enum style of [`ErrorAction`](crate::actor::ErrorAction)
//! and the rate-limiting/backoff machinery in
//! [`supervisor::RestartBackoff`](crate::supervisor::RestartBackoff), generalized
//! from actor restarts to individual message retries.
//!
//! Interceptors are invoked in priority order at four phases: `before_send`,
//! `before_receive`, `after_process` and `on_error`. Unlike most of this
//! crate, the chain stores interceptors as `Box<dyn Interceptor>` rather
//! than generic constraints: the set of interceptors is assembled at
//! runtime (user code composes retry/validation/custom interceptors in
//! varying combinations), so static monomorphization does not apply here.

pub mod chain;
pub mod retry;
pub mod traits;
pub mod validation;

pub use chain::InterceptorChain;
pub use retry::{CircuitState, RetryConfig, RetryInterceptor};
pub use traits::{Interceptor, InterceptorDecision, InterceptorPhaseError};
pub use validation::ValidationInterceptor;
