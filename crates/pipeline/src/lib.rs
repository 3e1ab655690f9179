//! `userhub-pipeline`: request dispatch with composable behaviors.
//!
//! A typed request value is routed to exactly one handler. The invocation is
//! wrapped in an ordered chain of behaviors (logging, validation, ...) composed
//! by continuation passing:
//!
//! ```text
//! send(request)
//!   ↓
//! LoggingBehavior      (outermost, always installed)
//!   ↓
//! ValidationBehavior   (installed when the type has validators)
//!   ↓
//! custom behaviors     (per request type, registration order)
//!   ↓
//! RequestHandler       (exactly one per request type)
//! ```
//!
//! The chain runs outer-to-inner on the way in and inner-to-outer on the way
//! out. Nothing in this crate performs IO itself.

pub mod behavior;
pub mod cancel;
pub mod dispatcher;
pub mod handler;
pub mod logging;
pub mod request;
pub mod validation;

pub use behavior::{Behavior, Next, PipelineStage};
pub use cancel::guarded;
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use handler::RequestHandler;
pub use logging::LoggingBehavior;
pub use request::Request;
pub use tokio_util::sync::CancellationToken;
pub use validation::{ValidationBehavior, Validator};
