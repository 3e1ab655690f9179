//! Request dispatch (application-level orchestration).
//!
//! ## Dispatch Flow
//!
//! ```text
//! send(request)
//!   ↓
//! 1. Resolve the pipeline for TypeId::of::<R>()
//!   ↓
//! 2. Resolve exactly one handler (HandlerNotFound / AmbiguousHandler)
//!   ↓
//! 3. Fold the behaviors right-to-left around the handler
//!   ↓
//! 4. Invoke the composed chain
//! ```
//!
//! Pipelines are built once by `DispatcherBuilder::build` and are read-only
//! afterwards, so a `Dispatcher` can be shared behind an `Arc` without locks.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use userhub_core::{PipelineError, PipelineResult};

use crate::{
    Behavior, LoggingBehavior, Next, PipelineStage, Request, RequestHandler, ValidationBehavior,
    Validator,
};

/// Everything registered for one request type, resolved at build time.
struct Pipeline<R: Request> {
    handlers: Vec<Arc<dyn RequestHandler<Request = R>>>,
    behaviors: Vec<Arc<dyn Behavior<R>>>,
}

impl<R: Request> Pipeline<R> {
    fn resolve_handler(&self) -> PipelineResult<&dyn RequestHandler<Request = R>> {
        match self.handlers.as_slice() {
            [] => Err(PipelineError::HandlerNotFound(R::name())),
            [handler] => Ok(handler.as_ref()),
            many => Err(PipelineError::AmbiguousHandler {
                request: R::name(),
                count: many.len(),
            }),
        }
    }

    /// Build the single callable chain: behaviors[0](behaviors[1](...(handler))).
    fn compose<'a>(
        &'a self,
        handler: &'a dyn RequestHandler<Request = R>,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> Next<'a, R::Response> {
        let terminal: Next<'a, R::Response> = Box::new(move || handler.handle(request, cancel));

        self.behaviors
            .iter()
            .rev()
            .fold(terminal, |next, behavior| -> Next<'a, R::Response> {
                Box::new(move || behavior.handle(request, cancel, next))
            })
    }
}

/// Registrations for one request type, before stages are applied.
struct Route<R: Request> {
    handlers: Vec<Arc<dyn RequestHandler<Request = R>>>,
    validators: Vec<Arc<dyn Validator<Request = R>>>,
    behaviors: Vec<Arc<dyn Behavior<R>>>,
}

impl<R: Request> Route<R> {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
            validators: Vec::new(),
            behaviors: Vec::new(),
        }
    }
}

/// Type-erased view of a `Route<R>` so routes of different request types can
/// share one map.
trait ErasedRoute: Send + Sync {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_pipeline(self: Box<Self>, stages: &[PipelineStage]) -> Box<dyn Any + Send + Sync>;
}

impl<R: Request> ErasedRoute for Route<R> {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_pipeline(self: Box<Self>, stages: &[PipelineStage]) -> Box<dyn Any + Send + Sync> {
        let route = *self;
        let mut behaviors: Vec<Arc<dyn Behavior<R>>> =
            Vec::with_capacity(stages.len() + route.behaviors.len());

        for stage in stages {
            match stage {
                PipelineStage::Logging => behaviors.push(Arc::new(LoggingBehavior)),
                PipelineStage::Validation => {
                    if !route.validators.is_empty() {
                        behaviors.push(Arc::new(ValidationBehavior::new(route.validators.clone())));
                    }
                }
            }
        }
        behaviors.extend(route.behaviors);

        Box::new(Pipeline {
            handlers: route.handlers,
            behaviors,
        })
    }
}

/// Registers handlers, validators and behaviors, then freezes them into a
/// [`Dispatcher`].
///
/// ```ignore
/// let dispatcher = Dispatcher::builder()
///     .handler(GetUserHandler::new(store.clone()))
///     .validator(GetUserValidator)
///     .build();
/// ```
pub struct DispatcherBuilder {
    stages: Vec<PipelineStage>,
    routes: HashMap<TypeId, Box<dyn ErasedRoute>>,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self {
            stages: PipelineStage::DEFAULT.to_vec(),
            routes: HashMap::new(),
        }
    }
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configured stage order (outermost first).
    pub fn with_stages(mut self, stages: impl IntoIterator<Item = PipelineStage>) -> Self {
        self.stages = stages.into_iter().collect();
        self
    }

    pub fn handler<H>(self, handler: H) -> Self
    where
        H: RequestHandler + 'static,
    {
        let handler: Arc<dyn RequestHandler<Request = H::Request>> = Arc::new(handler);
        self.handler_arc(handler)
    }

    pub fn handler_arc<R: Request>(mut self, handler: Arc<dyn RequestHandler<Request = R>>) -> Self {
        self.with_route::<R>(|route| {
            if !route.handlers.is_empty() {
                warn!(
                    request = R::name(),
                    "a handler is already registered for this request type; dispatch will fail"
                );
            }
            route.handlers.push(handler);
        });
        self
    }

    pub fn validator<V>(mut self, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        let validator: Arc<dyn Validator<Request = V::Request>> = Arc::new(validator);
        self.with_route::<V::Request>(|route| route.validators.push(validator));
        self
    }

    /// Add a behavior for one request type. Custom behaviors sit inside the
    /// configured stages, in registration order.
    pub fn behavior<R, B>(mut self, behavior: B) -> Self
    where
        R: Request,
        B: Behavior<R> + 'static,
    {
        let behavior: Arc<dyn Behavior<R>> = Arc::new(behavior);
        self.with_route::<R>(|route| route.behaviors.push(behavior));
        self
    }

    pub fn build(self) -> Dispatcher {
        let stages = self.stages;
        let pipelines = self
            .routes
            .into_iter()
            .map(|(type_id, route)| (type_id, route.into_pipeline(&stages)))
            .collect();
        Dispatcher { pipelines }
    }

    fn with_route<R: Request>(&mut self, register: impl FnOnce(&mut Route<R>)) {
        let slot = self
            .routes
            .entry(TypeId::of::<R>())
            .or_insert_with(|| Box::new(Route::<R>::new()));
        // Keyed by `TypeId::of::<R>()`, so the slot always holds a `Route<R>`.
        if let Some(route) = slot.as_any_mut().downcast_mut::<Route<R>>() {
            register(route);
        }
    }
}

/// Routes typed requests to their handler through the configured behaviors.
pub struct Dispatcher {
    pipelines: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("request_types", &self.pipelines.len())
            .finish()
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Whether exactly one handler is registered for `R`.
    pub fn handles<R: Request>(&self) -> bool {
        self.pipeline::<R>()
            .is_some_and(|p| p.resolve_handler().is_ok())
    }

    /// Number of behaviors wrapping the handler of `R` (0 when unregistered).
    pub fn chain_len<R: Request>(&self) -> usize {
        self.pipeline::<R>().map_or(0, |p| p.behaviors.len())
    }

    /// Dispatch a request through its behavior chain to its handler.
    ///
    /// ## Errors
    ///
    /// - `HandlerNotFound` / `AmbiguousHandler`: registration defect, nothing ran
    /// - `ValidationFailed`: a validator rejected the request, the handler never ran
    /// - anything the handler returns (`NotFound`, `Persistence`, `Canceled`)
    pub async fn send<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> PipelineResult<R::Response> {
        let handler = self
            .pipeline::<R>()
            .ok_or(PipelineError::HandlerNotFound(R::name()))
            .and_then(|pipeline| pipeline.resolve_handler().map(|h| (pipeline, h)));

        let (pipeline, handler) = match handler {
            Ok(found) => found,
            Err(e) => {
                error!(request = R::name(), error = %e, "request dispatch misconfigured");
                return Err(e);
            }
        };

        let chain = pipeline.compose(handler, &request, cancel);
        chain().await
    }

    fn pipeline<R: Request>(&self) -> Option<&Pipeline<R>> {
        self.pipelines
            .get(&TypeId::of::<R>())
            .and_then(|p| p.downcast_ref::<Pipeline<R>>())
    }
}
