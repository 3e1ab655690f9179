/// A typed operation descriptor with its parameters.
///
/// Requests are **transient** values: built per call by the caller (usually the
/// HTTP layer), handed to `Dispatcher::send`, and dropped once the response is
/// delivered. Each request type declares exactly one response type.
///
/// ## Design Constraints
///
/// Requests must be:
/// - **Send + Sync**: the chain borrows the request across `.await` points
/// - **'static**: requests own their data; resolution is keyed by `TypeId`
pub trait Request: core::fmt::Debug + Send + Sync + 'static {
    type Response: Send + 'static;

    /// Short type name used in logs and dispatch errors.
    fn name() -> &'static str
    where
        Self: Sized,
    {
        let full = core::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}
