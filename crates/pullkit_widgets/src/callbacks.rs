//! Callback types injected into controllers

/// Caller-supplied action run once per entry into a loading state.
///
/// The handler only starts the work; the caller reports completion later
/// through `stop()` (or `set_exhausted()` for infinite scrolling). A panic
/// inside the handler propagates to whoever fed the controller, with the
/// loading state and its inset already applied.
pub type ActionHandler = Box<dyn FnMut() + Send>;

/// Presentation listener run on every real state change
pub type StateCallback<S> = Box<dyn FnMut(S) + Send>;
