/// Crate-wide result type.
///
/// Adapters and use cases attach context with `anyhow::Context`; typed
/// failures are raised as [`DepSearchError`](crate::shared::error::DepSearchError)
/// and can be recovered with `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
