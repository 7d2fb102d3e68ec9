use ranch_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The remote backend rejected or failed the operation.
    #[error("Backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
