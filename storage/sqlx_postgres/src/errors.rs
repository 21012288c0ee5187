use anyhow::anyhow;
use locations::LocationStoreError;

const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Transport level failures become `BackendUnavailable`, everything else is an
/// internal error. Missing rows and uniqueness are handled by the callers.
pub(crate) fn into_store_error(err: sqlx::Error, context: &'static str) -> LocationStoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Configuration(_) => {
            LocationStoreError::BackendUnavailable(anyhow!(err).context(context))
        }
        err => LocationStoreError::Internal(anyhow!(err).context(context)),
    }
}

pub(crate) trait StoreContext<T> {
    fn store_context(self, context: &'static str) -> Result<T, LocationStoreError>;
}

impl<T> StoreContext<T> for Result<T, sqlx::Error> {
    fn store_context(self, context: &'static str) -> Result<T, LocationStoreError> {
        self.map_err(|err| into_store_error(err, context))
    }
}
