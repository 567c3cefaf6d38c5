//! Connection pool alias and blocking-work helper shared by the adapters.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by ticket adapters.
pub type TicketPgPool = Pool<ConnectionManager<PgConnection>>;

/// Error types that can absorb pool and runtime failures.
pub(super) trait PersistenceFailure: Sized {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

/// Runs `f` with a pooled connection on the blocking thread pool.
pub(super) async fn with_connection<F, T, E>(pool: &TicketPgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: PersistenceFailure + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(E::from_failure)?;
        f(&mut connection)
    })
    .await
    .map_err(E::from_failure)?
}
