use std::future::Future;

use thiserror::Error;

pub use tokio_util::sync::CancellationToken;

/// Produced when a [CancellationToken] fires while an operation is suspended
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Operation was cancelled")]
pub struct Cancelled;

/// Drive `future` to completion unless `cancel` fires first.
///
/// A token that is already cancelled fails immediately without polling the
/// future at all. When no token is given the future simply runs to
/// completion. Work that the future committed before it was dropped is not
/// undone.
pub async fn cancellable<F>(
    cancel: Option<&CancellationToken>,
    future: F,
) -> Result<F::Output, Cancelled>
where
    F: Future,
{
    let Some(token) = cancel else {
        return Ok(future.await);
    };

    if token.is_cancelled() {
        return Err(Cancelled);
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Cancelled),
        output = future => Ok(output),
    }
}
