//! Cooperative cancellation at persistence suspension points.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use userhub_core::{PipelineError, PipelineResult, StoreError};

/// Run one persistence call under the request's cancellation signal.
///
/// - already cancelled: the call is not started, `Canceled` is returned;
/// - cancelled while in flight: the call future is dropped, `Canceled` is
///   returned (no partial response);
/// - otherwise the store result is surfaced unchanged (no retry).
pub async fn guarded<T, F>(cancel: &CancellationToken, operation: F) -> PipelineResult<T>
where
    F: Future<Output = Result<T, StoreError>>,
{
    if cancel.is_cancelled() {
        return Err(PipelineError::Canceled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PipelineError::Canceled),
        result = operation => result.map_err(PipelineError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn passes_through_store_results() {
        let cancel = CancellationToken::new();
        let ok = guarded(&cancel, async { Ok::<_, StoreError>(5) }).await;
        assert_eq!(ok, Ok(5));

        let err = guarded(&cancel, async { Err::<u8, _>(StoreError::backend("boom")) }).await;
        assert_eq!(
            err,
            Err(PipelineError::Persistence(StoreError::Backend("boom".to_string())))
        );
    }

    #[tokio::test]
    async fn does_not_start_when_already_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let started = Arc::new(AtomicBool::new(false));
        let flag = started.clone();
        let result = guarded(&cancel, async move {
            flag.store(true, Ordering::SeqCst);
            Ok::<_, StoreError>(())
        })
        .await;

        assert_eq!(result, Err(PipelineError::Canceled));
        assert!(!started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn abandons_in_flight_call_on_cancel() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result = guarded(&cancel, async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, StoreError>(())
        })
        .await;

        assert_eq!(result, Err(PipelineError::Canceled));
    }
}
