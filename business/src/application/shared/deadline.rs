use std::future::Future;
use std::time::Duration;

use crate::domain::errors::RepositoryError;

pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounds a gateway-bound operation. An elapsed deadline surfaces as
/// `RepositoryError::Timeout` converted into the caller's error type; the
/// remote write may still land.
pub async fn with_deadline<T, E, F>(limit: Duration, future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<RepositoryError>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(E::from(RepositoryError::Timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::errors::CartError;

    #[tokio::test]
    async fn should_pass_through_result_within_deadline() {
        let result: Result<u32, CartError> =
            with_deadline(Duration::from_secs(1), async { Ok(7) }).await;

        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn should_report_timeout_when_deadline_elapses() {
        let result: Result<u32, CartError> = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(7)
        })
        .await;

        assert!(matches!(
            result.unwrap_err(),
            CartError::Repository(RepositoryError::Timeout)
        ));
    }
}
