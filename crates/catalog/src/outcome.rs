//! Result helpers shared by every backend client.
//!
//! Clients never propagate failures by panicking: [`safe`] is the adapter
//! that turns an `anyhow`-style fallible future (or a panic while polling
//! it) into an [`ApiResult`].

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::error::ApiError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Wrap a success value.
pub fn ok<T>(value: T) -> ApiResult<T> {
    Ok(value)
}

/// Wrap a failure.
pub fn err<T>(error: impl Into<ApiError>) -> ApiResult<T> {
    Err(error.into())
}

/// Run a fallible operation, converting every failure into `Err(ApiError)`.
pub async fn safe<T, F>(operation: F) -> ApiResult<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match AssertUnwindSafe(operation).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(error.into()),
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            tracing::error!(%message, "backend operation panicked");
            Err(ApiError::Unexpected { message })
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "operation panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValidationError;

    #[test]
    fn ok_and_err_build_variants() {
        assert_eq!(ok(5), Ok(5));
        let failed: ApiResult<()> = err(ApiError::BookNotFound { book_id: 2 });
        assert_eq!(failed, Err(ApiError::BookNotFound { book_id: 2 }));
    }

    #[tokio::test]
    async fn safe_passes_success_through() {
        let result = safe(async { Ok::<_, anyhow::Error>("done") }).await;
        assert_eq!(result, Ok("done"));
    }

    #[tokio::test]
    async fn safe_converts_errors() {
        let result: ApiResult<()> = safe(async {
            Err(ValidationError::new("$.title", "missing field `title`").into())
        })
        .await;

        assert_eq!(
            result,
            Err(ApiError::Validation {
                path: "$.title".to_string(),
                message: "missing field `title`".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn safe_converts_panics() {
        let result: ApiResult<u8> = safe(async {
            if true {
                panic!("socket exploded");
            }
            Ok(1)
        })
        .await;

        assert_eq!(
            result,
            Err(ApiError::Unexpected {
                message: "socket exploded".to_string()
            })
        );
    }
}
