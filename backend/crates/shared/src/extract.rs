//! Request extractors shared by every router.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

/// JSON body extractor that rejects with a 400 problem document.
///
/// axum's own `Json` answers shape errors with 422 and a plain-text body;
/// every route here treats a body of the wrong shape as a bad request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body".to_string(),
        _ => format!("Invalid request body: {}", rejection.body_text()),
    };
    AppError::bad_request(message).with_source(rejection)
}
