use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, Query, Request};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;

use crate::error::Failure;
use crate::metrics::ERRORS_TOTAL;
use crate::models::Validate;
use crate::result::ResultEnvelope;

// failure plus the route it happened on
#[derive(Debug)]
pub struct RequestFailure {
    pub failure: Failure,
    pub path: String,
}

impl RequestFailure {
    pub fn new(failure: impl Into<Failure>, path: impl Into<String>) -> Self {
        Self {
            failure: failure.into(),
            path: path.into(),
        }
    }
}

impl IntoResponse for RequestFailure {
    fn into_response(self) -> Response {
        let classified = self.failure.classify();
        let error = classified.error;
        let status = error.http_status();

        match &classified.cause {
            Some(cause) => tracing::error!(
                kind = %error.kind(),
                path = %self.path,
                status = status.as_u16(),
                cause = %cause,
                "request failed: {}",
                error.message()
            ),
            None => tracing::error!(
                kind = %error.kind(),
                path = %self.path,
                status = status.as_u16(),
                "request failed: {}",
                error.message()
            ),
        }
        ERRORS_TOTAL.with_label_values(&[error.kind().as_str()]).inc();

        let envelope = match classified.details {
            Some(details) => ResultEnvelope::failure_with(details, &error, self.path),
            None => ResultEnvelope::failure(&error, self.path),
        };
        (status, Json(envelope)).into_response()
    }
}

/// Attaches the request path to a business-logic failure.
pub trait AtPath<T> {
    fn at(self, uri: &Uri) -> Result<T, RequestFailure>;
}

impl<T, E: Into<Failure>> AtPath<T> for Result<T, E> {
    fn at(self, uri: &Uri) -> Result<T, RequestFailure> {
        self.map_err(|err| RequestFailure::new(err, uri.path()))
    }
}

// JSON body, deserialized and validated into `T::Valid`
pub struct ValidJson<T: Validate>(pub T::Valid);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = RequestFailure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_owned();

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                RequestFailure::new(Failure::invalid_field("body", rejection.body_text()), &path)
            })?;

        value
            .validate()
            .map(Self)
            .map_err(|errors| RequestFailure::new(Failure::Invalid(errors), path))
    }
}

/// Maps a malformed query string to a validation failure.
pub fn query<T>(query: Result<Query<T>, QueryRejection>, uri: &Uri) -> Result<T, RequestFailure> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| {
            RequestFailure::new(Failure::invalid_field("query", rejection.body_text()), uri.path())
        })
}
