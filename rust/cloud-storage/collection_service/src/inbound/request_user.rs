use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use thiserror::Error;

/// The header carrying the id of the user making the request
pub static USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Error)]
pub enum RequestUserErr {
    #[error("missing x-user-id header")]
    Missing,
    #[error("the x-user-id header was empty")]
    Empty,
}

impl IntoResponse for RequestUserErr {
    fn into_response(self) -> axum::response::Response {
        let msg = self.to_string();
        (StatusCode::UNAUTHORIZED, msg).into_response()
    }
}

/// The user a write is attributed to
#[derive(Debug, Clone, PartialEq)]
pub struct RequestUser(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestUser
where
    S: Send + Sync,
{
    type Rejection = RequestUserErr;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|header| header.to_str().ok())
            .ok_or(RequestUserErr::Missing)?
            .trim();

        if user.is_empty() {
            return Err(RequestUserErr::Empty);
        }

        Ok(RequestUser(user.to_string()))
    }
}
