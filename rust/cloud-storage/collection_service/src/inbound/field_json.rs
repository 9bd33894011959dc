use axum::{
    Json,
    extract::{FromRequest, Request},
};
use models_collection::api::{FieldErrors, messages};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::inbound::axum_router::CollectionHandlerErr;

/// A json request body whose failures are reported as [FieldErrors].
///
/// A value of the wrong type is keyed by the top level field it was submitted under.
/// A body that is not a json object at all is keyed by [FieldErrors::NON_FIELD_ERRORS].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for FieldJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CollectionHandlerErr;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                CollectionHandlerErr::Invalid(FieldErrors::from_iter([(
                    FieldErrors::NON_FIELD_ERRORS,
                    rejection.body_text(),
                )]))
            })?;

        decode(body).map(FieldJson).map_err(|errors| {
            tracing::debug!(%errors, "request body did not match its schema");
            CollectionHandlerErr::Invalid(errors)
        })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Every field of `T` is optional, so each submitted field can be checked on its own
/// to find which of them carry a value of the wrong type.
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, FieldErrors> {
    let fields = match body {
        Value::Object(fields) => fields,
        other => {
            return Err(FieldErrors::from_iter([(
                FieldErrors::NON_FIELD_ERRORS,
                messages::expected_object(kind(&other)),
            )]));
        }
    };

    let errors: FieldErrors = fields
        .iter()
        .filter_map(|(name, value)| {
            let single = Map::from_iter([(name.clone(), value.clone())]);
            serde_json::from_value::<T>(Value::Object(single))
                .err()
                .map(|e| (name.clone(), e.to_string()))
        })
        .collect();
    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        FieldErrors::from_iter([(FieldErrors::NON_FIELD_ERRORS, e.to_string())])
    })
}
