/// Request body extraction for write routes
use crate::error::ServerError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use mockdb_core::UserPayload;

/// JSON object body of a create or update request
///
/// Bodies not declared as JSON, and empty JSON bodies, read as an empty
/// object. Malformed JSON and non-object JSON fail with
/// [`ServerError::Syntax`].
#[derive(Debug)]
pub struct PayloadBody(pub UserPayload);

fn is_json_content_type(value: &str) -> bool {
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[async_trait]
impl<S> FromRequest<S> for PayloadBody
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);

        if !declared_json {
            return Ok(Self(UserPayload::new()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ServerError::Syntax(e.body_text()))?;

        if bytes.is_empty() {
            return Ok(Self(UserPayload::new()));
        }

        let payload = serde_json::from_slice::<UserPayload>(&bytes)
            .map_err(|e| ServerError::Syntax(format!("Invalid JSON body: {}", e)))?;

        Ok(Self(payload))
    }
}
