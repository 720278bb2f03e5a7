use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// JSON body extractor that never rejects.
///
/// A body that is empty, not declared as JSON, not parseable, or not a JSON
/// object is read as `{}`, so every field of `T` falls back to its default.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(Self(T::default()));
        }
        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(error = %e, "unreadable request body treated as empty");
                return Ok(Self(T::default()));
            }
        };
        Ok(Self(parse_object(&bytes)))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn parse_object<T: DeserializeOwned + Default>(bytes: &[u8]) -> T {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        Ok(_) => T::default(),
        Err(e) => {
            debug!(error = %e, "malformed JSON body treated as empty");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use models::ParentFields;
    use serde_json::json;

    #[test]
    fn json_content_types() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        assert!(is_json(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"));
        assert!(is_json(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json(&headers));
    }

    #[test]
    fn non_objects_read_as_empty() {
        let fields: ParentFields = parse_object(br#"["A","a@x.com"]"#);
        assert_eq!(fields, ParentFields::default());
        let fields: ParentFields = parse_object(b"{oops");
        assert_eq!(fields, ParentFields::default());
        let fields: ParentFields = parse_object(br#"{"name":"A","extra":1}"#);
        assert_eq!(fields.name, Some(json!("A")));
    }
}
