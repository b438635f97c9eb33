use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use storage::models::{Caller, Role};
use uuid::Uuid;

use crate::error::WebError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Identity forwarded by the authentication gateway. A request without
/// `x-user-id` is anonymous; a missing role means `user`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentCaller(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentCaller
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_from_headers(&parts.headers).map(CurrentCaller)
    }
}

fn header<'h>(headers: &'h HeaderMap, name: &str) -> Result<Option<&'h str>, WebError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v.trim()).filter(|v| !v.is_empty()))
            .map_err(|_| WebError::BadRequest(format!("{name} is not valid text"))),
    }
}

fn caller_from_headers(headers: &HeaderMap) -> Result<Caller, WebError> {
    let Some(raw_id) = header(headers, USER_ID_HEADER)? else {
        return Ok(Caller::Anonymous);
    };

    let user_id = Uuid::parse_str(raw_id)
        .map_err(|_| WebError::BadRequest(format!("{USER_ID_HEADER} must be a UUID")))?;

    let role = match header(headers, USER_ROLE_HEADER)? {
        None => Role::User,
        Some(raw) => raw
            .parse()
            .map_err(|_| WebError::BadRequest(format!("{USER_ROLE_HEADER}: unknown role '{raw}'")))?,
    };

    Ok(Caller::Authenticated { user_id, role })
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_missing_user_id_is_anonymous() {
        let headers = HeaderMap::new();
        assert_eq!(caller_from_headers(&headers).unwrap(), Caller::Anonymous);
    }

    #[test]
    fn test_role_defaults_to_user() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());

        assert_eq!(caller_from_headers(&headers).unwrap(), Caller::user(id));
    }

    #[test]
    fn test_judge_role() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("Judge"));

        assert_eq!(caller_from_headers(&headers).unwrap(), Caller::judge(id));
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert!(caller_from_headers(&headers).is_err());

        headers.insert(
            USER_ID_HEADER,
            HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap(),
        );
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("superuser"));
        assert!(caller_from_headers(&headers).is_err());
    }
}
