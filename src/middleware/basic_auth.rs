//! HTTP Basic authentication → CurrentUser を extensions に入れる
//!
//! Flow:
//! - `Authorization: Basic base64(email:password)` をパースする
//! - email でユーザーを引き、パスワードを stored hash と照合する
//! - 成功時に `CurrentUser` を request extensions に格納する
//!
//! Every failure (missing header, unknown user, wrong password, store error)
//! collapses into the same 401 response. The concrete reason is only logged,
//! so the API gives no signal for enumerating accounts. Secrets and stored
//! hashes must never appear in the log output.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::api::extractors::CurrentUser;
use crate::error::AppError;
use crate::services::password;
use crate::state::AppState;

/// Require Basic authentication on every route already registered in
/// `router`. Uses `route_layer` so unmatched paths still fall through to a
/// plain 404 instead of a 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, authenticate_user))
}

/// Credentials carried by a Basic Authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub secret: String,
}

/// Decode `Authorization: Basic base64(name:secret)`.
///
/// Returns `None` for a missing or malformed header; the gate treats both
/// the same way. The payload is split at the FIRST colon, so the secret may
/// itself contain colons.
fn extract_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, payload) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = BASE64.decode(payload.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (name, secret) = decoded.split_once(':')?;

    Some(Credentials {
        name: name.to_string(),
        secret: secret.to_string(),
    })
}

async fn authenticate_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(credentials) = extract_credentials(req.headers()) else {
        tracing::warn!("auth header not found");
        return Err(AppError::Unauthorized);
    };

    // Case-sensitive exact match on the email as supplied.
    let user = match state.users.find_by_email(&credentials.name).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(email = %credentials.name, "user not found");
            return Err(AppError::Unauthorized);
        }
        Err(err) => {
            tracing::error!(error = ?err, "user lookup failed");
            return Err(AppError::Unauthorized);
        }
    };

    match password::verify(&credentials.secret, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(email = %user.email_address, "authentication failure");
            return Err(AppError::Unauthorized);
        }
        Err(err) => {
            tracing::error!(error = ?err, "password verification failed");
            return Err(AppError::Unauthorized);
        }
    }

    tracing::info!(email = %user.email_address, "authentication successful");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email_address: user.email_address,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(payload: &str) -> HeaderMap {
        headers_with_authorization(&format!("Basic {}", BASE64.encode(payload)))
    }

    #[test]
    fn parses_name_and_secret() {
        let credentials = extract_credentials(&basic("joe@smith.com:joepassword")).unwrap();
        assert_eq!(credentials.name, "joe@smith.com");
        assert_eq!(credentials.secret, "joepassword");
    }

    #[test]
    fn splits_at_first_colon_only() {
        let credentials = extract_credentials(&basic("joe@smith.com:pass:with:colons")).unwrap();
        assert_eq!(credentials.name, "joe@smith.com");
        assert_eq!(credentials.secret, "pass:with:colons");
    }

    #[test]
    fn allows_empty_secret() {
        let credentials = extract_credentials(&basic("joe@smith.com:")).unwrap();
        assert_eq!(credentials.secret, "");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let headers =
            headers_with_authorization(&format!("BASIC {}", BASE64.encode("a@b.com:pw")));
        assert!(extract_credentials(&headers).is_some());
    }

    #[test]
    fn absent_header_is_none() {
        assert!(extract_credentials(&HeaderMap::new()).is_none());
    }

    #[test]
    fn wrong_scheme_is_none() {
        let headers = headers_with_authorization("Bearer some-token");
        assert!(extract_credentials(&headers).is_none());
    }

    #[test]
    fn invalid_base64_is_none() {
        let headers = headers_with_authorization("Basic not-base64!!!");
        assert!(extract_credentials(&headers).is_none());
    }

    #[test]
    fn payload_without_colon_is_none() {
        assert!(extract_credentials(&basic("no-colon-here")).is_none());
    }

    #[test]
    fn non_utf8_payload_is_none() {
        let headers =
            headers_with_authorization(&format!("Basic {}", BASE64.encode([0xff, 0xfe, 0xfd])));
        assert!(extract_credentials(&headers).is_none());
    }
}
