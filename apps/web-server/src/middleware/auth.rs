//! Authentication extractors.
//!
//! [`Identity`] is the strict bearer-token extractor used by the JSON auth
//! endpoints and answers `401` when no valid token is present.
//! [`CurrentUser`] guards the authoring views: anonymous requests are sent to
//! the login entry point with a `next` parameter instead of receiving an error.

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header, web};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use yatube_core::domain::User;
use yatube_core::ports::{AuthError, BaseRepository, TokenClaims, TokenService};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Path of the authentication entry point.
pub const LOGIN_URL: &str = "/auth/login/";

/// Characters escaped in the `next` query value. Path separators stay readable.
const NEXT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Authenticated identity taken from the bearer token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Decode the `Authorization: Bearer <token>` header.
fn bearer_claims(req: &HttpRequest) -> Result<TokenClaims, AuthError> {
    let token_service = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or_else(|| {
            tracing::error!("TokenService not found in app data");
            AuthError::InvalidToken("Server configuration error".to_string())
        })?;

    let auth_str = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    token_service.validate_token(token)
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        use yatube_shared::ErrorResponse;

        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidCredentials => ErrorResponse::unauthorized(),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            bearer_claims(req)
                .map(Identity::from)
                .map_err(AuthenticationError),
        )
    }
}

/// Redirect to the login entry point, remembering where the user was going.
#[derive(Debug)]
pub struct LoginRedirect {
    pub next: String,
}

impl LoginRedirect {
    pub fn location(&self) -> String {
        format!(
            "{}?next={}",
            LOGIN_URL,
            utf8_percent_encode(&self.next, NEXT_ESCAPE)
        )
    }
}

impl std::fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "login required for {}", self.next)
    }
}

impl actix_web::ResponseError for LoginRedirect {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location()))
            .finish()
    }
}

/// The logged-in user, loaded from the repository.
///
/// A missing, invalid or expired token, or a token for a user that no longer
/// exists, all count as anonymous. Repository failures surface as `500`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let redirect = LoginRedirect {
            next: req.path().to_string(),
        };

        let claims = match bearer_claims(req) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    path = %redirect.next,
                    "Anonymous request to login-only view"
                );
                return Box::pin(ready(Err(redirect.into())));
            }
        };

        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            tracing::error!("AppState not found in app data");
            return Box::pin(ready(Err(
                AppError::Internal("Server configuration error".to_string()).into(),
            )));
        };

        Box::pin(async move {
            match state.users.find_by_id(claims.user_id).await {
                Ok(Some(user)) => Ok(CurrentUser(user)),
                Ok(None) => {
                    tracing::warn!(user_id = %claims.user_id, "Token for unknown user");
                    Err(redirect.into())
                }
                Err(e) => Err(AppError::from(e).into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_keeps_next() {
        let redirect = LoginRedirect {
            next: "/posts/3/edit/".to_string(),
        };

        assert_eq!(redirect.location(), "/auth/login/?next=/posts/3/edit/");
    }

    #[test]
    fn test_login_redirect_encodes_next() {
        let redirect = LoginRedirect {
            next: "/group/a b/?page=2&x=#top".to_string(),
        };

        assert_eq!(
            redirect.location(),
            "/auth/login/?next=/group/a%20b/%3Fpage%3D2%26x%3D%23top"
        );
    }
}
