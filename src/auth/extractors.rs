use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::Claims;
use crate::error::AppError;

/// Extracts the claims of the admin verified by `AdminAuth`.
///
/// Fails with `AppError::Unauthorized` on routes the middleware does not guard.
#[derive(Debug, Clone)]
pub struct AdminClaims(pub Claims);

impl FromRequest for AdminClaims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AdminClaims(claims))),
            None => {
                let err = AppError::Unauthorized(
                    "Admin claims not found in request. Ensure AdminAuth is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
