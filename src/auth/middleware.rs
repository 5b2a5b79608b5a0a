use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::{token::verify_token, AuthConfig};
use crate::error::AppError;

/// Guards admin routes: requires a valid bearer token whose role is `admin`.
///
/// Verified claims are stored in the request extensions for `AdminClaims`.
pub struct AdminAuth;

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AdminAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthService { service }))
    }
}

pub struct AdminAuthService<S> {
    service: S,
}

impl<S> AdminAuthService<S> {
    fn authorize(req: &ServiceRequest) -> Result<(), AppError> {
        let secret = req
            .app_data::<web::Data<AuthConfig>>()
            .map(|config| config.jwt_secret.clone())
            .ok_or_else(|| AppError::InternalServerError("Authentication is not configured".into()))?;

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

        let claims = verify_token(token, &secret)?;
        if !claims.is_admin() {
            log::warn!("user {} attempted an admin operation on {}", claims.sub, req.path());
            return Err(AppError::Forbidden("Admin access required".into()));
        }
        req.extensions_mut().insert(claims);
        Ok(())
    }
}

impl<S, B> Service<ServiceRequest> for AdminAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match Self::authorize(&req) {
            Ok(()) => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(app_err) => {
                // Answer directly so the rejection renders as the usual JSON envelope.
                let (request, _payload) = req.into_parts();
                let response = HttpResponse::from_error(app_err).map_into_right_body();
                Box::pin(async move { Ok(ServiceResponse::new(request, response)) })
            }
        }
    }
}
