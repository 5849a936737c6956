/// Bearer-token middleware: validates the token from the external identity
/// provider and adds the verified principal to request extensions
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::error::AppError;
use crate::security::jwt;

/// Verified principal. Only this middleware constructs one; handlers
/// receive it via extraction and trust it completely.
#[derive(Debug, Clone)]
pub struct Principal {
    pub identity: String,
    pub email: String,
}

/// Authentication middleware factory
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            // Extract headers before any mutable access to extensions
            let auth_header = match req.headers().get("Authorization") {
                Some(header) => match header.to_str() {
                    Ok(h) => h.to_string(),
                    Err(_) => {
                        return Err(
                            AppError::Authentication("Invalid Authorization header".into()).into()
                        );
                    }
                },
                None => {
                    return Err(
                        AppError::Authentication("Missing Authorization header".into()).into()
                    );
                }
            };

            let token = match auth_header.strip_prefix("Bearer ") {
                Some(t) => t,
                None => {
                    return Err(AppError::Authentication(
                        "Invalid Authorization scheme, expected Bearer".into(),
                    )
                    .into());
                }
            };

            let principal = match jwt::validate_token(token) {
                Ok(token_data) => Principal {
                    identity: token_data.claims.sub,
                    email: token_data.claims.email,
                },
                Err(e) => {
                    tracing::debug!("Token validation failed: {}", e);
                    return Err(
                        AppError::Authentication("Invalid or expired token".into()).into()
                    );
                }
            };

            req.extensions_mut().insert(principal);

            let res = service.call(req).await?;
            Ok(res)
        })
    }
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Principal>().cloned() {
            Some(principal) => ready(Ok(principal)),
            None => ready(Err(AppError::Authentication(
                "Principal missing in request extensions".into(),
            )
            .into())),
        }
    }
}
