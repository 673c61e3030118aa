use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    error::AppError,
    utils::jwt::{self, Claims},
};

/// Server-side authorization gate for mutating handlers. Any client-side
/// redirect guard is UX only; every protected handler takes this extractor
/// and re-verifies the bearer token and admin role itself.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub claims: Claims,
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("No autorizado".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Formato de token inválido".to_string()))?;

        let claims = jwt::verify_token(token)?;

        if claims.role != "admin" {
            return Err(AppError::Forbidden(
                "Se requiere acceso de administrador".to_string(),
            ));
        }

        Ok(AdminSession { claims })
    }
}
