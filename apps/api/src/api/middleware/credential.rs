use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;

/// Optional model-provider credential for the JSON API
///
/// Usage:
/// ```rust,ignore
/// async fn handler(ProviderCredential(key): ProviderCredential) -> String {
///     key.unwrap_or_default()
/// }
/// ```
///
/// A missing header yields `None`; a header that is present but not a
/// bearer token is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredential(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for ProviderCredential
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            return Ok(ProviderCredential(None));
        };

        let header = value
            .to_str()
            .map_err(|_| ApiError::unauthorized("Authorization header is not valid text"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ApiError::unauthorized("Invalid authorization format. Use: Bearer <api key>")
            })?;

        Ok(ProviderCredential(Some(token.to_string())))
    }
}
