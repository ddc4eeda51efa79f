use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "admin123")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ScanForm {
    #[schema(example = "R1")]
    pub roll: String,
    #[schema(example = "Alice")]
    pub name: String,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScanQuery {
    /// Expiry label carried by the QR code, `HH:MM`
    #[param(example = "09:42")]
    pub exp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin username
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}
