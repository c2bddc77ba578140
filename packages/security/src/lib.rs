// ABOUTME: Security utilities for jmpsl applications
// ABOUTME: One-time-access tokens plus JWT generation and validation

pub mod jwt;
pub mod ota;

pub use jwt::{JwtConfig, JwtService, JwtValidationType, TokenValidation};
pub use ota::OtaTokenGenerator;
