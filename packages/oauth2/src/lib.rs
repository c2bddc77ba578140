// ABOUTME: OAuth2 utilities: credential supplier enum and user-info adapters
// ABOUTME: Maps provider-specific attribute payloads onto a uniform user-info view

pub mod error;
pub mod supplier;
pub mod user_info;

pub use error::OAuth2Error;
pub use supplier::OAuth2Supplier;
pub use user_info::{user_info_for, OAuth2UserInfo};
