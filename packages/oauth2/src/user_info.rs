// ABOUTME: Uniform user-info view over supplier-specific OAuth2 attribute payloads
// ABOUTME: One adapter per supplier plus a factory selecting the right one

use serde_json::Value;

use crate::error::OAuth2Error;
use crate::supplier::OAuth2Supplier;

/// Uniform view of the user attributes returned by an OAuth2 supplier.
/// Every accessor is optional: suppliers omit fields depending on scopes and
/// account settings.
pub trait OAuth2UserInfo {
    fn attributes(&self) -> &Value;

    fn id(&self) -> Option<String>;
    fn username(&self) -> Option<String>;
    fn email(&self) -> Option<String>;
    fn image_url(&self) -> Option<String>;
}

/// Select the adapter for a supplier's attribute payload. Suppliers without
/// an adapter (`Local`) are rejected, matching an attempted login via an
/// unsupported supplier.
pub fn user_info_for(
    supplier: OAuth2Supplier,
    attributes: Value,
) -> Result<Box<dyn OAuth2UserInfo>, OAuth2Error> {
    match supplier {
        OAuth2Supplier::Google => Ok(Box::new(GoogleUserInfo { attributes })),
        OAuth2Supplier::Facebook => Ok(Box::new(FacebookUserInfo { attributes })),
        OAuth2Supplier::Github => Ok(Box::new(GithubUserInfo { attributes })),
        OAuth2Supplier::LinkedIn => Ok(Box::new(LinkedInUserInfo { attributes })),
        OAuth2Supplier::Local => {
            tracing::error!(supplier = %supplier, "attempt to login via unsupported supplier");
            Err(OAuth2Error::UnsupportedSupplier(supplier.to_string()))
        }
    }
}

fn string_attribute(attributes: &Value, key: &str) -> Option<String> {
    attributes.get(key).and_then(Value::as_str).map(str::to_string)
}

pub struct GoogleUserInfo {
    attributes: Value,
}

impl OAuth2UserInfo for GoogleUserInfo {
    fn attributes(&self) -> &Value {
        &self.attributes
    }

    fn id(&self) -> Option<String> {
        string_attribute(&self.attributes, "sub")
    }

    fn username(&self) -> Option<String> {
        string_attribute(&self.attributes, "name")
    }

    fn email(&self) -> Option<String> {
        string_attribute(&self.attributes, "email")
    }

    fn image_url(&self) -> Option<String> {
        string_attribute(&self.attributes, "picture")
    }
}

pub struct FacebookUserInfo {
    attributes: Value,
}

impl OAuth2UserInfo for FacebookUserInfo {
    fn attributes(&self) -> &Value {
        &self.attributes
    }

    fn id(&self) -> Option<String> {
        string_attribute(&self.attributes, "id")
    }

    fn username(&self) -> Option<String> {
        string_attribute(&self.attributes, "name")
    }

    fn email(&self) -> Option<String> {
        string_attribute(&self.attributes, "email")
    }

    // Facebook nests the image under picture.data.url; a missing or
    // malformed object resolves to None.
    fn image_url(&self) -> Option<String> {
        self.attributes
            .get("picture")?
            .get("data")?
            .get("url")?
            .as_str()
            .map(str::to_string)
    }
}

pub struct GithubUserInfo {
    attributes: Value,
}

impl OAuth2UserInfo for GithubUserInfo {
    fn attributes(&self) -> &Value {
        &self.attributes
    }

    // GitHub sends the id as a number.
    fn id(&self) -> Option<String> {
        self.attributes.get("id").and_then(Value::as_i64).map(|id| id.to_string())
    }

    fn username(&self) -> Option<String> {
        string_attribute(&self.attributes, "name")
    }

    fn email(&self) -> Option<String> {
        string_attribute(&self.attributes, "email")
    }

    fn image_url(&self) -> Option<String> {
        string_attribute(&self.attributes, "avatar_url")
    }
}

pub struct LinkedInUserInfo {
    attributes: Value,
}

impl OAuth2UserInfo for LinkedInUserInfo {
    fn attributes(&self) -> &Value {
        &self.attributes
    }

    fn id(&self) -> Option<String> {
        string_attribute(&self.attributes, "id")
    }

    fn username(&self) -> Option<String> {
        let first = string_attribute(&self.attributes, "localizedFirstName")?;
        let last = string_attribute(&self.attributes, "localizedLastName")?;
        Some(format!("{first} {last}"))
    }

    fn email(&self) -> Option<String> {
        string_attribute(&self.attributes, "emailAddress")
    }

    fn image_url(&self) -> Option<String> {
        string_attribute(&self.attributes, "pictureUrl")
    }
}
