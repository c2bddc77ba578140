// ABOUTME: Typed environment-property resolution with layered default casting
// ABOUTME: Property descriptors declare key, optional default and required flag; values cast to a fixed set of types

mod caster;
mod source;

use std::any::Any;

use thiserror::Error;

pub use source::{ProcessEnvSource, PropertySource};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("Missing required property: {key}")]
    MissingRequiredProperty { key: String },

    #[error("Unsupported property type {requested} for key {key}")]
    UnsupportedType { key: String, requested: &'static str },

    #[error("Invalid value '{value}' for property {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Descriptor of a single configuration property: its key, an optional
/// declared default and whether resolution may come back empty.
///
/// Descriptors are plain values, usually declared as module-level consts next
/// to the code that consumes them:
///
/// ```
/// use jmpsl_core::env::Property;
///
/// const OTA_LENGTH: Property = Property::with_default("jmpsl.security.ota.length", "10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    key: &'static str,
    default_value: Option<&'static str>,
    required: bool,
}

impl Property {
    /// A property that must be present in the source (no default).
    pub const fn required(key: &'static str) -> Self {
        Self {
            key,
            default_value: None,
            required: true,
        }
    }

    /// A property that may be absent; resolution then yields `None`.
    pub const fn optional(key: &'static str) -> Self {
        Self {
            key,
            default_value: None,
            required: false,
        }
    }

    /// A property with a declared default, applied when the source has no
    /// value for the key. The default string must parse as the target type.
    pub const fn with_default(key: &'static str, default_value: &'static str) -> Self {
        Self {
            key,
            default_value: Some(default_value),
            required: false,
        }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Resolve the property as `T`, allowing absence.
    ///
    /// The cast lookup happens before the source lookup, so an unsupported
    /// target type fails with [`EnvError::UnsupportedType`] whether or not a
    /// value is present. A present value (or, failing that, the declared
    /// default) is parsed with the matching caster; absence of both is an
    /// error only for required properties.
    pub fn resolve_optional<T: Any>(&self, source: &dyn PropertySource) -> Result<Option<T>, EnvError> {
        let entry = caster::entry_for::<T>().ok_or_else(|| EnvError::UnsupportedType {
            key: self.key.to_string(),
            requested: std::any::type_name::<T>(),
        })?;
        let raw = match source.get_raw(self.key) {
            Some(raw) => raw,
            None => match self.default_value {
                Some(default_value) => default_value.to_owned(),
                None if self.required => {
                    return Err(EnvError::MissingRequiredProperty {
                        key: self.key.to_string(),
                    })
                }
                None => return Ok(None),
            },
        };
        let value = entry.parse_as::<T>(&raw).ok_or_else(|| EnvError::InvalidValue {
            key: self.key.to_string(),
            value: raw,
            expected: entry.type_tag(),
        })?;
        Ok(Some(value))
    }

    /// Resolve the property as `T`, treating absence as
    /// [`EnvError::MissingRequiredProperty`].
    pub fn resolve<T: Any>(&self, source: &dyn PropertySource) -> Result<T, EnvError> {
        self.resolve_optional(source)?.ok_or_else(|| EnvError::MissingRequiredProperty {
            key: self.key.to_string(),
        })
    }
}
