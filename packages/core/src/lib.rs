// ABOUTME: Core utilities shared by all jmpsl packages
// ABOUTME: Typed environment properties, i18n messages, cookie helpers, string and random utilities

pub mod cookie;
pub mod env;
pub mod i18n;
pub mod rnd;
pub mod text;

// Re-export main types
pub use env::{EnvError, ProcessEnvSource, Property, PropertySource};
pub use i18n::{Locale, MessageRegistry};
