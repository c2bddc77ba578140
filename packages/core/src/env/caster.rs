// ABOUTME: Cast table mapping supported property types to parse functions
// ABOUTME: One entry per supported primitive, looked up by exact TypeId match

use std::any::{Any, TypeId};
use std::sync::OnceLock;

/// A single supported target type: its identity, a human-readable tag used in
/// error messages, and the parse function turning a raw string into a boxed
/// value of that type.
pub(crate) struct CastEntry {
    type_id: TypeId,
    type_tag: &'static str,
    parse: fn(&str) -> Option<Box<dyn Any>>,
}

impl CastEntry {
    pub(crate) fn type_tag(&self) -> &'static str {
        self.type_tag
    }

    /// Parse a raw string into `T`. Returns `None` when the raw value does not
    /// parse as the entry's type. Callers must only invoke this on the entry
    /// whose `TypeId` matches `T`.
    pub(crate) fn parse_as<T: Any>(&self, raw: &str) -> Option<T> {
        (self.parse)(raw).and_then(|boxed| boxed.downcast::<T>().ok()).map(|boxed| *boxed)
    }
}

fn entry<T: Any>(type_tag: &'static str, parse: fn(&str) -> Option<Box<dyn Any>>) -> CastEntry {
    CastEntry {
        type_id: TypeId::of::<T>(),
        type_tag,
        parse,
    }
}

fn cast_table() -> &'static [CastEntry] {
    static TABLE: OnceLock<Vec<CastEntry>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            entry::<String>("string", |raw| Some(Box::new(raw.to_owned()))),
            entry::<i32>("int", |raw| raw.parse::<i32>().ok().map(|v| Box::new(v) as Box<dyn Any>)),
            entry::<bool>("bool", |raw| parse_bool(raw).map(|v| Box::new(v) as Box<dyn Any>)),
            entry::<f64>("double", |raw| raw.parse::<f64>().ok().map(|v| Box::new(v) as Box<dyn Any>)),
            entry::<f32>("float", |raw| raw.parse::<f32>().ok().map(|v| Box::new(v) as Box<dyn Any>)),
            entry::<char>("char", |raw| raw.chars().next().map(|v| Box::new(v) as Box<dyn Any>)),
            entry::<i8>("byte", |raw| raw.parse::<i8>().ok().map(|v| Box::new(v) as Box<dyn Any>)),
            entry::<i64>("long", |raw| raw.parse::<i64>().ok().map(|v| Box::new(v) as Box<dyn Any>)),
        ]
    })
}

// Accepts only explicit true/false so typos surface as errors instead of
// silently resolving to false.
fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Find the cast entry for `T`, or `None` when `T` is not one of the
/// supported property types.
pub(crate) fn entry_for<T: Any>() -> Option<&'static CastEntry> {
    let wanted = TypeId::of::<T>();
    cast_table().iter().find(|entry| entry.type_id == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_type_has_exactly_one_entry() {
        let table = cast_table();
        assert_eq!(table.len(), 8);
        for entry in table {
            let same = table.iter().filter(|other| other.type_id == entry.type_id).count();
            assert_eq!(same, 1, "duplicate cast entry for {}", entry.type_tag);
        }
    }

    #[test]
    fn test_unsupported_type_has_no_entry() {
        assert!(entry_for::<u32>().is_none());
        assert!(entry_for::<Vec<String>>().is_none());
    }

    #[test]
    fn test_char_cast_takes_first_character() {
        let entry = entry_for::<char>().unwrap();
        assert_eq!(entry.parse_as::<char>("-abc"), Some('-'));
        assert_eq!(entry.parse_as::<char>(""), None);
    }

    #[test]
    fn test_bool_cast_is_case_insensitive_and_strict() {
        let entry = entry_for::<bool>().unwrap();
        assert_eq!(entry.parse_as::<bool>("TRUE"), Some(true));
        assert_eq!(entry.parse_as::<bool>("false"), Some(false));
        assert_eq!(entry.parse_as::<bool>("yes"), None);
    }
}
