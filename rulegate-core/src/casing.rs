// Key casing strategies

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

/// Casing convention applied to data store keys.
///
/// Lookups and inserts both pass through the convention, so two differently
/// cased spellings of the same logical key resolve to the same entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyCase {
    /// `some_key` reads and stores as `someKey` (the default)
    #[default]
    Camel,
    /// `someKey` reads and stores as `some_key`
    Snake,
    /// Keys are used exactly as given
    Verbatim,
}

impl KeyCase {
    /// Convert a key through this convention.
    pub fn convert(&self, key: &str) -> String {
        match self {
            KeyCase::Camel => key.to_lower_camel_case(),
            KeyCase::Snake => key.to_snake_case(),
            KeyCase::Verbatim => key.to_string(),
        }
    }
}

/// StudlyCase form of a rule name as it appears in failed-rule records
/// (`min` becomes `Min`, `alpha_num` becomes `AlphaNum`).
pub fn studly(name: &str) -> String {
    name.to_pascal_case()
}
