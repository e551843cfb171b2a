//! Transform categories.

use serde::{Deserialize, Serialize};

/// The four stages of a field's transform chain.
///
/// Each category has its own registry, so the same name may mean different
/// things in different categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// String to string clean-up applied before conversion.
    PreProcessor,
    /// Turns the raw string into a typed value. Exactly one per field.
    Converter,
    /// Checks a converted value and returns it unchanged.
    Validator,
    /// Reshapes a value once the rest of the chain succeeded.
    PostProcessor,
}

impl Category {
    /// All categories in chain order.
    pub const ALL: [Category; 4] = [
        Category::PreProcessor,
        Category::Converter,
        Category::Validator,
        Category::PostProcessor,
    ];

    /// Singular label used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PreProcessor => "pre-processor",
            Category::Converter => "converter",
            Category::Validator => "validator",
            Category::PostProcessor => "post-processor",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
