//! Open transform registries.
//!
//! Each [`Category`] has its own [`TransformRegistry`] mapping a name to a
//! builder. A [`TransformCatalog`] bundles the four registries; the built-in
//! catalog is a plain value, so callers that need extra transforms clone or
//! extend it without touching this crate.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use magicparse_model::{Category, ConfigError, Parameters, TransformSpec};

use crate::converters::{
    DateConverter, DateTimeConverter, DecimalConverter, IntConverter, StrConverter,
};
use crate::post_processors::{Divide, Round};
use crate::pre_processors::{LeftPadZeroes, LeftStrip, Map, RegexReplace, Replace, StripWhitespaces};
use crate::transform::{Configurable, Transform};
use crate::validators::{GreaterThan, RegexMatches};

/// Builds a transform from its optional parameters.
pub type TransformBuilder = Arc<
    dyn Fn(Option<&Parameters>) -> magicparse_model::Result<Box<dyn Transform>> + Send + Sync,
>;

/// Name to builder mapping for one category.
#[derive(Clone)]
pub struct TransformRegistry {
    category: Category,
    builders: HashMap<String, TransformBuilder>,
}

impl TransformRegistry {
    /// Create an empty registry.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            builders: HashMap::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Registers a builder under `name`.
    ///
    /// If a builder is already registered under that name, it is replaced
    /// and the previous one is returned.
    pub fn register<F>(&mut self, name: impl Into<String>, builder: F) -> Option<TransformBuilder>
    where
        F: Fn(Option<&Parameters>) -> magicparse_model::Result<Box<dyn Transform>>
            + Send
            + Sync
            + 'static,
    {
        self.builders.insert(name.into(), Arc::new(builder))
    }

    /// Registers a [`Configurable`] transform under its own name.
    pub fn register_configurable<T: Configurable>(&mut self) -> Option<TransformBuilder> {
        let category = self.category;
        self.register(T::NAME, move |parameters| {
            build_configurable::<T>(category, parameters)
        })
    }

    /// Builds the transform described by `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTransform`] if the name is not
    /// registered, or whatever the builder reports for bad parameters.
    pub fn build(&self, spec: &TransformSpec) -> magicparse_model::Result<Box<dyn Transform>> {
        let builder = self
            .builders
            .get(&spec.name)
            .ok_or_else(|| ConfigError::UnknownTransform {
                category: self.category,
                name: spec.name.clone(),
            })?;
        builder(spec.parameters.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("category", &self.category)
            .field("names", &self.names())
            .finish()
    }
}

fn build_configurable<T: Configurable>(
    category: Category,
    parameters: Option<&Parameters>,
) -> magicparse_model::Result<Box<dyn Transform>> {
    let invalid = |message: String| ConfigError::InvalidParameters {
        category,
        name: T::NAME.to_string(),
        message,
    };
    let document = serde_json::Value::Object(parameters.cloned().unwrap_or_default());
    let parameters: T::Parameters =
        serde_json::from_value(document).map_err(|e| invalid(e.to_string()))?;
    let transform = T::from_parameters(parameters).map_err(invalid)?;
    Ok(Box::new(transform))
}

/// The four registries a schema builds its fields from.
#[derive(Debug, Clone)]
pub struct TransformCatalog {
    pub pre_processors: TransformRegistry,
    pub converters: TransformRegistry,
    pub validators: TransformRegistry,
    pub post_processors: TransformRegistry,
}

impl TransformCatalog {
    /// A catalog with no transforms at all.
    pub fn empty() -> Self {
        Self {
            pre_processors: TransformRegistry::new(Category::PreProcessor),
            converters: TransformRegistry::new(Category::Converter),
            validators: TransformRegistry::new(Category::Validator),
            post_processors: TransformRegistry::new(Category::PostProcessor),
        }
    }

    /// A catalog with every built-in transform registered.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();

        catalog.pre_processors.register_configurable::<StripWhitespaces>();
        catalog.pre_processors.register_configurable::<LeftStrip>();
        catalog.pre_processors.register_configurable::<LeftPadZeroes>();
        catalog.pre_processors.register_configurable::<Replace>();
        catalog.pre_processors.register_configurable::<RegexReplace>();
        catalog.pre_processors.register_configurable::<Map>();

        catalog.converters.register_configurable::<StrConverter>();
        catalog.converters.register_configurable::<IntConverter>();
        catalog.converters.register_configurable::<DecimalConverter>();
        catalog.converters.register_configurable::<DateConverter>();
        catalog.converters.register_configurable::<DateTimeConverter>();

        catalog.validators.register_configurable::<RegexMatches>();
        catalog.validators.register_configurable::<GreaterThan>();

        catalog.post_processors.register_configurable::<Divide>();
        catalog.post_processors.register_configurable::<Round>();

        catalog
    }

    /// The registry for a category.
    pub fn registry(&self, category: Category) -> &TransformRegistry {
        match category {
            Category::PreProcessor => &self.pre_processors,
            Category::Converter => &self.converters,
            Category::Validator => &self.validators,
            Category::PostProcessor => &self.post_processors,
        }
    }

    /// Mutable access for registration.
    pub fn registry_mut(&mut self, category: Category) -> &mut TransformRegistry {
        match category {
            Category::PreProcessor => &mut self.pre_processors,
            Category::Converter => &mut self.converters,
            Category::Validator => &mut self.validators,
            Category::PostProcessor => &mut self.post_processors,
        }
    }

    /// Builds a transform from the registry of `category`.
    pub fn build(
        &self,
        category: Category,
        spec: &TransformSpec,
    ) -> magicparse_model::Result<Box<dyn Transform>> {
        self.registry(category).build(spec)
    }
}

impl Default for TransformCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransformError;
    use magicparse_model::Value;
    use serde_json::json;

    #[derive(Debug)]
    struct Shout;

    impl Transform for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn apply(&self, value: Value) -> crate::Result<Value> {
            match value {
                Value::Str(s) => Ok(Value::Str(s.to_uppercase())),
                _ => Err(TransformError::new("cannot shout")),
            }
        }
    }

    #[test]
    fn test_builtin_names() {
        let catalog = TransformCatalog::builtin();
        assert_eq!(
            catalog.converters.names(),
            vec!["date", "datetime", "decimal", "int", "str"]
        );
        assert_eq!(
            catalog.validators.names(),
            vec!["greater-than", "regex-matches"]
        );
        assert_eq!(catalog.post_processors.names(), vec!["divide", "round"]);
        assert_eq!(catalog.pre_processors.len(), 6);
    }

    #[test]
    fn test_unknown_name() {
        let catalog = TransformCatalog::builtin();
        let err = catalog
            .build(Category::Validator, &TransformSpec::new("replace"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTransform { .. }));
        assert_eq!(err.to_string(), "invalid validator 'replace'");
    }

    #[test]
    fn test_categories_are_independent() {
        let catalog = TransformCatalog::builtin();
        assert!(catalog.pre_processors.contains("replace"));
        assert!(!catalog.converters.contains("replace"));
    }

    #[test]
    fn test_register_custom_transform() {
        let mut catalog = TransformCatalog::builtin();
        let previous = catalog
            .pre_processors
            .register("shout", |_| Ok(Box::new(Shout) as Box<dyn Transform>));
        assert!(previous.is_none());

        let transform = catalog
            .build(Category::PreProcessor, &TransformSpec::new("shout"))
            .unwrap();
        assert_eq!(transform.name(), "shout");
        assert_eq!(transform.apply(Value::from("hi")).unwrap(), Value::from("HI"));
    }

    #[test]
    fn test_missing_required_parameters() {
        let catalog = TransformCatalog::builtin();
        let err = catalog
            .build(Category::Validator, &TransformSpec::new("regex-matches"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameters { .. }));
        assert!(err.to_string().contains("pattern"));
    }

    #[test]
    fn test_unexpected_parameter() {
        let catalog = TransformCatalog::builtin();
        let spec = TransformSpec::new("strip-whitespaces").with_parameters(json!({"width": 3}));
        let err = catalog.build(Category::PreProcessor, &spec).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameters { .. }));
    }

    #[test]
    fn test_builder_rejection_is_config_error() {
        let catalog = TransformCatalog::builtin();
        let spec = TransformSpec::new("divide").with_parameters(json!({"denominator": 0}));
        let err = catalog.build(Category::PostProcessor, &spec).unwrap_err();
        assert!(err.to_string().contains("denominator"));
    }
}
