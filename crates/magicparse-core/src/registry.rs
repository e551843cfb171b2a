//! File type and transform registries.
//!
//! A [`Registry`] is an ordinary value: build one with [`Registry::builtin`],
//! extend it, and pass it to [`Schema::build_with`](crate::Schema::build_with).
//! [`Registry::global`] is the process-wide instance used by
//! [`Schema::build`](crate::Schema::build) and
//! [`Schema::register`](crate::Schema::register).
//!
//! # Thread Safety
//!
//! The global registry is created on first access and guarded by an
//! [`RwLock`]. Building a schema takes the read lock; registration takes the
//! write lock. Parsing never touches the registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use magicparse_transform::TransformCatalog;

use crate::file_type::{Columnar, Csv, FileType};

/// File types and transforms available to schema building.
#[derive(Clone)]
pub struct Registry {
    file_types: HashMap<String, Arc<dyn FileType>>,
    transforms: TransformCatalog,
}

impl Registry {
    /// A registry with no file types and no transforms.
    pub fn empty() -> Self {
        Self {
            file_types: HashMap::new(),
            transforms: TransformCatalog::empty(),
        }
    }

    /// A registry with the built-in file types (`csv`, `columnar`) and transforms.
    pub fn builtin() -> Self {
        let mut registry = Self {
            file_types: HashMap::new(),
            transforms: TransformCatalog::builtin(),
        };
        registry.register_file_type(Csv);
        registry.register_file_type(Columnar);
        registry
    }

    /// The process-wide registry.
    pub fn global() -> &'static RwLock<Registry> {
        static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();
        GLOBAL.get_or_init(|| RwLock::new(Registry::builtin()))
    }

    /// Read access to the process-wide registry.
    ///
    /// Registrations are single map inserts, so a poisoned lock still holds
    /// a consistent registry and is used as is.
    pub fn read_global() -> RwLockReadGuard<'static, Registry> {
        Self::global().read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the process-wide registry.
    pub fn write_global() -> RwLockWriteGuard<'static, Registry> {
        Self::global().write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a file type under its key, replacing any previous one.
    pub fn register_file_type<F: FileType + 'static>(&mut self, file_type: F) {
        self.file_types
            .insert(file_type.key().to_string(), Arc::new(file_type));
    }

    /// Looks up a file type by key.
    pub fn file_type(&self, key: &str) -> Option<&dyn FileType> {
        self.file_types.get(key).map(|file_type| file_type.as_ref())
    }

    /// Registered file type keys, sorted.
    pub fn file_types(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.file_types.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn transforms(&self) -> &TransformCatalog {
        &self.transforms
    }

    /// Mutable access for registering transforms.
    pub fn transforms_mut(&mut self) -> &mut TransformCatalog {
        &mut self.transforms
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("file_types", &self.file_types())
            .field("transforms", &self.transforms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_file_types() {
        let registry = Registry::builtin();
        assert_eq!(registry.file_types(), vec!["columnar", "csv"]);
        assert!(registry.file_type("csv").is_some());
        assert!(registry.file_type("anything").is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::empty();
        assert!(registry.file_types().is_empty());
        assert!(registry.transforms().converters.is_empty());
    }

    #[test]
    fn test_global_starts_with_builtins() {
        let registry = Registry::read_global();
        assert!(registry.file_type("csv").is_some());
        assert!(registry.transforms().converters.contains("int"));
    }
}
