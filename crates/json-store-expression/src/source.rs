//! Named value sources: things that can resolve paths under their own
//! prefix, such as another store.

use crate::dynamic::{resolve_dynamic_path, DEFAULT_MAX_PASSES};
use crate::error::ExprError;
use json_store_path::{parse_path, read, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// A named value source.
pub trait ValueSource {
    /// The prefix this source owns, without a trailing dot (e.g. `"Store"`).
    fn prefix(&self) -> &str;

    /// Resolves a full path starting with [`prefix`](Self::prefix).
    ///
    /// `sources` is the registry of the caller, for resolving dynamic
    /// brackets that appear inside `path`.
    fn resolve(&self, path: &str, sources: &SourceRegistry) -> Result<Value, ExprError>;
}

/// Check if `path` lies under `prefix`: equal to it, or continuing with a
/// `.` or `[`.
pub fn has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

/// Ordered set of named value sources.
///
/// Registering a source whose prefix is already taken replaces the earlier
/// one. Lookups pick the longest prefix that matches.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Rc<dyn ValueSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, source: Rc<dyn ValueSource>) {
        self.sources.retain(|s| s.prefix() != source.prefix());
        self.sources.push(source);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, source: Rc<dyn ValueSource>) -> Self {
        self.register(source);
        self
    }

    /// A copy of this registry with every source of `extra` registered on
    /// top.
    pub fn merged(&self, extra: &SourceRegistry) -> SourceRegistry {
        let mut merged = self.clone();
        for source in &extra.sources {
            merged.register(Rc::clone(source));
        }
        merged
    }

    /// The source owning `path`, if any.
    pub fn find(&self, path: &str) -> Option<&Rc<dyn ValueSource>> {
        self.sources
            .iter()
            .filter(|s| has_prefix(path, s.prefix()))
            .max_by_key(|s| s.prefix().len())
    }

    /// Resolves `path` through the source owning it.
    ///
    /// # Errors
    ///
    /// `UnknownReference` when no registered source owns the path.
    pub fn resolve(&self, path: &str) -> Result<Value, ExprError> {
        let path = path.trim();
        let source = self
            .find(path)
            .ok_or_else(|| ExprError::UnknownReference(path.to_string()))?;
        trace!(path, prefix = source.prefix(), "resolving reference");
        source.resolve(path, self)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.prefix())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.prefixes()).finish()
    }
}

impl FromIterator<Rc<dyn ValueSource>> for SourceRegistry {
    fn from_iter<I: IntoIterator<Item = Rc<dyn ValueSource>>>(iter: I) -> Self {
        let mut registry = SourceRegistry::new();
        for source in iter {
            registry.register(source);
        }
        registry
    }
}

/// A value source over shared data.
#[derive(Debug, Clone)]
pub struct ObjectSource {
    prefix: String,
    data: Rc<RefCell<Value>>,
    max_passes: usize,
}

impl ObjectSource {
    pub fn new(prefix: impl Into<String>, data: Value) -> Self {
        Self::shared(prefix, Rc::new(RefCell::new(data)))
    }

    /// A source reading through `data`, so that later changes to it are
    /// visible.
    pub fn shared(prefix: impl Into<String>, data: Rc<RefCell<Value>>) -> Self {
        ObjectSource {
            prefix: prefix.into(),
            data,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn data(&self) -> &Rc<RefCell<Value>> {
        &self.data
    }
}

impl ValueSource for ObjectSource {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn resolve(&self, path: &str, sources: &SourceRegistry) -> Result<Value, ExprError> {
        let resolved = resolve_dynamic_path(path, sources, self.max_passes);
        let segments = parse_path(&resolved, &self.prefix)?;
        let data = self.data.borrow();
        Ok(read(&data, &segments)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(prefix: &str, data: Value) -> Rc<dyn ValueSource> {
        Rc::new(ObjectSource::new(prefix, data))
    }

    #[test]
    fn test_has_prefix() {
        assert!(has_prefix("Store", "Store"));
        assert!(has_prefix("Store.a", "Store"));
        assert!(has_prefix("Store[0]", "Store"));
        assert!(!has_prefix("Stores.a", "Store"));
        assert!(!has_prefix("Sto", "Store"));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let registry = SourceRegistry::new()
            .with(source("App", Value::from(1)))
            .with(source("App.Sub", Value::from(2)));
        assert_eq!(registry.find("App.Sub.x").map(|s| s.prefix()), Some("App.Sub"));
        assert_eq!(registry.find("App.Subway").map(|s| s.prefix()), Some("App"));
    }

    #[test]
    fn test_later_registration_shadows() {
        let registry = SourceRegistry::new()
            .with(source("S", Value::from(1)))
            .with(source("S", Value::from(2)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("S").unwrap(), Value::from(2));
    }

    #[test]
    fn test_unknown_reference() {
        let registry = SourceRegistry::new();
        assert_eq!(
            registry.resolve("Nope.x"),
            Err(ExprError::UnknownReference("Nope.x".to_string()))
        );
    }

    #[test]
    fn test_object_source_sees_updates() {
        let data = Rc::new(RefCell::new(Value::object()));
        let registry = SourceRegistry::new().with(Rc::new(ObjectSource::shared("D", Rc::clone(&data))));
        assert_eq!(registry.resolve("D.x").unwrap(), Value::Undefined);
        if let Value::Object(map) = &mut *data.borrow_mut() {
            map.insert("x".to_string(), Value::from(5));
        }
        assert_eq!(registry.resolve("D.x").unwrap(), Value::from(5));
    }

    #[test]
    fn test_debug_lists_prefixes() {
        let registry = SourceRegistry::new()
            .with(source("A", Value::Null))
            .with(source("B", Value::Null));
        assert_eq!(format!("{:?}", registry), r#"["A", "B"]"#);
    }
}
