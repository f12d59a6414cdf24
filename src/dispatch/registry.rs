use std::collections::BTreeMap;
use std::sync::Arc;

use image::DynamicImage;

use crate::foundation::error::{ImagineError, ImagineResult};
use crate::ops::operation::{Operation, OperationSequence};

/// A function applying one operation to an image in place.
pub type OperationHandler =
    Box<dyn Fn(&mut DynamicImage, &Operation) -> ImagineResult<()> + Send + Sync>;

/// Something that can resolve operation names to handlers.
pub trait HandlerProvider: Send + Sync {
    /// Short name used in logs, e.g. `table` or `processor`.
    fn label(&self) -> &str;

    /// Handler for `name`, if this provider knows it.
    fn handler(&self, name: &str) -> Option<&OperationHandler>;
}

/// Named map of operation handlers.
pub struct HandlerRegistry {
    label: String,
    handlers: BTreeMap<String, OperationHandler>,
}

impl HandlerRegistry {
    /// Empty registry.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            handlers: BTreeMap::new(),
        }
    }

    /// Register (or replace) the handler for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut DynamicImage, &Operation) -> ImagineResult<()> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    /// Builder form of [`HandlerRegistry::register`].
    pub fn with<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut DynamicImage, &Operation) -> ImagineResult<()> + Send + Sync + 'static,
    {
        self.register(name, handler);
        self
    }

    /// Registered operation names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl HandlerProvider for HandlerRegistry {
    fn label(&self) -> &str {
        &self.label
    }

    fn handler(&self, name: &str) -> Option<&OperationHandler> {
        self.handlers.get(name)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("label", &self.label)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Priority-ordered handler providers.
///
/// The first provider that knows an operation wins. Table-level handlers are pushed before the
/// processor's built-ins so they can override them.
#[derive(Clone, Default)]
pub struct Dispatcher {
    providers: Vec<Arc<dyn HandlerProvider>>,
}

impl Dispatcher {
    /// Dispatcher without providers; every operation is unsupported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider with lower priority than the ones already present.
    pub fn push(&mut self, provider: Arc<dyn HandlerProvider>) {
        self.providers.push(provider);
    }

    /// Insert a provider ahead of all existing ones.
    pub fn prepend(&mut self, provider: Arc<dyn HandlerProvider>) {
        self.providers.insert(0, provider);
    }

    /// Builder form of [`Dispatcher::push`].
    pub fn with(mut self, provider: Arc<dyn HandlerProvider>) -> Self {
        self.push(provider);
        self
    }

    /// Provider labels in priority order.
    pub fn labels(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.label()).collect()
    }

    /// Resolve `name` to the label of the winning provider and its handler.
    pub fn resolve(&self, name: &str) -> ImagineResult<(&str, &OperationHandler)> {
        self.providers
            .iter()
            .find_map(|p| p.handler(name).map(|h| (p.label(), h)))
            .ok_or_else(|| ImagineError::unsupported(name))
    }

    /// Apply `sequence` to `image` in order.
    ///
    /// Every operation is validated and resolved before the image is touched, so an unknown
    /// operation late in the list leaves the image unchanged.
    pub fn apply(
        &self,
        image: &mut DynamicImage,
        sequence: &OperationSequence,
    ) -> ImagineResult<()> {
        let mut plan = Vec::with_capacity(sequence.len());
        for op in sequence {
            op.validate()?;
            plan.push((op, self.resolve(op.name())?));
        }
        for (op, (label, handler)) in plan {
            tracing::debug!(operation = op.name(), provider = label, "apply image operation");
            handler(image, op)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("providers", &self.labels())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/registry.rs"]
mod tests;
