//! Visitor dispatch over compiled instances.
//!
//! Handlers are registered by unqualified class name. Dispatching an
//! instance calls the handler of its own class, or of the nearest ancestor
//! that has one, including the base type the hierarchy rests on.

use std::collections::HashMap;
use std::fmt;

use ontoforge_graph::local_name;
use thiserror::Error;

use crate::instance::Instance;

/// Errors raised by [`Dispatcher::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Neither the class nor any ancestor has a handler.
    #[error("no handler for {class} or any of its ancestors")]
    NoHandler {
        /// Unqualified class name of the instance.
        class: String,
    },
}

type Handler<'h, R> = Box<dyn Fn(&Instance) -> R + 'h>;

/// A callback table keyed by class name.
pub struct Dispatcher<'h, R> {
    handlers: HashMap<String, Handler<'h, R>>,
}

impl<'h, R> Default for Dispatcher<'h, R> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<R> fmt::Debug for Dispatcher<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Dispatcher").field("handlers", &names).finish()
    }
}

impl<'h, R> Dispatcher<'h, R> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `class_name`, replacing any earlier one.
    pub fn on<F>(&mut self, class_name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Instance) -> R + 'h,
    {
        self.handlers.insert(class_name.into(), Box::new(handler));
        self
    }

    /// True if a handler is registered for exactly `class_name`.
    #[must_use]
    pub fn handles(&self, class_name: &str) -> bool {
        self.handlers.contains_key(class_name)
    }

    /// Calls the most specific handler for `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoHandler`] if nothing in the instance's
    /// lineage has a handler.
    pub fn dispatch(&self, instance: &Instance) -> Result<R, DispatchError> {
        let class = instance.class();
        let base = class.base().map(|b| local_name(&b.uri));
        class
            .lineage()
            .map(|c| c.name.as_str())
            .chain(base)
            .find_map(|name| self.handlers.get(name))
            .map(|handler| handler(instance))
            .ok_or_else(|| DispatchError::NoHandler {
                class: class.name.clone(),
            })
    }
}
