//! Registry of command containers keyed by normalized prefix.

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::container::CommandContainer;
use super::help::{HelpCommands, HELP_PREFIX};

/// Normalizes a prefix for storage and lookup: trimmed, lower-cased.
pub fn normalize(prefix: &str) -> String {
    prefix.trim().to_lowercase()
}

/// Maps prefixes to containers, preserving registration order.
///
/// Always holds a container under the reserved `help` prefix.
pub struct Registry {
    containers: IndexMap<String, Box<dyn CommandContainer>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry holding only the built-in help container.
    pub fn new() -> Self {
        let mut containers: IndexMap<String, Box<dyn CommandContainer>> = IndexMap::new();
        containers.insert(HELP_PREFIX.to_string(), Box::new(HelpCommands));
        Self { containers }
    }

    /// Adds a container, replacing any container with the same prefix.
    ///
    /// A replaced container keeps its position in the enumeration order.
    /// Returns the replaced container. The reserved help prefix cannot be
    /// taken over; such a container is dropped and `None` is returned.
    pub fn add<C>(&mut self, container: C) -> Option<Box<dyn CommandContainer>>
    where
        C: CommandContainer + 'static,
    {
        self.add_boxed(Box::new(container))
    }

    /// Adds an already boxed container. See [`Registry::add`].
    pub fn add_boxed(
        &mut self,
        container: Box<dyn CommandContainer>,
    ) -> Option<Box<dyn CommandContainer>> {
        let key = normalize(container.prefix());
        if key == HELP_PREFIX {
            warn!("Refusing to replace the reserved '{HELP_PREFIX}' container");
            return None;
        }
        debug!(prefix = %key, commands = container.commands().len(), "Registering container");
        self.containers.insert(key, container)
    }

    /// Removes the container registered under `prefix`.
    ///
    /// Absent prefixes are a no-op. The reserved help prefix cannot be removed.
    pub fn remove(&mut self, prefix: &str) -> Option<Box<dyn CommandContainer>> {
        let key = normalize(prefix);
        if key == HELP_PREFIX {
            warn!("Refusing to remove the reserved '{HELP_PREFIX}' container");
            return None;
        }
        self.containers.shift_remove(&key)
    }

    /// Looks up a container by prefix, ignoring case and surrounding whitespace.
    pub fn lookup(&self, prefix: &str) -> Option<&dyn CommandContainer> {
        self.containers.get(&normalize(prefix)).map(|c| c.as_ref())
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.containers.contains_key(&normalize(prefix))
    }

    /// Normalized prefixes in registration order.
    pub fn prefixes(&self) -> Vec<String> {
        self.containers.keys().cloned().collect()
    }

    /// Containers in registration order.
    pub fn containers(&self) -> impl Iterator<Item = &dyn CommandContainer> {
        self.containers.values().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Always false: the help container is always registered.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("prefixes", &self.prefixes())
            .finish()
    }
}
