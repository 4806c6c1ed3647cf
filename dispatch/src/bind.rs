//! Runtime action binding.
//!
//! A schema file is pure data; the behavior behind each command comes from
//! the caller as a map of handler closures. [`bind`] merges the two into a
//! [`BoundSchema`] without mutating the schema itself. Handler names with
//! no matching command are skipped silently so a partial action map can
//! target a reduced schema.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use commandeer_core::CommandSchema;
use tracing::debug;

/// Handler bound to a command name, invoked when that command matches.
///
/// Actions are opaque collaborators: they may spawn processes, block, or
/// terminate the process themselves. The dispatch engine does not observe
/// their completion.
pub type Action = Box<dyn Fn(&Invocation)>;

/// What a bound action sees when its command matches.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Name of the matched command.
    pub command: String,
    /// Positional values supplied after the command name.
    pub args: Vec<String>,
    /// Valued options present on this invocation, keyed by the `<valueName>`
    /// token from their descriptors. Command-local values shadow globals.
    pub values: BTreeMap<String, String>,
    /// Boolean switches present on this invocation, keyed by canonical flag
    /// name.
    pub switches: BTreeSet<String>,
}

impl Invocation {
    /// Value of a valued option, by its `<valueName>` token.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether a boolean switch was given.
    pub fn is_set(&self, name: &str) -> bool {
        self.switches.contains(name)
    }
}

/// Caller-supplied action handlers keyed by command name.
#[derive(Default)]
pub struct Actions {
    handlers: HashMap<String, Action>,
}

impl Actions {
    /// Creates an empty action map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action` for `command`, replacing any previous handler.
    pub fn with(mut self, command: &str, action: impl Fn(&Invocation) + 'static) -> Self {
        self.insert(command, action);
        self
    }

    /// Registers `action` for `command` in place.
    pub fn insert(&mut self, command: &str, action: impl Fn(&Invocation) + 'static) {
        self.handlers.insert(command.to_string(), Box::new(action));
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// `true` when no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// A schema with actions merged in; input to the parser adapter.
pub struct BoundSchema {
    /// The schema as loaded; never mutated by binding.
    pub schema: CommandSchema,
    actions: HashMap<String, Action>,
}

impl BoundSchema {
    /// Action bound to `command`, if any.
    pub fn action(&self, command: &str) -> Option<&Action> {
        self.actions.get(command)
    }
}

/// Merges `actions` into `schema` by command name.
///
/// Names absent from `schema.commands` are dropped without error.
pub fn bind(schema: CommandSchema, actions: Actions) -> BoundSchema {
    let mut bound = HashMap::new();
    for (name, action) in actions.handlers {
        if schema.commands.contains_key(&name) {
            bound.insert(name, action);
        } else {
            debug!(command = %name, "skipping action for unconfigured command");
        }
    }
    BoundSchema {
        schema,
        actions: bound,
    }
}
