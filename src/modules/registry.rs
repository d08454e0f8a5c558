//! Module registry and precedence.
//!
//! Modules are kept in declaration order. Whenever the enabled set changes,
//! every module subscription is torn down and rebuilt in declaration order, so
//! within one priority the earlier-declared module always runs first. Given
//! the same enabled set, the handler order is therefore the same no matter in
//! which order modules were toggled.
//!
//! Toggles are queued and only applied by [`ModuleRegistry::apply_pending`],
//! which the engine calls at the start of each tick. A module whose
//! `on_enable` fails stays disabled; one whose `on_disable` fails is disabled
//! anyway. Both are recorded on the bus as [`EngineError::LifecycleFailure`].
//!
//! The registry only removes the handlers it registered itself. Handlers
//! added straight to the bus survive a rebuild, and because module handlers
//! are registered again on every rebuild, such a handler runs before module
//! handlers of the same priority from then on.
use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use log::info;

use crate::error::{EngineError, HandlerError};
use crate::modules::Module;
use crate::resources::eventbus::{EventBus, HandlerId, panic_message};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

impl ModuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

struct Entry {
    owner: String,
    module: Rc<RefCell<dyn Module>>,
    enabled: bool,
    handlers: Vec<HandlerId>,
}

#[derive(Default)]
pub struct ModuleRegistry {
    entries: Vec<Entry>,
    pending: Vec<(ModuleId, bool)>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a module. It starts disabled.
    pub fn add<M: Module + 'static>(&mut self, module: M) -> ModuleId {
        let id = ModuleId(self.entries.len());
        let name = module.name().to_string();
        let owner = if self.entries.iter().any(|e| e.owner == name) {
            format!("{}#{}", name, id.0)
        } else {
            name
        };
        self.entries.push(Entry {
            owner,
            module: Rc::new(RefCell::new(module)),
            enabled: false,
            handlers: Vec::new(),
        });
        id
    }

    /// Queue an enable/disable; applied at the next tick boundary.
    pub fn set_enabled(&mut self, id: ModuleId, enabled: bool) -> Result<(), EngineError> {
        if id.0 >= self.entries.len() {
            return Err(EngineError::UnknownModule(id.0));
        }
        self.pending.push((id, enabled));
        Ok(())
    }

    /// Whether the module is enabled for the current tick.
    pub fn is_enabled(&self, id: ModuleId) -> bool {
        self.entries.get(id.0).is_some_and(|e| e.enabled)
    }

    pub fn find(&self, name: &str) -> Option<ModuleId> {
        self.entries
            .iter()
            .position(|e| e.owner == name)
            .map(ModuleId)
    }

    /// Name the module is known under in diagnostics.
    pub fn owner(&self, id: ModuleId) -> Option<&str> {
        self.entries.get(id.0).map(|e| e.owner.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|e| e.enabled).count()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Apply queued toggles in the order they were made and rewire the bus if
    /// the enabled set changed. Returns whether it changed.
    pub fn apply_pending(&mut self, bus: &EventBus) -> bool {
        let mut changed = false;
        for (id, enabled) in std::mem::take(&mut self.pending) {
            let entry = &mut self.entries[id.0];
            if entry.enabled == enabled {
                continue;
            }
            let hook = if enabled { "on_enable" } else { "on_disable" };
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                let mut module = entry
                    .module
                    .try_borrow_mut()
                    .map_err(|_| HandlerError::Busy.to_string())?;
                if enabled {
                    module.on_enable();
                } else {
                    module.on_disable();
                }
                Ok::<(), String>(())
            }));
            let failure = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(reason)) => Some(reason),
                Err(payload) => Some(panic_message(payload.as_ref())),
            };
            if let Some(reason) = failure {
                bus.report(EngineError::LifecycleFailure {
                    owner: entry.owner.clone(),
                    hook,
                    reason,
                });
                if enabled {
                    continue;
                }
            }

            entry.enabled = enabled;
            changed = true;
            if enabled {
                info!("module '{}' enabled", entry.owner);
            } else {
                info!("module '{}' disabled", entry.owner);
            }
        }
        if changed {
            self.rebuild(bus);
        }
        changed
    }

    fn rebuild(&mut self, bus: &EventBus) {
        for entry in &mut self.entries {
            for id in entry.handlers.drain(..) {
                bus.unregister(id);
            }
        }
        for entry in self.entries.iter_mut().filter(|e| e.enabled) {
            let hooks = match entry.module.try_borrow() {
                Ok(module) => module.hooks(),
                Err(_) => continue,
            };
            for hook in hooks {
                let module = entry.module.clone();
                let id = bus.register(hook.kind, hook.priority, entry.owner.clone(), move |event| {
                    let mut module = module.try_borrow_mut().map_err(|_| HandlerError::Busy)?;
                    module.handle(event)
                });
                entry.handlers.push(id);
            }
        }
    }
}
