//! Discovery and bootstrap
//!
//! Registers the statically known component modules. All modules are
//! registered into a staging copy of the registry first; the target registry
//! only sees the result if every module succeeded, and is sealed at the same
//! time. A failed bootstrap leaves the target untouched, and so does one that
//! raced a direct registration on the target. Components registered
//! by hand before bootstrap are kept and take part in collision checks.

use crate::components::{ComponentModule, BUILTIN_MODULES};
use crate::error::{BootstrapError, ModuleFailure, RegistryError};
use crate::registry::ComponentRegistry;

/// Register every built-in component into `registry` and seal it.
///
/// Idempotent: a registry that is already sealed is left as is.
pub fn initialize(registry: &ComponentRegistry) -> Result<(), BootstrapError> {
    initialize_with(registry, BUILTIN_MODULES)
}

/// Register `modules` into `registry` and seal it, or publish nothing
pub fn initialize_with(
    registry: &ComponentRegistry,
    modules: &[ComponentModule],
) -> Result<(), BootstrapError> {
    if registry.is_sealed() {
        tracing::debug!("component registry already initialized");
        return Ok(());
    }

    let (staging, base) = registry.fork();
    let mut failures = Vec::new();

    for module in modules {
        if let Err(error) = (module.register)(&staging) {
            tracing::error!(component = module.name, %error, "component failed to register");
            failures.push(ModuleFailure {
                component: module.name.to_string(),
                error,
            });
        }
    }

    if !failures.is_empty() {
        return Err(BootstrapError { failures });
    }

    let staged = staging.snapshot();
    match registry.publish(&base, &staged) {
        Ok(true) => {
            tracing::info!(components = staged.len(), "component registry initialized");
            Ok(())
        }
        Ok(false) => Ok(()),
        Err(changed) => {
            tracing::error!(components = ?changed, "registry changed during bootstrap");
            Err(BootstrapError {
                failures: changed
                    .into_iter()
                    .map(|name| ModuleFailure {
                        component: name.clone(),
                        error: RegistryError::ChangedDuringBootstrap { name },
                    })
                    .collect(),
            })
        }
    }
}
