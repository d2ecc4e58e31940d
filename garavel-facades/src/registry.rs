// Process-wide service registry

use crate::service::Service;
use crate::{FacadeError, Result};
use garavel_log::{debug, trace, warn};
use garavel_support::Value;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

/// One constructed service, kept as both a typed handle and a dispatchable
/// one. Both point at the same allocation.
#[derive(Clone)]
struct Slot {
    any: Arc<dyn Any + Send + Sync>,
    service: Arc<dyn Service>,
    type_name: &'static str,
}

impl Slot {
    fn construct<T: Service + Default>() -> Slot {
        let instance = Arc::new(T::default());
        Slot {
            any: instance.clone(),
            service: instance,
            type_name: type_name::<T>(),
        }
    }

    fn downcast<T: Service>(&self, name: &str) -> Result<Arc<T>> {
        self.any
            .clone()
            .downcast::<T>()
            .map_err(|_| FacadeError::ServiceTypeMismatch {
                name: name.to_string(),
                bound: self.type_name,
                requested: type_name::<T>(),
            })
    }
}

/// How to build the service bound to a name.
#[derive(Clone, Copy)]
struct Binding {
    type_id: TypeId,
    type_name: &'static str,
    construct: fn() -> Slot,
}

impl Binding {
    fn of<T: Service + Default>() -> Binding {
        Binding {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            construct: Slot::construct::<T>,
        }
    }

    fn check<T: Service>(&self, name: &str) -> Result<()> {
        if self.type_id == TypeId::of::<T>() {
            Ok(())
        } else {
            Err(FacadeError::ServiceTypeMismatch {
                name: name.to_string(),
                bound: self.type_name,
                requested: type_name::<T>(),
            })
        }
    }
}

/// Maps service names to lazily constructed, shared instances.
///
/// An instance is built with `Default` the first time its name is resolved
/// and handed out as the same `Arc` afterwards. Each name gets its own cell;
/// the map lock is only held to find or insert that cell, so racing first
/// calls build exactly one instance and a constructor may resolve other
/// names. A constructor that resolves its own name never returns.
#[derive(Default)]
pub struct Registry {
    bindings: RwLock<HashMap<String, Binding>>,
    instances: RwLock<HashMap<String, Arc<OnceCell<Slot>>>>,
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// The registry facades resolve through.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember how to build `T` under `name` without building it yet, so
    /// [`Registry::invoke`] can reach it by name.
    pub fn bind<T: Service + Default>(&self, name: &str) -> Result<()> {
        let mut bindings = self.bindings.write();
        match bindings.get(name) {
            Some(existing) => existing.check::<T>(name),
            None => {
                bindings.insert(name.to_string(), Binding::of::<T>());
                debug!("bound {} as `{}`", type_name::<T>(), name);
                Ok(())
            }
        }
    }

    fn built(&self, name: &str) -> Option<Slot> {
        self.instances
            .read()
            .get(name)
            .and_then(|cell| cell.get().cloned())
    }

    /// The cell for `name`, inserted empty if missing. The map lock is
    /// released before the caller fills it.
    fn cell(&self, name: &str) -> Arc<OnceCell<Slot>> {
        if let Some(cell) = self.instances.read().get(name) {
            return cell.clone();
        }
        self.instances
            .write()
            .entry(name.to_string())
            .or_default()
            .clone()
    }

    /// The instance under `name`, built on first use.
    pub fn resolve<T: Service + Default>(&self, name: &str) -> Result<Arc<T>> {
        if let Some(slot) = self.built(name) {
            trace!("resolved `{}` from cache", name);
            return slot.downcast::<T>(name);
        }

        self.bind::<T>(name)?;

        let cell = self.cell(name);
        let slot = cell.get_or_init(|| {
            debug!("constructing {} for `{}`", type_name::<T>(), name);
            Slot::construct::<T>()
        });
        slot.downcast::<T>(name)
    }

    /// The instance under `name` as a dispatchable service, built from its
    /// binding on first use.
    pub fn resolve_named(&self, name: &str) -> Result<Arc<dyn Service>> {
        if let Some(slot) = self.built(name) {
            return Ok(slot.service);
        }

        let binding = self
            .bindings
            .read()
            .get(name)
            .copied()
            .ok_or_else(|| FacadeError::UnknownService(name.to_string()))?;

        let cell = self.cell(name);
        let slot = cell.get_or_init(|| {
            debug!("constructing {} for `{}`", binding.type_name, name);
            (binding.construct)()
        });
        Ok(slot.service.clone())
    }

    /// Call `method` on the service under `name`.
    pub fn invoke(&self, name: &str, method: &str, args: &[Value]) -> Result<Value> {
        let service = self.resolve_named(name)?;
        if !service.supports(method) {
            warn!("`{}` has no method `{}`", name, method);
            return Err(FacadeError::unknown_method(name, method));
        }
        trace!("invoking `{}::{}` with {} argument(s)", name, method, args.len());
        service.call(method, args)
    }

    /// Whether an instance has been built under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.built(name).is_some()
    }

    /// Whether `name` can be resolved by name.
    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.read().contains_key(name)
    }

    /// Number of built instances.
    pub fn len(&self) -> usize {
        self.instances
            .read()
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the instance under `name`; the next resolve builds a fresh one.
    /// Handles already given out stay valid.
    pub fn forget(&self, name: &str) -> bool {
        let removed = self
            .instances
            .write()
            .remove(name)
            .is_some_and(|cell| cell.get().is_some());
        if removed {
            debug!("forgot instance `{}`", name);
        }
        removed
    }

    /// Drop every instance and binding.
    pub fn clear(&self) {
        let mut instances = self.instances.write();
        let count = instances.values().filter(|cell| cell.get().is_some()).count();
        instances.clear();
        drop(instances);
        self.bindings.write().clear();
        debug!("cleared {} instance(s) from registry", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        hits: AtomicUsize,
    }

    impl Service for Counter {
        fn methods(&self) -> &'static [&'static str] {
            &["hit", "hits"]
        }

        fn call(&self, method: &str, _args: &[Value]) -> Result<Value> {
            match method {
                "hit" => {
                    let hits = self.hits.fetch_add(1, Ordering::SeqCst) + 1;
                    Ok(Value::Int(hits as i64))
                }
                "hits" => Ok(Value::Int(self.hits.load(Ordering::SeqCst) as i64)),
                other => Err(FacadeError::unknown_method("counter", other)),
            }
        }
    }

    #[derive(Default)]
    struct Other;

    impl Service for Other {
        fn methods(&self) -> &'static [&'static str] {
            &[]
        }

        fn call(&self, method: &str, _args: &[Value]) -> Result<Value> {
            Err(FacadeError::unknown_method("other", method))
        }
    }

    #[test]
    fn test_resolve_returns_same_instance() {
        let registry = Registry::new();
        let first = registry.resolve::<Counter>("counter").unwrap();
        let second = registry.resolve::<Counter>("counter").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_typed_and_named_handles_share_state() {
        let registry = Registry::new();
        let counter = registry.resolve::<Counter>("counter").unwrap();

        registry.invoke("counter", "hit", &[]).unwrap();
        registry.invoke("counter", "hit", &[]).unwrap();

        assert_eq!(counter.hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_type_mismatch() {
        let registry = Registry::new();
        registry.resolve::<Counter>("shared").unwrap();

        let err = registry.resolve::<Other>("shared").err().unwrap();
        assert!(matches!(err, FacadeError::ServiceTypeMismatch { .. }));
    }

    #[test]
    fn test_bind_conflict() {
        let registry = Registry::new();
        registry.bind::<Counter>("name").unwrap();
        registry.bind::<Counter>("name").unwrap();

        assert!(registry.bind::<Other>("name").is_err());
    }

    #[test]
    fn test_invoke_unbound_name() {
        let registry = Registry::new();
        let err = registry.invoke("missing", "hit", &[]).unwrap_err();
        assert_eq!(err, FacadeError::UnknownService("missing".to_string()));
    }

    #[test]
    fn test_invoke_builds_from_binding() {
        let registry = Registry::new();
        registry.bind::<Counter>("counter").unwrap();
        assert!(!registry.has("counter"));

        assert_eq!(registry.invoke("counter", "hit", &[]).unwrap(), Value::Int(1));
        assert!(registry.has("counter"));
    }

    #[test]
    fn test_invoke_unknown_method() {
        let registry = Registry::new();
        registry.bind::<Counter>("counter").unwrap();

        let err = registry.invoke("counter", "reset", &[]).unwrap_err();
        assert_eq!(err, FacadeError::unknown_method("counter", "reset"));
    }

    #[test]
    fn test_forget_and_clear() {
        let registry = Registry::new();
        let first = registry.resolve::<Counter>("counter").unwrap();

        assert!(registry.forget("counter"));
        assert!(!registry.forget("counter"));

        let second = registry.resolve::<Counter>("counter").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.is_bound("counter"));
    }
}
