// Static proxies over registry services

use crate::registry::{Registry, registry};
use crate::service::Service;
use crate::{FacadeError, Result};
use garavel_support::Value;
use std::sync::Arc;

/// A zero-sized handle bound to one service name.
///
/// Implementors pick a `Target` and override [`Facade::accessor`]; the rest
/// is provided. Prefer the [`facade!`](crate::facade) macro, which does both.
pub trait Facade {
    type Target: Service + Default;

    /// Name the target is registered under.
    ///
    /// Every facade must override this; the default fails with
    /// [`FacadeError::UnconfiguredAccessor`].
    fn accessor() -> Result<&'static str> {
        Err(FacadeError::UnconfiguredAccessor(std::any::type_name::<Self>()))
    }

    /// The shared target from the process-wide registry.
    fn instance() -> Result<Arc<Self::Target>> {
        Self::resolve_in(registry())
    }

    /// The target from an explicit registry.
    fn resolve_in(registry: &Registry) -> Result<Arc<Self::Target>> {
        registry.resolve::<Self::Target>(Self::accessor()?)
    }

    /// Call `method` on the shared target by name.
    fn call(method: &str, args: &[Value]) -> Result<Value> {
        Self::call_in(registry(), method, args)
    }

    /// Call `method` on the target held by an explicit registry.
    fn call_in(registry: &Registry, method: &str, args: &[Value]) -> Result<Value> {
        Self::resolve_in(registry)?;
        registry.invoke(Self::accessor()?, method, args)
    }
}

/// Declare a facade type.
///
/// The accessor defaults to the target's fully qualified type name.
///
/// ```rust
/// use garavel_facades::{facade, Facade, Result, Service};
/// use garavel_support::Value;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// pub struct Clock;
///
/// impl Service for Clock {
///     fn methods(&self) -> &'static [&'static str] {
///         &["now"]
///     }
///
///     fn call(&self, _method: &str, _args: &[Value]) -> Result<Value> {
///         Ok(Value::Int(0))
///     }
/// }
///
/// facade!(pub struct Time => Clock);
/// facade!(pub struct NamedTime => Clock, "clock");
///
/// assert_eq!(Time::accessor().unwrap(), std::any::type_name::<Clock>());
/// assert_eq!(NamedTime::accessor().unwrap(), "clock");
/// assert!(Arc::ptr_eq(&Time::instance().unwrap(), &Time::instance().unwrap()));
/// assert_eq!(NamedTime::call("now", &[]).unwrap(), Value::Int(0));
/// ```
#[macro_export]
macro_rules! facade {
    ($(#[$meta:meta])* $vis:vis struct $name:ident => $target:ty, $accessor:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::Facade for $name {
            type Target = $target;

            fn accessor() -> $crate::Result<&'static str> {
                Ok($accessor)
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident => $target:ty) => {
        $crate::facade!(
            $(#[$meta])* $vis struct $name => $target, ::std::any::type_name::<$target>()
        );
    };
}
