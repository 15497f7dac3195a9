//! Per-type singleton slots.
//!
//! Each type gets its own [`Slot`]: a `OnceLock` holding the published
//! instance, the registered constructor, and a mutex serializing first-time
//! construction. The slot map is locked only long enough to find or insert a
//! slot, so constructing one type never blocks requests for another.
//!
//! # Example
//!
//! ```
//! use gym_registry::SingletonRegistry;
//! use std::sync::Arc;
//!
//! struct Settings {
//!     verbose: bool,
//! }
//!
//! let registry = SingletonRegistry::new()
//!     .with_constructor(|| Ok::<_, std::io::Error>(Settings { verbose: true }));
//!
//! let first = registry.instance_of::<Settings>().unwrap();
//! let second = registry.instance_of::<Settings>().unwrap();
//! assert!(first.verbose);
//! assert!(Arc::ptr_eq(&first, &second));
//! ```

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::thread::{self, ThreadId};

use gym_foundation::{Error, Result};
use parking_lot::{Mutex, RwLock};

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type Constructor<T> = Arc<dyn Fn() -> std::result::Result<T, BoxError> + Send + Sync>;
type ErasedSlot = Arc<dyn Any + Send + Sync>;

struct Slot<T> {
    instance: OnceLock<Arc<T>>,
    constructor: RwLock<Option<Constructor<T>>>,
    init: Mutex<()>,
    builder: Mutex<Option<ThreadId>>,
}

/// Marks the current thread as the slot's builder until dropped.
struct Building<'a>(&'a Mutex<Option<ThreadId>>);

impl<'a> Building<'a> {
    fn start(builder: &'a Mutex<Option<ThreadId>>) -> Self {
        *builder.lock() = Some(thread::current().id());
        Self(builder)
    }
}

impl Drop for Building<'_> {
    fn drop(&mut self) {
        *self.0.lock() = None;
    }
}

impl<T: Send + Sync + 'static> Slot<T> {
    fn new() -> Self {
        Self {
            instance: OnceLock::new(),
            constructor: RwLock::new(None),
            init: Mutex::new(()),
            builder: Mutex::new(None),
        }
    }

    fn get_or_construct(&self, fallback: Option<fn() -> T>) -> Result<Arc<T>> {
        if let Some(instance) = self.instance.get() {
            return Ok(Arc::clone(instance));
        }

        let type_name = type_name::<T>();
        // The init mutex is not reentrant; a constructor that reaches its own
        // type (directly or through another type) would wait on itself.
        if *self.builder.lock() == Some(thread::current().id()) {
            tracing::warn!(type_name, "singleton requested during its own construction");
            return Err(Error::recursive_construction(type_name));
        }

        let _init = self.init.lock();
        if let Some(instance) = self.instance.get() {
            return Ok(Arc::clone(instance));
        }

        let _building = Building::start(&self.builder);
        let constructor = self.constructor.read().clone();
        let value = match (constructor, fallback) {
            (Some(constructor), _) => constructor().map_err(|cause| {
                tracing::warn!(type_name, error = %cause, "singleton constructor failed");
                Error::construction_failed(type_name, cause)
            })?,
            (None, Some(fallback)) => fallback(),
            (None, None) => return Err(Error::missing_constructor(type_name)),
        };

        tracing::debug!(type_name, "constructed singleton");
        Ok(Arc::clone(self.instance.get_or_init(|| Arc::new(value))))
    }
}

/// A set of lazily constructed, shared instances, one per type.
///
/// Instances live as long as the registry. There is no teardown.
#[derive(Default)]
pub struct SingletonRegistry {
    slots: RwLock<HashMap<TypeId, ErasedSlot>>,
}

impl SingletonRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the parameterless constructor for `T`, returning the
    /// registry for chaining.
    #[must_use]
    pub fn with_constructor<T, E, F>(self, constructor: F) -> Self
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        self.register(constructor);
        self
    }

    /// Registers the parameterless constructor for `T`.
    ///
    /// Replaces any earlier constructor. An instance that was already
    /// published is kept; the new constructor only matters if `T` has not
    /// been built yet.
    pub fn register<T, E, F>(&self, constructor: F)
    where
        T: Send + Sync + 'static,
        E: Into<BoxError>,
        F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
    {
        let constructor: Constructor<T> = Arc::new(move || constructor().map_err(Into::into));
        *self.slot::<T>().constructor.write() = Some(constructor);
        tracing::debug!(type_name = type_name::<T>(), "registered singleton constructor");
    }

    /// Registers `T::default` as the parameterless constructor for `T`.
    pub fn register_default<T>(&self)
    where
        T: Default + Send + Sync + 'static,
    {
        self.register(|| Ok::<_, std::convert::Infallible>(T::default()));
    }

    /// Returns the shared instance of `T`, constructing it on first use.
    ///
    /// # Errors
    ///
    /// - [`MissingConstructorCapability`](gym_foundation::ErrorKind::MissingConstructorCapability)
    ///   if no constructor is registered for `T`
    /// - [`ConstructionFailed`](gym_foundation::ErrorKind::ConstructionFailed)
    ///   if the constructor returns an error; nothing is published and the
    ///   next call tries again
    /// - [`RecursiveConstruction`](gym_foundation::ErrorKind::RecursiveConstruction)
    ///   if called for `T` from inside the constructor of `T` on the same
    ///   thread. Constructors may request other types.
    pub fn instance_of<T>(&self) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.slot::<T>().get_or_construct(None)
    }

    /// Like [`instance_of`](Self::instance_of), falling back to `T::default`
    /// when no constructor is registered.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionFailed`](gym_foundation::ErrorKind::ConstructionFailed)
    /// only if a registered constructor fails, and
    /// [`RecursiveConstruction`](gym_foundation::ErrorKind::RecursiveConstruction)
    /// as for [`instance_of`](Self::instance_of).
    pub fn instance_of_default<T>(&self) -> Result<Arc<T>>
    where
        T: Default + Send + Sync + 'static,
    {
        self.slot::<T>().get_or_construct(Some(T::default))
    }

    /// Returns the instance of `T` if it has already been constructed.
    #[must_use]
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let slot = self.existing_slot::<T>()?;
        slot.instance.get().cloned()
    }

    /// Returns true if the instance of `T` has been constructed.
    #[must_use]
    pub fn is_initialized<T>(&self) -> bool
    where
        T: Send + Sync + 'static,
    {
        self.get::<T>().is_some()
    }

    fn existing_slot<T>(&self) -> Option<Arc<Slot<T>>>
    where
        T: Send + Sync + 'static,
    {
        let erased = self.slots.read().get(&TypeId::of::<T>()).cloned()?;
        erased.downcast::<Slot<T>>().ok()
    }

    fn slot<T>(&self) -> Arc<Slot<T>>
    where
        T: Send + Sync + 'static,
    {
        let id = TypeId::of::<T>();
        let existing = self.slots.read().get(&id).cloned();
        let erased = match existing {
            Some(erased) => erased,
            None => {
                let mut slots = self.slots.write();
                Arc::clone(slots.entry(id).or_insert_with(|| {
                    let fresh: ErasedSlot = Arc::new(Slot::<T>::new());
                    fresh
                }))
            }
        };
        // Every slot is stored under the TypeId of its own `T`, so the
        // downcast always succeeds and the fallback is never reached.
        erased
            .downcast::<Slot<T>>()
            .unwrap_or_else(|_| Arc::new(Slot::new()))
    }
}

impl fmt::Debug for SingletonRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonRegistry")
            .field("slots", &self.slots.read().len())
            .finish()
    }
}

static GLOBAL: OnceLock<SingletonRegistry> = OnceLock::new();

/// Returns the process-wide registry.
pub fn global() -> &'static SingletonRegistry {
    GLOBAL.get_or_init(SingletonRegistry::new)
}

/// Registers the constructor for `T` in the process-wide registry.
pub fn register<T, E, F>(constructor: F)
where
    T: Send + Sync + 'static,
    E: Into<BoxError>,
    F: Fn() -> std::result::Result<T, E> + Send + Sync + 'static,
{
    global().register(constructor);
}

/// Registers `T::default` in the process-wide registry.
pub fn register_default<T>()
where
    T: Default + Send + Sync + 'static,
{
    global().register_default::<T>();
}

/// Returns the process-wide instance of `T`.
///
/// # Errors
///
/// See [`SingletonRegistry::instance_of`].
pub fn instance_of<T>() -> Result<Arc<T>>
where
    T: Send + Sync + 'static,
{
    global().instance_of::<T>()
}

/// Returns the process-wide instance of `T`, defaulting it if unregistered.
///
/// # Errors
///
/// See [`SingletonRegistry::instance_of_default`].
pub fn instance_of_default<T>() -> Result<Arc<T>>
where
    T: Default + Send + Sync + 'static,
{
    global().instance_of_default::<T>()
}

/// Returns true if the process-wide instance of `T` exists.
#[must_use]
pub fn is_initialized<T>() -> bool
where
    T: Send + Sync + 'static,
{
    global().is_initialized::<T>()
}
