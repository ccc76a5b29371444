//! The [`RefFactory`] and its builder.
//!
//! Auxiliary constructors live in a registry keyed by name. Each one keeps
//! its own argument type, checked when it is called through
//! [`RefFactory::call`].

use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use eref_types::EntityRef;

use crate::error::{FactoryError, FactoryResult};

/// A shareable payload constructor.
pub type Constructor<A, D> = Arc<dyn Fn(A) -> D + Send + Sync>;

/// A registered auxiliary constructor with its argument type erased.
#[derive(Clone)]
struct AuxConstructor {
    arg_type: &'static str,
    /// Always a `Constructor<X, D>` for the registered `X`.
    func: Arc<dyn Any + Send + Sync>,
}

/// Stamps out refs of a single tag.
///
/// The main constructor takes one argument value; constructors needing
/// several inputs take a tuple. Factories are immutable once built and cheap
/// to clone, so a process typically keeps one per tag in a `static`.
pub struct RefFactory<T, A, D> {
    tag: T,
    ctor: Constructor<A, D>,
    aux: BTreeMap<String, AuxConstructor>,
}

impl<T, A, D> RefFactory<T, A, D> {
    /// Create a factory with no auxiliary constructors.
    pub fn make<F>(tag: T, ctor: F) -> Self
    where
        F: Fn(A) -> D + Send + Sync + 'static,
    {
        Self {
            tag,
            ctor: Arc::new(ctor),
            aux: BTreeMap::new(),
        }
    }

    /// Start building a factory that can carry auxiliary constructors.
    pub fn builder<F>(tag: T, ctor: F) -> RefFactoryBuilder<T, A, D>
    where
        F: Fn(A) -> D + Send + Sync + 'static,
    {
        RefFactoryBuilder {
            factory: Self::make(tag, ctor),
        }
    }

    /// The tag carried by every ref this factory mints.
    pub fn type_name(&self) -> &T {
        &self.tag
    }

    /// Returns `true` if an auxiliary constructor is registered under `name`.
    pub fn has_constructor(&self, name: &str) -> bool {
        self.aux.contains_key(name)
    }

    /// Names of all auxiliary constructors, sorted.
    pub fn constructor_names(&self) -> impl Iterator<Item = &str> {
        self.aux.keys().map(String::as_str)
    }
}

impl<T: Clone, A, D> RefFactory<T, A, D> {
    /// Run the main constructor and tag its result.
    pub fn create(&self, args: A) -> EntityRef<T, D> {
        self.from_data((self.ctor)(args))
    }

    /// Tag an already assembled payload, skipping the constructor.
    pub fn from_data(&self, data: D) -> EntityRef<T, D> {
        EntityRef::create(self.tag.clone(), data)
    }
}

impl<T: Clone, A, D: 'static> RefFactory<T, A, D> {
    /// Run the auxiliary constructor `name` and tag its result.
    ///
    /// `X` must be the argument type the constructor was registered with.
    pub fn call<X: 'static>(&self, name: &str, args: X) -> FactoryResult<EntityRef<T, D>> {
        let aux = self
            .aux
            .get(name)
            .ok_or_else(|| FactoryError::UnknownConstructor {
                name: name.to_string(),
            })?;
        let func = aux
            .func
            .downcast_ref::<Constructor<X, D>>()
            .ok_or_else(|| FactoryError::ArgumentMismatch {
                name: name.to_string(),
                expected: aux.arg_type,
                actual: type_name::<X>(),
            })?;
        Ok(self.from_data(func(args)))
    }
}

impl<T: PartialEq + 'static, A, D: 'static> RefFactory<T, A, D> {
    /// Returns `true` if `value` is a ref minted under this factory's tag.
    pub fn is(&self, value: &dyn Any) -> bool {
        EntityRef::<T, D>::is_of_type(&self.tag, value)
    }

    /// Narrow an arbitrary value to a ref of this factory's tag.
    pub fn narrow<'a>(&self, value: &'a dyn Any) -> Option<&'a EntityRef<T, D>> {
        EntityRef::<T, D>::narrow(&self.tag, value)
    }
}

impl<T: PartialEq, A, D> RefFactory<T, A, D> {
    /// Statically typed form of [`RefFactory::is`].
    pub fn owns(&self, r: &EntityRef<T, D>) -> bool {
        *r.tag() == self.tag
    }
}

impl<T: Clone, A, D> Clone for RefFactory<T, A, D> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            ctor: Arc::clone(&self.ctor),
            aux: self.aux.clone(),
        }
    }
}

impl<T: fmt::Debug, A, D> fmt::Debug for RefFactory<T, A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefFactory")
            .field("tag", &self.tag)
            .field("constructors", &self.aux.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for a [`RefFactory`] with named auxiliary constructors.
pub struct RefFactoryBuilder<T, A, D> {
    factory: RefFactory<T, A, D>,
}

impl<T, A, D: 'static> RefFactoryBuilder<T, A, D> {
    /// Register an auxiliary constructor. A later registration under the
    /// same name replaces the earlier one.
    pub fn aux<X, F>(mut self, name: impl Into<String>, ctor: F) -> Self
    where
        X: 'static,
        F: Fn(X) -> D + Send + Sync + 'static,
    {
        let name = name.into();
        let func: Constructor<X, D> = Arc::new(ctor);
        let entry = AuxConstructor {
            arg_type: type_name::<X>(),
            func: Arc::new(func),
        };
        if self.factory.aux.insert(name.clone(), entry).is_some() {
            debug!(tag_type = type_name::<T>(), name = %name, "replaced auxiliary constructor");
        }
        self
    }

    /// Register an auxiliary constructor if one is present; an absent entry
    /// is skipped without error.
    pub fn aux_maybe<X, F>(self, name: impl Into<String>, ctor: Option<F>) -> Self
    where
        X: 'static,
        F: Fn(X) -> D + Send + Sync + 'static,
    {
        match ctor {
            Some(ctor) => self.aux(name, ctor),
            None => {
                let name = name.into();
                trace!(tag_type = type_name::<T>(), name = %name, "skipping absent auxiliary constructor");
                self
            }
        }
    }

    pub fn build(self) -> RefFactory<T, A, D> {
        debug!(
            tag_type = type_name::<T>(),
            constructors = self.factory.aux.len(),
            "ref factory built"
        );
        self.factory
    }
}
