use std::sync::{Arc, RwLock};

/// Shared, mutable component state that validators can capture.
///
/// `State<T>` wraps an `Arc<RwLock<T>>`, so cloning it is cheap and every
/// clone sees the same value. Validators built from a `State` read the
/// current value on each evaluation instead of a copy taken at build time.
///
/// # Example
///
/// ```
/// use reform::State;
///
/// let names = State::new(vec!["Chris".to_string()]);
/// let seen_by_validator = names.clone();
///
/// names.update(|list| list.push("Anna".to_string()));
/// assert!(seen_by_validator.read(|list| list.iter().any(|n| n == "Anna")));
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read(T::clone)
    }

    /// Run a closure against the current value without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Replace the value
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Update the value using a closure
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
