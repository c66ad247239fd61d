//! Name → algorithm registry and the instance factory built on it.

use crate::algorithm::Algorithm;
use crate::codecs;
use crate::error::{ErrorKind, Result};
use crate::instance::Instance;
use crate::tuning::Tuning;
use exn::OptionExt;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to a registered prototype.
pub type Prototype = Arc<dyn Algorithm>;

/// A set of named compression algorithms.
///
/// The registry is an ordinary value: build one at startup, register the
/// algorithms the program needs, and pass it by reference to whatever
/// constructs instances. It is safe to register and construct from multiple
/// threads at once; a reader never observes a half-registered algorithm.
///
/// # Examples
///
/// ```
/// use squeeze_compress::{Endian, Registry, with_endian, with_lit_width};
///
/// let registry = Registry::with_defaults();
/// let lzw = registry.construct("lzw", [with_lit_width(7), with_endian(Endian::Big)]).unwrap();
///
/// let compressed = lzw.encode(b"TOBEORNOTTOBEORTOBEORNOT").unwrap();
/// assert_eq!(lzw.decode(&compressed).unwrap(), b"TOBEORNOTTOBEORTOBEORNOT");
/// ```
#[derive(Default)]
pub struct Registry {
    algorithms: RwLock<BTreeMap<String, Prototype>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("algorithms", &self.names()).finish()
    }
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in algorithm under its canonical name.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        codecs::register_defaults(&registry);
        registry
    }

    /// Register `algorithm` under `name`, replacing any previous registration.
    pub fn register(&self, name: impl Into<String>, algorithm: impl Algorithm + 'static) {
        self.register_shared(name, Arc::new(algorithm));
    }

    /// Register an already shared prototype under `name`.
    pub fn register_shared(&self, name: impl Into<String>, algorithm: Prototype) {
        let name = name.into();
        let previous = self.algorithms.write().unwrap_or_else(PoisonError::into_inner).insert(name.clone(), algorithm);
        if previous.is_some() {
            tracing::debug!(algorithm = %name, "Replaced registered algorithm");
        } else {
            tracing::debug!(algorithm = %name, "Registered algorithm");
        }
    }

    /// The prototype registered under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<Prototype> {
        self.algorithms.read().unwrap_or_else(PoisonError::into_inner).get(name).cloned()
    }

    /// Whether an algorithm is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.algorithms.read().unwrap_or_else(PoisonError::into_inner).contains_key(name)
    }

    /// Names of all registered algorithms.
    ///
    /// Currently sorted, but callers should not depend on the order.
    pub fn names(&self) -> Vec<String> {
        self.algorithms.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect()
    }

    /// Fail with [`Unregistered`](ErrorKind::Unregistered) unless `name` is
    /// registered.
    pub fn require_registered(&self, name: &str) -> Result<()> {
        if !self.contains(name) {
            exn::bail!(ErrorKind::Unregistered(name.to_string()));
        }
        Ok(())
    }

    /// Create a fresh instance of the algorithm registered under `name` and
    /// apply `tunings` to it in order.
    ///
    /// The first tuning that fails aborts construction: its error is returned
    /// and the partially configured instance is dropped. The registered
    /// prototype is never modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use squeeze_compress::{Level, Registry, TuningKind, error::ErrorKind, with_level, with_lit_width};
    ///
    /// let registry = Registry::with_defaults();
    /// let gzip = registry.construct("gzip", [with_level(Level::Best)]).unwrap();
    /// assert_eq!(gzip.extension(), ".gz");
    ///
    /// let err = registry.construct("gzip", [with_lit_width(8)]).unwrap_err();
    /// assert_eq!(
    ///     *err,
    ///     ErrorKind::UnsupportedOption { algorithm: "gzip".to_string(), option: TuningKind::LitWidth }
    /// );
    /// ```
    pub fn construct(&self, name: &str, tunings: impl IntoIterator<Item = Tuning>) -> Result<Instance> {
        let prototype = self.lookup(name).ok_or_raise(|| ErrorKind::Unregistered(name.to_string()))?;
        let mut instance = Instance::new(name, prototype.new_instance());
        for tuning in tunings {
            instance.apply(tuning)?;
        }
        tracing::debug!(algorithm = %name, "Constructed algorithm instance");
        Ok(instance)
    }

    /// Name of the algorithm whose extension matches the last extension of
    /// `path` (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use squeeze_compress::Registry;
    ///
    /// let registry = Registry::with_defaults();
    /// assert_eq!(registry.find_by_extension("file.html.gz").as_deref(), Some("gzip"));
    /// assert_eq!(registry.find_by_extension("file.html"), None);
    /// ```
    pub fn find_by_extension(&self, path: impl AsRef<Path>) -> Option<String> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        self.algorithms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(_, algorithm)| {
                algorithm.extension().strip_prefix('.').is_some_and(|candidate| candidate.eq_ignore_ascii_case(&ext))
            })
            .map(|(name, _)| name.clone())
    }

    /// Name of the first registered algorithm (in name order) whose magic
    /// bytes `head` starts with.
    ///
    /// Formats without magic bytes (such as LZW) are never detected.
    pub fn detect(&self, head: &[u8]) -> Option<String> {
        self.algorithms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(_, algorithm)| algorithm.matches_header(head))
            .map(|(name, _)| name.clone())
    }
}
