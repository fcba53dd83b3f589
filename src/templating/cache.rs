//! Compiled template cache for interactive editing.
//!
//! The editor recompiles on every keystroke, and most keystrokes revisit a
//! source the cache has already seen (undo, toggling a conditional, switching
//! tabs). This cache keeps a bounded number of compiled templates so those
//! revisits skip compilation.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::TemplateOptions;
use super::error::TemplateError;
use super::renderer::{CompiledTemplate, compile_with};

/// Default number of compiled templates kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Cache key for a compiled template.
///
/// Uniquely identifies a compiled template based on:
/// - The directive source (hashed for efficient comparison)
/// - The compile options that change the generated template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TemplateCacheKey {
    source_hash: u64,
    source_len: usize,
    strict: bool,
    escape_html: bool,
}

impl TemplateCacheKey {
    pub(crate) fn new(source: &str, options: &TemplateOptions) -> Self {
        let source_hash = {
            let mut hasher = DefaultHasher::new();
            source.hash(&mut hasher);
            hasher.finish()
        };

        Self {
            source_hash,
            source_len: source.len(),
            strict: options.strict,
            escape_html: options.escape_html,
        }
    }
}

/// Bounded cache of compiled templates.
///
/// Entries are evicted oldest-first once `capacity` is reached. Failed
/// compilations are never cached, so fixing a template always recompiles.
#[derive(Debug)]
pub struct TemplateCache {
    entries: HashMap<TemplateCacheKey, Arc<CompiledTemplate>>,
    /// Insertion order, oldest first
    order: VecDeque<TemplateCacheKey>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl TemplateCache {
    /// Create a cache holding at most `capacity` templates (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the compiled form of `source`, compiling it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates compilation errors from [`compile_with`].
    pub fn get_or_compile(
        &mut self,
        source: &str,
        options: &TemplateOptions,
    ) -> Result<Arc<CompiledTemplate>, TemplateError> {
        let key = TemplateCacheKey::new(source, options);

        if let Some(template) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(Arc::clone(template));
        }

        self.misses += 1;
        let template = Arc::new(compile_with(source, options)?);
        self.insert(key, Arc::clone(&template));
        Ok(template)
    }

    fn insert(&mut self, key: TemplateCacheKey, template: Arc<CompiledTemplate>) {
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::trace!("Evicted compiled template from cache");
        }

        self.entries.insert(key, template);
        self.order.push_back(key);
    }

    /// Clear all cached templates and statistics
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics as `(hits, misses)`
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Calculate hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}
