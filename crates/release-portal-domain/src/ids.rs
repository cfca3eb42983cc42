//! Identifier Generator
//!
//! Identifiers are a readable slug of the entity's name plus a distinguishing
//! tick, optionally prefixed by a scope (`{scope}-{slug}-{tick}`). The
//! generator is injected so tests can use [`SequentialIdGenerator`] and get
//! deterministic ids.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::errors::{DomainError, DomainResult};

/// Longest slug kept in an identifier; long descriptions are cut at a word
const MAX_SLUG_LEN: usize = 48;

/// Capability to mint unique identifiers
pub trait IdGenerator: Send + Sync {
    /// Generate an identifier for an entity called `human_name`.
    ///
    /// # Errors
    /// `InvalidArgument` if `human_name` has no characters to slug.
    fn generate(&self, scope: &str, human_name: &str) -> DomainResult<String>;
}

/// Lowercase, whitespace-collapsed slug of `name`.
///
/// Alphanumerics are kept, whitespace, `-` and `_` become single separators,
/// everything else is dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        }
    }

    truncate_slug(slug)
}

fn truncate_slug(slug: String) -> String {
    if slug.chars().count() <= MAX_SLUG_LEN {
        return slug;
    }
    let cut: String = slug.chars().take(MAX_SLUG_LEN).collect();
    match cut.rfind('-') {
        Some(idx) if idx > 0 => cut[..idx].to_string(),
        _ => cut,
    }
}

fn compose(scope: &str, human_name: &str, tick: u64) -> DomainResult<String> {
    let slug = slugify(human_name);
    if slug.is_empty() {
        return Err(DomainError::invalid_argument(
            "name",
            "must contain at least one letter or digit",
        ));
    }

    let scope = scope.trim();
    if scope.is_empty() {
        Ok(format!("{}-{}", slug, tick))
    } else {
        Ok(format!("{}-{}-{}", scope, slug, tick))
    }
}

/// Wall-clock backed generator.
///
/// The tick is the current time in milliseconds, bumped past the previous
/// tick when two ids are minted in the same millisecond, so ids are strictly
/// increasing for the lifetime of the generator.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last_tick: AtomicU64,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_tick(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut last = self.last_tick.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self.last_tick.compare_exchange_weak(
                last,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(observed) => last = observed,
            }
        }
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn generate(&self, scope: &str, human_name: &str) -> DomainResult<String> {
        // Validate before consuming a tick
        if slugify(human_name).is_empty() {
            return compose(scope, human_name, 0);
        }
        compose(scope, human_name, self.next_tick())
    }
}

/// Deterministic generator: ticks are 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `start`
    pub fn starting_at(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self, scope: &str, human_name: &str) -> DomainResult<String> {
        if slugify(human_name).is_empty() {
            return compose(scope, human_name, 0);
        }
        let tick = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        compose(scope, human_name, tick)
    }
}
