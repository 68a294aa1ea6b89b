//! Dash pattern normalization

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;

/// Cache key: pattern and scale compared by bit pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DashKey {
    pattern: SmallVec<[u64; 8]>,
    scale: u64,
}

impl DashKey {
    fn new(pattern: &[f64], scale: f64) -> Self {
        Self {
            pattern: pattern.iter().map(|v| v.to_bits()).collect(),
            scale: scale.to_bits(),
        }
    }
}

/// Turns raw linetype patterns into render-ready dash sequences.
///
/// Results are memoized by (pattern, scale) value for the resolver's lifetime.
#[derive(Debug)]
pub struct DashPatternResolver {
    min_dash_length: f64,
    cache: FxHashMap<DashKey, Arc<[f32]>>,
    computations: usize,
}

impl DashPatternResolver {
    pub fn new(min_dash_length: f64) -> Self {
        Self {
            min_dash_length,
            cache: FxHashMap::default(),
            computations: 0,
        }
    }

    /// Even-length pattern with every element scaled and floored at the
    /// minimum dash length. The last element of an odd-length pattern is
    /// dropped.
    pub fn resolve(&mut self, pattern: &[f64], scale: f64) -> Arc<[f32]> {
        let key = DashKey::new(pattern, scale);
        if let Some(dashes) = self.cache.get(&key) {
            return Arc::clone(dashes);
        }

        let end = pattern.len() - pattern.len() % 2;
        let dashes: Arc<[f32]> = pattern[..end]
            .iter()
            .map(|dash| (dash * scale).max(self.min_dash_length) as f32)
            .collect();
        tracing::trace!("Dash pattern {:?} x {} -> {:?}", pattern, scale, dashes);
        self.computations += 1;
        self.cache.insert(key, Arc::clone(&dashes));
        dashes
    }

    pub fn min_dash_length(&self) -> f64 {
        self.min_dash_length
    }

    /// Number of cache misses so far
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
