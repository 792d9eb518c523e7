//! Host-side symbol lookup and draw assembly
//!
//! The host captures or rasterizes symbols on its own schedule. The engine
//! only asks for them by payload key when assembling a frame; a symbol that
//! is not ready yet just means that particle is not drawn this frame.

use crate::engine::Engine;
use crate::particle::PayloadKey;
use burst_core::{ParticleId, Transform2D, Vec2};
use std::collections::HashMap;

/// Pull-based lookup from payload key to something the host can draw
pub trait SymbolResolver {
    type Symbol;

    fn resolve(&self, key: &PayloadKey) -> Option<Self::Symbol>;
}

/// A renderable the host has captured: an opaque handle plus its size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSymbol {
    pub handle: u64,
    pub size: Vec2,
}

/// Mutable key → symbol cache the host fills as captures complete
#[derive(Debug, Clone)]
pub struct SymbolCache<S> {
    symbols: HashMap<PayloadKey, S>,
}

impl<S> SymbolCache<S> {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: PayloadKey, symbol: S) -> Option<S> {
        self.symbols.insert(key, symbol)
    }

    pub fn remove(&mut self, key: &PayloadKey) -> Option<S> {
        self.symbols.remove(key)
    }

    pub fn contains(&self, key: &PayloadKey) -> bool {
        self.symbols.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}

impl<S> Default for SymbolCache<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> SymbolResolver for SymbolCache<S> {
    type Symbol = S;

    fn resolve(&self, key: &PayloadKey) -> Option<S> {
        self.symbols.get(key).cloned()
    }
}

impl<F, S> SymbolResolver for F
where
    F: Fn(&PayloadKey) -> Option<S>,
{
    type Symbol = S;

    fn resolve(&self, key: &PayloadKey) -> Option<S> {
        self(key)
    }
}

/// One particle ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem<S> {
    pub id: ParticleId,
    pub key: PayloadKey,
    pub transform: Transform2D,
    pub symbol: S,
}

impl Engine {
    /// Pair every live particle with its resolved symbol, in spawn order.
    ///
    /// Particles whose symbol is unresolved are skipped for this frame only;
    /// they stay live and are drawn once the host resolves them.
    pub fn draw_list<R: SymbolResolver>(&self, resolver: &R) -> Vec<DrawItem<R::Symbol>> {
        let mut items = Vec::with_capacity(self.len());
        for p in self.particles() {
            match resolver.resolve(p.key()) {
                Some(symbol) => items.push(DrawItem {
                    id: p.id(),
                    key: p.key().clone(),
                    transform: *p.transform(),
                    symbol,
                }),
                None => log::trace!("[{}] symbol {} not ready", self.config().name, p.key()),
            }
        }
        items
    }
}
