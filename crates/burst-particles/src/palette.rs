//! Symbol palettes: the ordered set of contents a trigger cycles through

use serde::{Deserialize, Serialize};

/// Opaque descriptor of one renderable symbol (an emoji, a glyph, an image
/// name). The engine only ever uses its index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolDescriptor {
    pub name: String,
}

impl SymbolDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Ordered list of symbols with stable indices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    symbols: Vec<SymbolDescriptor>,
}

impl Palette {
    pub fn new(symbols: Vec<SymbolDescriptor>) -> Self {
        Self { symbols }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: names.into_iter().map(SymbolDescriptor::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SymbolDescriptor> {
        self.symbols.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolDescriptor> {
        self.symbols.iter()
    }

    /// Symbol index for a change token: `(token - 1) mod len`.
    ///
    /// An empty palette behaves as a palette of one.
    pub fn index_for_token(&self, token: i64) -> usize {
        let count = self.symbols.len().max(1) as i128;
        (i128::from(token) - 1).rem_euclid(count) as usize
    }
}
