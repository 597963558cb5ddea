use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogEntry {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// The fixed set of currencies a user can pick from.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

const DEFAULT_ENTRIES: [(&str, &str); 9] = [
    ("BTC", "Bitcoin"),
    ("ETH", "Ethereum"),
    ("XRP", "Ripple"),
    ("BNB", "Binance Coin"),
    ("ADA", "Cardano"),
    ("XLM", "Stellar"),
    ("DOGE", "Dogecoin"),
    ("BCH", "Bitcoin Cash"),
    ("KSM", "Kusama"),
];

impl Catalog {
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.iter().any(|e| e.symbol == symbol)
    }

    /// Symbol pre-selected when the page first loads.
    pub fn default_symbol(&self) -> Option<&'static str> {
        self.entries.first().map(|e| e.symbol)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|(symbol, name)| CatalogEntry { symbol, name })
                .collect(),
        }
    }
}
