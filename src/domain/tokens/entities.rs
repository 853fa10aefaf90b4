use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;

pub type ChainId = u64;

/// Value Object - token contract address, compared case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct TokenAddress(String);

impl TokenAddress {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenAddress {
    fn from(value: &str) -> Self {
        Self(value.to_lowercase())
    }
}

impl From<String> for TokenAddress {
    fn from(value: String) -> Self {
        Self(value.to_lowercase())
    }
}

/// Token metadata needed by the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub address: TokenAddress,
    pub symbol: String,
    #[serde(default)]
    pub base_symbol: Option<String>,
    #[serde(default)]
    pub is_wrapped: bool,
    #[serde(default)]
    pub is_stable: bool,
    #[serde(default)]
    pub is_native: bool,
    /// The exchange's index-tracking synthetic dollar (USDG)
    #[serde(default)]
    pub is_synthetic_usd: bool,
}

impl Token {
    pub fn new(address: &str, symbol: &str) -> Self {
        Self {
            address: TokenAddress::from(address),
            symbol: symbol.to_string(),
            base_symbol: None,
            is_wrapped: false,
            is_stable: false,
            is_native: false,
            is_synthetic_usd: false,
        }
    }

    pub fn stable(mut self) -> Self {
        self.is_stable = true;
        self
    }

    pub fn native(mut self) -> Self {
        self.is_native = true;
        self
    }

    pub fn synthetic_usd(mut self) -> Self {
        self.is_synthetic_usd = true;
        self
    }

    pub fn wrapping(mut self, base_symbol: &str) -> Self {
        self.is_wrapped = true;
        self.base_symbol = Some(base_symbol.to_string());
        self
    }

    /// WETH charts as ETH.
    pub fn display_symbol(&self) -> &str {
        match (&self.base_symbol, self.is_wrapped) {
            (Some(base), true) => base,
            _ => &self.symbol,
        }
    }

    pub fn market_name(&self) -> String {
        format!("{}_USD", self.display_symbol())
    }
}

/// Lookup of token metadata per chain.
pub trait TokenRegistry {
    fn token(&self, chain_id: ChainId, address: &TokenAddress) -> Option<Rc<Token>>;

    /// Tokens of a chain in listing order
    fn tokens(&self, chain_id: ChainId) -> Vec<Rc<Token>>;

    /// The chain's designated stable reference asset: its first stable token.
    fn stable_reference(&self, chain_id: ChainId) -> Option<Rc<Token>> {
        self.tokens(chain_id).into_iter().find(|t| t.is_stable)
    }
}

/// In-memory registry built from a static token list.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenRegistry {
    chains: HashMap<ChainId, Vec<Rc<Token>>>,
}

impl StaticTokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chain(mut self, chain_id: ChainId, tokens: Vec<Token>) -> Self {
        self.chains.insert(chain_id, tokens.into_iter().map(Rc::new).collect());
        self
    }

    /// Parse `{"<chainId>": [token, ...]}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, Vec<Token>> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for (chain, tokens) in raw {
            let chain_id = chain.parse::<ChainId>().map_err(<serde_json::Error as serde::de::Error>::custom)?;
            registry = registry.with_chain(chain_id, tokens);
        }
        Ok(registry)
    }
}

impl TokenRegistry for StaticTokenRegistry {
    fn token(&self, chain_id: ChainId, address: &TokenAddress) -> Option<Rc<Token>> {
        self.chains.get(&chain_id)?.iter().find(|t| &t.address == address).cloned()
    }

    fn tokens(&self, chain_id: ChainId) -> Vec<Rc<Token>> {
        self.chains.get(&chain_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_token_charts_under_base_symbol() {
        let weth = Token::new("0xWETH", "WETH").wrapping("ETH");
        assert_eq!(weth.display_symbol(), "ETH");
        assert_eq!(weth.market_name(), "ETH_USD");
        assert_eq!(weth.address.value(), "0xweth");
    }

    #[test]
    fn registry_loads_from_json() {
        let json = r#"{"42161": [
            {"address": "0xAAA", "symbol": "USDC", "isStable": true},
            {"address": "0xBBB", "symbol": "WETH", "baseSymbol": "ETH", "isWrapped": true}
        ]}"#;
        let registry = StaticTokenRegistry::from_json(json).unwrap();
        let weth = registry.token(42161, &TokenAddress::from("0xbbb")).unwrap();
        assert_eq!(weth.display_symbol(), "ETH");
        assert_eq!(registry.stable_reference(42161).unwrap().symbol, "USDC");
        assert!(registry.tokens(1).is_empty());
    }
}
