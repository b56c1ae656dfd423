use std::collections::HashMap;

use crate::prelude::Result;

// Token -> hiring-source label, loaded once at startup. The label records how
// the candidate found us and is only ever used for log bookkeeping.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, String>,
}

impl TokenRegistry {
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let tokens: HashMap<String, String> = serde_yaml::from_str(&raw)?;
        Ok(TokenRegistry { tokens })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        TokenRegistry {
            tokens: pairs
                .into_iter()
                .map(|(token, label)| (token.into(), label.into()))
                .collect(),
        }
    }

    pub fn source_for(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct HireSource {
    label: String,
}

impl HireSource {
    pub fn new(label: impl Into<String>) -> Self {
        HireSource {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
