use anyhow::{Context, Result};
use std::sync::Arc;

use crate::{
    env::config::FetchConfig,
    pipeline::{fetch::Fetcher, highlight::GrammarRegistry},
};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
    pub grammars: Arc<GrammarRegistry>,
}

impl AppState {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config).context("Failed to build HTTP client")?;
        let grammars = GrammarRegistry::new()?;
        Ok(Self::with_parts(fetcher, grammars))
    }

    pub fn with_parts(fetcher: Fetcher, grammars: GrammarRegistry) -> Self {
        Self {
            fetcher,
            grammars: Arc::new(grammars),
        }
    }
}
