use crate::config::Config;
use crate::error::AppResult;

/// Host process for a single bar presentation over a list of lines.
pub struct App {
    pub config: Config,
    items: Vec<String>,
    initial_query: Option<String>,
}

impl App {
    pub fn new(items: Vec<String>) -> AppResult<Self> {
        let config = Config::load()?;
        Ok(Self::new_with_config(items, config))
    }

    pub fn new_with_config(items: Vec<String>, config: Config) -> Self {
        Self {
            config,
            items,
            initial_query: None,
        }
    }

    pub fn with_initial_query(mut self, query: Option<String>) -> Self {
        self.initial_query = query;
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub(crate) fn initial_query(&self) -> Option<String> {
        self.initial_query.clone()
    }
}
