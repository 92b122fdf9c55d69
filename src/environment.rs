use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the different deployment environments the dashboard backend runs in.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development backend.
    #[default]
    Local,
    /// Staging environment for pre-production testing.
    Staging,
    /// Production environment.
    Production,
    /// Arbitrary base URL (e.g. a reverse-proxied deployment).
    Custom(String),
}

impl Environment {
    /// Returns the API base URL associated with the environment.
    pub fn api_base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8000".to_string(),
            Environment::Staging => "https://staging.dashboard.ontology.internal".to_string(),
            Environment::Production => "https://dashboard.ontology.internal".to_string(),
            Environment::Custom(url) => url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            url if url.contains("://") => Ok(Environment::Custom(s.to_string())),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Staging => write!(f, "Staging"),
            Environment::Production => write!(f, "Production"),
            Environment::Custom(url) => write!(f, "Custom({url})"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_base_url())
    }
}
