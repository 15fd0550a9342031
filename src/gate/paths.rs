use crate::config::GateConfig;

/// Which gating rules apply to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Login,
    Protected,
    Public,
}

impl PathClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathClass::Login => "login",
            PathClass::Protected => "protected",
            PathClass::Public => "public",
        }
    }
}

/// Static prefix table. Classification looks at nothing but the path.
#[derive(Debug, Clone)]
pub struct PathTable {
    login_prefix: String,
    protected_prefixes: Vec<String>,
}

impl PathTable {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            login_prefix: config.login_path.clone(),
            protected_prefixes: config.protected_prefixes.clone(),
        }
    }

    /// Login is matched before protected, so a path is never both.
    pub fn classify(&self, path: &str) -> PathClass {
        if path.starts_with(&self.login_prefix) {
            PathClass::Login
        } else if self
            .protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            PathClass::Protected
        } else {
            PathClass::Public
        }
    }
}
