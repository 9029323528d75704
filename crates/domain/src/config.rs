use serde::{Deserialize, Serialize};

use crate::endpoint::ServerEndpoint;
use crate::errors::ForwardError;

/// One server name or an ordered list of them. Order is preserved as given;
/// nothing is deduplicated or reordered.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ServerList {
    Single(String),
    Many(Vec<String>),
}

impl ServerList {
    fn as_slice(&self) -> &[String] {
        match self {
            ServerList::Single(s) => std::slice::from_ref(s),
            ServerList::Many(list) => list,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.as_slice().iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ServerList::Single(s) => s.trim().is_empty(),
            ServerList::Many(list) => list.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Parses every entry into an endpoint, defaulting the port to 53.
    pub fn endpoints(&self) -> Result<Vec<ServerEndpoint>, ForwardError> {
        if self.is_empty() {
            return Err(ForwardError::Config(
                "at least one upstream server is required".to_string(),
            ));
        }
        self.iter().map(str::parse).collect()
    }
}

impl From<String> for ServerList {
    fn from(s: String) -> Self {
        ServerList::Single(s)
    }
}

impl From<&str> for ServerList {
    fn from(s: &str) -> Self {
        ServerList::Single(s.to_string())
    }
}

impl From<Vec<String>> for ServerList {
    fn from(list: Vec<String>) -> Self {
        ServerList::Many(list)
    }
}

impl From<Vec<&str>> for ServerList {
    fn from(list: Vec<&str>) -> Self {
        ServerList::Many(list.into_iter().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForwardConfig {
    pub servers: ServerList,

    /// Per-phase exchange timeout in milliseconds. Zero is invalid and falls
    /// back to the default.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl ForwardConfig {
    pub fn new(servers: impl Into<ServerList>) -> Self {
        Self {
            servers: servers.into(),
            query_timeout: default_query_timeout(),
        }
    }

    pub fn effective_timeout_ms(&self) -> u64 {
        if self.query_timeout == 0 {
            default_query_timeout()
        } else {
            self.query_timeout
        }
    }
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            servers: ServerList::Many(vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]),
            query_timeout: default_query_timeout(),
        }
    }
}

fn default_query_timeout() -> u64 {
    3000
}
