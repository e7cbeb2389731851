//! Type definitions and aliases

use std::net::IpAddr;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Resolver backends a probe can run against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolverKind {
    /// Platform resolver (getaddrinfo)
    System,
    /// Query explicit DNS servers directly
    NameServers { servers: Vec<IpAddr> },
}

impl ResolverKind {
    /// Get a human-readable name for this resolver
    pub fn name(&self) -> String {
        match self {
            ResolverKind::System => "system resolver".to_string(),
            ResolverKind::NameServers { servers } => {
                if servers.len() == 1 {
                    format!("DNS server {}", servers[0])
                } else {
                    let list: Vec<String> = servers.iter().map(|s| s.to_string()).collect();
                    format!("DNS servers {}", list.join(", "))
                }
            }
        }
    }
}

impl Default for ResolverKind {
    fn default() -> Self {
        ResolverKind::System
    }
}
