//! Name resolution backends used by the probe

use crate::{
    error::{AppError, Result},
    types::ResolverKind,
};
use async_trait::async_trait;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use trust_dns_resolver::{
    config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts},
    TokioAsyncResolver,
};

/// A facility that turns a hostname into addresses
///
/// Implementations perform exactly one attempt per call. Deadlines are
/// enforced by the caller, so a lookup may block for as long as the
/// underlying facility does.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve a domain name to IP addresses
    async fn lookup(&self, domain: &str) -> Result<Vec<IpAddr>>;

    /// Human-readable name of this resolver
    fn name(&self) -> String;
}

/// Platform resolver backed by `getaddrinfo`
///
/// Only address resolution is requested; no service or port is passed.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn lookup(&self, domain: &str) -> Result<Vec<IpAddr>> {
        let host = domain.to_string();

        // getaddrinfo blocks, so it runs off the async worker
        let lookup = tokio::task::spawn_blocking(move || dns_lookup::lookup_host(&host))
            .await
            .map_err(|e| AppError::internal(format!("Resolver task failed: {}", e)))?;

        lookup.map_err(|e| AppError::dns_resolution(e.to_string()))
    }

    fn name(&self) -> String {
        ResolverKind::System.name()
    }
}

/// Resolver that queries explicit DNS servers directly
#[derive(Clone)]
pub struct NameServerResolver {
    servers: Vec<IpAddr>,
    resolver: TokioAsyncResolver,
}

impl NameServerResolver {
    /// Create a resolver for the given servers with a single attempt per query
    pub fn new(servers: &[IpAddr], timeout: Duration) -> Result<Self> {
        if servers.is_empty() {
            return Err(AppError::validation("No DNS servers provided"));
        }

        let mut config = ResolverConfig::new();

        for &server in servers {
            let socket_addr = SocketAddr::new(server, 53);

            config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Udp));
            // TCP fallback for truncated answers
            config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Tcp));
        }

        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        // Every probe must hit the network
        opts.cache_size = 0;

        Ok(Self {
            servers: servers.to_vec(),
            resolver: TokioAsyncResolver::tokio(config, opts),
        })
    }
}

#[async_trait]
impl Resolver for NameServerResolver {
    async fn lookup(&self, domain: &str) -> Result<Vec<IpAddr>> {
        let response = self.resolver.lookup_ip(domain).await?;

        Ok(response.iter().collect())
    }

    fn name(&self) -> String {
        ResolverKind::NameServers {
            servers: self.servers.clone(),
        }
        .name()
    }
}

/// Build the resolver for a configured backend
pub fn create_resolver(kind: &ResolverKind, timeout: Duration) -> Result<Arc<dyn Resolver>> {
    match kind {
        ResolverKind::System => Ok(Arc::new(SystemResolver::new())),
        ResolverKind::NameServers { servers } => {
            Ok(Arc::new(NameServerResolver::new(servers, timeout)?))
        }
    }
}
