//! Hostname lookup for `Location` headers.

use std::{fmt::Debug, io};

/// Supplies the host name written into the `Location` header of a create response.
pub trait HostResolver: Send + Sync + Debug {
    fn hostname(&self) -> io::Result<String>;
}

/// Resolves the machine's hostname on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostResolver;

impl HostResolver for SystemHostResolver {
    fn hostname(&self) -> io::Result<String> {
        hostname::get()?
            .into_string()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "hostname is not valid UTF-8"))
    }
}

/// Always answers with a configured host.
#[derive(Debug, Clone)]
pub struct StaticHostResolver(String);

impl StaticHostResolver {
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }
}

impl HostResolver for StaticHostResolver {
    fn hostname(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_resolver() {
        let resolver = StaticHostResolver::new("api.example.org");
        assert_eq!(resolver.hostname().unwrap(), "api.example.org");
    }

    #[test]
    fn test_system_resolver_returns_a_name() {
        assert!(!SystemHostResolver.hostname().unwrap().is_empty());
    }
}
