use std::sync::Arc;
use tracing::{debug, error};

use crate::storage::traits::Connection;

/// Result of a readiness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Unavailable { error: String },
}

/// Liveness and readiness reporting
#[derive(Clone)]
pub struct HealthService {
    connection: Arc<dyn Connection>,
    version: &'static str,
}

impl HealthService {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Ping the database
    pub async fn readiness(&self) -> Readiness {
        match self.connection.ping().await {
            Ok(()) => {
                debug!("Readiness check: database up");
                Readiness::Ready
            }
            Err(e) => {
                error!("Readiness check failed: {:#}", e);
                Readiness::Unavailable {
                    error: format!("{:#}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryConnection;

    #[tokio::test]
    async fn test_in_memory_connection_is_ready() {
        let service = HealthService::new(Arc::new(InMemoryConnection::new()));
        assert_eq!(service.readiness().await, Readiness::Ready);
        assert!(!service.version().is_empty());
    }
}
