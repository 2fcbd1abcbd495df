use tracing::{info, warn};

use crate::domain::commands::access::{VerifyAccessCommand, VerifyAccessResult};
use crate::domain::errors::{DomainError, DomainResult};

/// Checks a typed password against the configured one
///
/// This only answers "is the password right". It does not protect any
/// other route.
#[derive(Clone, Default)]
pub struct AccessGateService {
    password: Option<String>,
}

impl AccessGateService {
    /// A blank password disables the gate
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|p| !p.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.password.is_some()
    }

    pub fn verify(&self, command: VerifyAccessCommand) -> DomainResult<VerifyAccessResult> {
        let expected = self
            .password
            .as_deref()
            .ok_or_else(|| DomainError::NotFound("Access gate is not configured".to_string()))?;

        if command.password.trim().is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }

        if constant_time_eq(command.password.as_bytes(), expected.as_bytes()) {
            info!("Access gate: password accepted");
            Ok(VerifyAccessResult {
                success: true,
                message: "Access granted".to_string(),
            })
        } else {
            warn!("Access gate: wrong password");
            Ok(VerifyAccessResult {
                success: false,
                message: "Incorrect password".to_string(),
            })
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify(service: &AccessGateService, password: &str) -> DomainResult<VerifyAccessResult> {
        service.verify(VerifyAccessCommand {
            password: password.to_string(),
        })
    }

    #[test]
    fn test_correct_and_wrong_password() {
        let service = AccessGateService::new(Some("hunter2".to_string()));
        assert!(verify(&service, "hunter2").unwrap().success);
        assert!(!verify(&service, "hunter3").unwrap().success);
        assert!(!verify(&service, "hunter").unwrap().success);
    }

    #[test]
    fn test_blank_password_is_invalid() {
        let service = AccessGateService::new(Some("hunter2".to_string()));
        assert!(matches!(verify(&service, "  "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_unconfigured_gate() {
        let service = AccessGateService::new(Some(String::new()));
        assert!(!service.is_enabled());
        assert!(matches!(verify(&service, "anything"), Err(DomainError::NotFound(_))));
    }
}
