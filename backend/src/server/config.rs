//! Runtime settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling the account service at startup.
///
/// Settings come from the environment (`ROSTER_*`), CLI flags, or a config
/// file, in OrthoConfig's usual precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Page size applied when a listing request names no usable limit.
    pub default_page_limit: Option<u64>,
    /// Email for the administrator account seeded at startup.
    pub admin_email: Option<String>,
    /// Password for the administrator account seeded at startup.
    pub admin_password: Option<String>,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured default page limit, falling back to the
    /// planner's own default.
    #[must_use]
    pub fn default_page_limit(&self) -> u64 {
        self.default_page_limit
            .unwrap_or(pagination::DEFAULT_PAGE_LIMIT)
    }

    /// The administrator credential pair, when both halves are configured.
    #[must_use]
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }
}
