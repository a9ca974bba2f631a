use serde::{Deserialize, Serialize};

pub const DEFAULT_SITE_NAME: &str = "Hostpanel";
pub const DEFAULT_API_BASE: &str = "/api/client";
pub const DEFAULT_ADMIN_BASE: &str = "/admin";

/// Lines of console output kept per server before the oldest are dropped.
pub const SOCKET_CONSOLE_LIMIT: usize = 500;

/// Site-wide settings the host page exposes as `window.SiteConfiguration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfiguration {
    pub name: String,
    pub api_base: String,
    pub admin_base: String,
}

impl Default for SiteConfiguration {
    fn default() -> Self {
        SiteConfiguration {
            name: DEFAULT_SITE_NAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            admin_base: DEFAULT_ADMIN_BASE.to_string(),
        }
    }
}

impl SiteConfiguration {
    pub fn server_endpoint(&self, server: &str) -> String {
        format!("{}/servers/{}", self.api_base.trim_end_matches('/'), server)
    }

    pub fn server_resource(&self, server: &str, resource: &str) -> String {
        format!("{}/{}", self.server_endpoint(server), resource.trim_start_matches('/'))
    }

    pub fn admin_server_url(&self, internal_id: u32) -> String {
        format!("{}/servers/view/{}", self.admin_base.trim_end_matches('/'), internal_id)
    }
}
