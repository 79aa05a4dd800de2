use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Which flavour of controller sits behind the configured URL.
///
/// UniFi OS consoles (UDM, UCG, Cloud Key Gen2+) route the Network
/// application through `/proxy/network` and authenticate at
/// `/api/auth/*`. A self-hosted Network application has neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPlatform {
    UnifiOs,
    ClassicController,
}

impl ControllerPlatform {
    /// Prefix in front of every `/api/s/{site}/...` path.
    pub fn network_prefix(self) -> &'static str {
        match self {
            Self::UnifiOs => "/proxy/network",
            Self::ClassicController => "",
        }
    }

    pub fn login_path(self) -> &'static str {
        match self {
            Self::UnifiOs => "/api/auth/login",
            Self::ClassicController => "/api/login",
        }
    }

    pub fn logout_path(self) -> &'static str {
        match self {
            Self::UnifiOs => "/api/auth/logout",
            Self::ClassicController => "/api/logout",
        }
    }

    /// Probe the controller's login endpoints.
    ///
    /// Any answer other than 404 from the console login path means UniFi
    /// OS. Otherwise the classic login path has to answer at all; a
    /// transport failure there is returned as-is.
    pub async fn detect(root: &Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;

        let console = root.join(Self::UnifiOs.login_path())?;
        debug!(url = %console, "probing for UniFi OS");
        match http.get(console).send().await {
            Ok(resp) if resp.status() != StatusCode::NOT_FOUND => return Ok(Self::UnifiOs),
            Ok(_) | Err(_) => {}
        }

        let classic = root.join(Self::ClassicController.login_path())?;
        debug!(url = %classic, "probing for a classic controller");
        http.get(classic).send().await?;
        Ok(Self::ClassicController)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::ControllerPlatform;

    #[test]
    fn unifi_os_paths_go_through_the_network_proxy() {
        let p = ControllerPlatform::UnifiOs;
        assert_eq!(p.network_prefix(), "/proxy/network");
        assert_eq!(p.login_path(), "/api/auth/login");
        assert_eq!(p.logout_path(), "/api/auth/logout");
    }

    #[test]
    fn classic_controller_has_no_prefix() {
        let p = ControllerPlatform::ClassicController;
        assert_eq!(p.network_prefix(), "");
        assert_eq!(p.login_path(), "/api/login");
        assert_eq!(p.logout_path(), "/api/logout");
    }
}
