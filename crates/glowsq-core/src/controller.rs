// ── Controller facade ──
//
// One session per call: detect (or trust) the platform, log in, read the
// three collections, log out. Nothing is cached between calls.

use tracing::{debug, info, warn};

use glowsq_api::{ControllerPlatform, Report, Session, TlsMode, TransportConfig};

use crate::aggregate::GraphOptions;
use crate::config::{ClockZone, ControllerConfig, PlatformHint, TlsVerification};
use crate::error::CoreError;
use crate::model::SiteSnapshot;
use crate::summary::Summary;

/// Entry point for consumers. Cheap to share behind an `Arc`; each call
/// opens and closes its own controller session.
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControllerConfig,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// Log in, fetch clients plus the 5-minute and daily site reports,
    /// then log out.
    ///
    /// Any login or fetch failure fails the whole call. A failed logout
    /// is only logged; the session expires on its own.
    pub async fn fetch_snapshot(&self) -> Result<SiteSnapshot, CoreError> {
        let transport = build_transport(&self.config);
        let platform = self.resolve_platform(&transport).await?;
        debug!(?platform, site = %self.config.site, "opening controller session");

        let mut session = Session::open(
            self.config.url.clone(),
            &self.config.site,
            platform,
            &transport,
        )
        .map_err(|e| self.lift(e))?;

        session
            .login(&self.config.username, &self.config.password)
            .await
            .map_err(|e| self.lift(e))?;

        let snapshot = self.read_site(&mut session).await;

        if let Err(e) = session.logout().await {
            warn!(error = %e, "logout failed, leaving session to expire");
        }

        snapshot
    }

    /// Fetch a snapshot and aggregate it for the current month.
    pub async fn summarize(
        &self,
        options: &GraphOptions,
        zone: ClockZone,
    ) -> Result<Summary, CoreError> {
        let snapshot = self.fetch_snapshot().await?;
        let summary = Summary::build(&snapshot, options, zone.current_month(), zone);
        info!(
            clients = summary.clients,
            guests = summary.guests,
            samples = snapshot.five_minutes.len(),
            days = snapshot.daily.len(),
            "summary built"
        );
        Ok(summary)
    }

    async fn read_site(&self, session: &mut Session) -> Result<SiteSnapshot, CoreError> {
        let clients = session.stations().await.map_err(|e| self.lift(e))?;
        let five_minutes = session
            .recent_report(Report::FiveMinutes)
            .await
            .map_err(|e| self.lift(e))?;
        let daily = session
            .recent_report(Report::Daily)
            .await
            .map_err(|e| self.lift(e))?;

        Ok(SiteSnapshot {
            clients: clients.into_iter().map(Into::into).collect(),
            five_minutes: five_minutes.into_iter().map(Into::into).collect(),
            daily: daily.into_iter().map(Into::into).collect(),
        })
    }

    async fn resolve_platform(
        &self,
        transport: &TransportConfig,
    ) -> Result<ControllerPlatform, CoreError> {
        match self.config.platform {
            PlatformHint::UnifiOs => Ok(ControllerPlatform::UnifiOs),
            PlatformHint::Classic => Ok(ControllerPlatform::ClassicController),
            PlatformHint::Auto => ControllerPlatform::detect(&self.config.url, transport)
                .await
                .map_err(|e| self.lift(e)),
        }
    }

    /// Translate an API error, filling in the configured timeout.
    fn lift(&self, err: glowsq_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            },
            other => other,
        }
    }
}

/// Build a [`TransportConfig`] from the controller configuration.
fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
