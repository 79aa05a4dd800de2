// One authenticated conversation with the controller.
//
// Owned by a single request: `&mut self` everywhere, so the CSRF token
// UniFi OS hands out is a plain field rather than shared state.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::Reply;
use crate::platform::ControllerPlatform;
use crate::transport::TransportConfig;

const CSRF_HEADER: &str = "x-csrf-token";
const CSRF_ROTATED_HEADER: &str = "x-updated-csrf-token";

/// Characters of a response body quoted in error messages.
const EXCERPT_CHARS: usize = 200;

#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    root: Url,
    /// `{root}{prefix}/api/s/{site}/`, trailing slash included so
    /// endpoint paths join underneath it.
    site_base: Url,
    platform: ControllerPlatform,
    csrf: Option<HeaderValue>,
}

impl Session {
    /// Build a session with a fresh client (and cookie store) from
    /// `transport`. Nothing is sent until [`login`](Self::login).
    pub fn open(
        root: Url,
        site: &str,
        platform: ControllerPlatform,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Self::with_http(transport.build_client()?, root, site, platform)
    }

    /// Same as [`open`](Self::open) with a caller-supplied client.
    pub fn with_http(
        http: reqwest::Client,
        root: Url,
        site: &str,
        platform: ControllerPlatform,
    ) -> Result<Self, Error> {
        let site_base = site_base(&root, site, platform)?;
        Ok(Self {
            http,
            root,
            site_base,
            platform,
            csrf: None,
        })
    }

    /// Post credentials to the platform's login path. The session cookie
    /// lands in the client's store; a CSRF token, if sent, is kept for
    /// later POSTs.
    pub async fn login(&mut self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.root.join(self.platform.login_path())?;
        debug!(%url, username, "logging in");

        let resp = self
            .http
            .post(url)
            .json(&json!({
                "username": username,
                "password": password.expose_secret(),
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login returned HTTP {status}: {}", excerpt(&body)),
            });
        }

        self.remember_csrf(resp.headers());
        Ok(())
    }

    /// End the session on the controller. Errors here are worth a log
    /// line at most; the cookie dies with the client anyway.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let url = self.root.join(self.platform.logout_path())?;
        debug!(%url, "logging out");

        let resp = self.with_csrf(self.http.post(url)).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Controller {
                endpoint: self.platform.logout_path().to_owned(),
                message: format!("HTTP {status}"),
            })
        }
    }

    /// `GET` a site-scoped endpoint and unwrap its data.
    pub(crate) async fn session_get<T: DeserializeOwned>(
        &mut self,
        endpoint: &str,
    ) -> Result<Vec<T>, Error> {
        let url = self.site_base.join(endpoint)?;
        debug!(%url, "GET");
        let resp = self.http.get(url).send().await?;
        self.unwrap_reply(endpoint, resp).await
    }

    /// `POST` a JSON body to a site-scoped endpoint and unwrap its data.
    pub(crate) async fn session_post<T: DeserializeOwned>(
        &mut self,
        endpoint: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<Vec<T>, Error> {
        let url = self.site_base.join(endpoint)?;
        debug!(%url, "POST");
        let resp = self.with_csrf(self.http.post(url).json(body)).send().await?;
        self.unwrap_reply(endpoint, resp).await
    }

    async fn unwrap_reply<T: DeserializeOwned>(
        &mut self,
        endpoint: &str,
        resp: Response,
    ) -> Result<Vec<T>, Error> {
        self.remember_csrf(resp.headers());

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("{endpoint}: session expired or invalid credentials"),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Controller {
                endpoint: endpoint.to_owned(),
                message: format!("HTTP {status}: {}", excerpt(&body)),
            });
        }

        let body = resp.text().await?;
        decode_reply(endpoint, &body)
    }

    fn remember_csrf(&mut self, headers: &HeaderMap) {
        if let Some(token) = headers
            .get(CSRF_ROTATED_HEADER)
            .or_else(|| headers.get(CSRF_HEADER))
        {
            self.csrf = Some(token.clone());
        }
    }

    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.csrf {
            Some(token) => request.header(CSRF_HEADER, token.clone()),
            None => request,
        }
    }
}

fn site_base(root: &Url, site: &str, platform: ControllerPlatform) -> Result<Url, Error> {
    let root = root.as_str().trim_end_matches('/');
    let prefix = platform.network_prefix();
    Url::parse(&format!("{root}{prefix}/api/s/{site}/")).map_err(Error::from)
}

/// Turn a 2xx body into data or the error it describes.
fn decode_reply<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<Vec<T>, Error> {
    let reply: Reply<T> = serde_json::from_str(body).map_err(|e| Error::Payload {
        endpoint: endpoint.to_owned(),
        message: format!("{e} (starts with {:?})", excerpt(body)),
        body: body.to_owned(),
    })?;

    match reply {
        Reply::Envelope { meta, data } if meta.rc == "ok" => Ok(data),
        Reply::Envelope { meta, .. } => Err(Error::Controller {
            endpoint: endpoint.to_owned(),
            message: meta.msg.unwrap_or_else(|| format!("rc={}", meta.rc)),
        }),
        Reply::Console { error } if error.code == 401 => Err(Error::Authentication {
            message: error.message.unwrap_or_default(),
        }),
        Reply::Console { error } => Err(Error::Controller {
            endpoint: endpoint.to_owned(),
            message: format!(
                "UniFi OS error {}: {}",
                error.code,
                error.message.unwrap_or_default()
            ),
        }),
    }
}

fn excerpt(body: &str) -> &str {
    body.char_indices()
        .nth(EXCERPT_CHARS)
        .map_or(body, |(end, _)| &body[..end])
}
