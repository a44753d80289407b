//! Livraison des enveloppes de requête à un endpoint WS-Management

use crate::config::{AuthScheme, ClientConfig};
use crate::digest::{DigestChallenge, DigestSession};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use parking_lot::Mutex;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};
use wsmsoap::{Result, WsmanError};

/// Content-Type des requêtes WS-Management
pub const SOAP_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

/// Envoie une enveloppe de requête et retourne le texte brut de la réponse.
///
/// Les implémentations retournent le corps de toute réponse qui n'est pas un
/// échec d'authentification, quel que soit son statut HTTP : les faults SOAP
/// arrivent dans des réponses 400 et 500.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &str) -> Result<String>;
}

/// Transport HTTP(S) avec authentification Digest ou Basic
pub struct HttpTransport {
    http: Client,
    endpoint: String,
    request_uri: String,
    username: String,
    password: String,
    auth: AuthScheme,
    session: Mutex<Option<DigestSession>>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.target.is_empty() {
            return Err(WsmanError::configuration("no target host configured"));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.use_tls && config.self_signed_allowed)
            .build()
            .map_err(|e| WsmanError::configuration(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint_url(),
            request_uri: "/wsman".to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            auth: config.auth,
            session: Mutex::new(None),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn basic_authorization(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// Authorization envoyée avant tout challenge : identifiants Basic, ou
    /// session Digest mémorisée d'un appel précédent
    fn preemptive_authorization(&self) -> Option<String> {
        match self.auth {
            AuthScheme::Basic => Some(self.basic_authorization()),
            AuthScheme::Digest => self.session.lock().as_mut().map(|session| {
                session.authorization(&self.username, &self.password, "POST", &self.request_uri)
            }),
        }
    }

    fn answer_challenge(&self, challenge: DigestChallenge) -> String {
        let mut guard = self.session.lock();
        let session = guard.insert(DigestSession::new(challenge));
        session.authorization(&self.username, &self.password, "POST", &self.request_uri)
    }

    async fn post(&self, request: &str, authorization: Option<String>) -> Result<Response> {
        let mut builder = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .body(request.to_string());

        if let Some(authorization) = authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        builder.send().await.map_err(transport_error)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &str) -> Result<String> {
        debug!(endpoint = %self.endpoint, "Sending WS-Management request");

        let response = self.post(request, self.preemptive_authorization()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return read_body(response).await;
        }

        if self.auth == AuthScheme::Basic {
            warn!(endpoint = %self.endpoint, "Basic credentials rejected");
            return Err(WsmanError::Authentication(
                "server rejected the basic credentials".to_string(),
            ));
        }

        let challenge = response
            .headers()
            .get_all(WWW_AUTHENTICATE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(DigestChallenge::parse)
            .ok_or_else(|| {
                warn!(endpoint = %self.endpoint, "401 without a usable digest challenge");
                WsmanError::Authentication("401 without a usable digest challenge".to_string())
            })?;

        debug!(realm = %challenge.realm, stale = challenge.stale, "Answering digest challenge");
        let authorization = self.answer_challenge(challenge);

        let response = self.post(request, Some(authorization)).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            self.session.lock().take();
            warn!(endpoint = %self.endpoint, user = %self.username, "Digest credentials rejected");
            return Err(WsmanError::Authentication(
                "server rejected the digest credentials".to_string(),
            ));
        }

        read_body(response).await
    }
}

async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        debug!(status = %status, "Non-success HTTP status, keeping body for fault decoding");
    }
    response.text().await.map_err(transport_error)
}

fn transport_error(err: reqwest::Error) -> WsmanError {
    if err.is_timeout() {
        WsmanError::Transport(format!("request timed out: {}", err))
    } else if err.is_connect() {
        WsmanError::Transport(format!("connection failed: {}", err))
    } else {
        WsmanError::Transport(err.to_string())
    }
}
