//! Client WS-Management : construire, envoyer et décoder un appel

use crate::config::ClientConfig;
use crate::error::{CallError, RawExchange, Result};
use crate::transport::{HttpTransport, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use wsmsoap::{
    DecodedResponse, MessageCreator, Operation, OperationKind, ResourceAddress, ResponseBody,
    ResponseHeader, WsmanError, decode_response,
};

/// Résultat décodé d'un appel, avec les enveloppes brutes qui l'ont produit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<T> {
    #[serde(skip)]
    pub exchange: RawExchange,
    pub header: ResponseHeader,
    pub body: ResponseBody<T>,
}

impl<T> Response<T> {
    fn new(exchange: RawExchange, decoded: DecodedResponse<T>) -> Self {
        Self {
            exchange,
            header: decoded.header,
            body: decoded.body,
        }
    }

    pub fn xml_input(&self) -> &str {
        &self.exchange.xml_input
    }

    pub fn xml_output(&self) -> &str {
        &self.exchange.xml_output
    }
}

/// Client lié à un endpoint.
///
/// Possède le compteur de MessageID : chaque appel sur le même client porte
/// un identifiant strictement supérieur au précédent. Partageable via `Arc`.
pub struct WsmanClient {
    creator: MessageCreator,
    transport: Arc<dyn Transport>,
    log_messages: bool,
}

impl WsmanClient {
    /// Client HTTP construit depuis `config`
    pub fn new(config: &ClientConfig) -> wsmsoap::Result<Self> {
        let transport = HttpTransport::new(config)?;
        debug!(endpoint = %transport.endpoint(), "WS-Management client created");

        let mut client = Self::with_transport(Arc::new(transport), config.message_id_base);
        client.log_messages = config.log_messages;
        Ok(client)
    }

    /// Client sur un transport quelconque, premier MessageID `message_id_base`
    pub fn with_transport(transport: Arc<dyn Transport>, message_id_base: u64) -> Self {
        Self {
            creator: MessageCreator::new(message_id_base),
            transport,
            log_messages: false,
        }
    }

    pub fn with_message_logging(mut self, enabled: bool) -> Self {
        self.log_messages = enabled;
        self
    }

    /// MessageID que portera le prochain appel
    pub fn next_message_id(&self) -> u64 {
        self.creator.peek_message_id()
    }

    /// Construit l'enveloppe, l'envoie et décode la réponse en `T`.
    ///
    /// La requête et la réponse brutes accompagnent le résultat et toute
    /// erreur levée après la construction de l'enveloppe.
    pub async fn call<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        address: &ResourceAddress,
        extra_headers: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response<T>> {
        let request = self.build(operation, address, extra_headers, body)?;
        self.send_and_decode(operation.kind(), request).await
    }

    /// Comme [`WsmanClient::call`], abandonné avec `Cancelled` après `deadline`.
    ///
    /// L'enveloppe est construite avant le délai : l'erreur `Cancelled`
    /// transporte la requête envoyée, sans réponse.
    pub async fn call_with_deadline<T: DeserializeOwned>(
        &self,
        deadline: Duration,
        operation: &Operation,
        address: &ResourceAddress,
        extra_headers: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response<T>> {
        let request = self.build(operation, address, extra_headers, body)?;

        match tokio::time::timeout(
            deadline,
            self.send_and_decode(operation.kind(), request.clone()),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                debug!(
                    operation = %operation.kind(),
                    deadline = ?deadline,
                    "WS-Management call cancelled"
                );
                Err(CallError::new(
                    WsmanError::Cancelled(format!(
                        "{} on {} exceeded {:?}",
                        operation.kind(),
                        address.resource_uri,
                        deadline
                    )),
                    RawExchange::request(request),
                ))
            }
        }
    }

    /// Construit l'enveloppe et consomme un MessageID
    fn build(
        &self,
        operation: &Operation,
        address: &ResourceAddress,
        extra_headers: Option<&str>,
        body: Option<&str>,
    ) -> Result<String> {
        let request = self
            .creator
            .build_envelope(operation, address, extra_headers, body)
            .map_err(CallError::local)?;

        debug!(
            operation = %operation.kind(),
            resource_uri = %address.resource_uri,
            "WS-Management call"
        );
        if self.log_messages {
            info!(xml = %request, "WS-Management request");
        }

        Ok(request)
    }

    async fn send_and_decode<T: DeserializeOwned>(
        &self,
        kind: OperationKind,
        request: String,
    ) -> Result<Response<T>> {
        let exchange = RawExchange::request(request);
        let response = match self.transport.send(&exchange.xml_input).await {
            Ok(response) => response,
            Err(err) => return Err(CallError::new(err, exchange)),
        };

        if self.log_messages {
            info!(xml = %response, "WS-Management response");
        }

        let exchange = exchange.with_response(response);
        match decode_response::<T>(&exchange.xml_output, kind) {
            Ok(decoded) => Ok(Response::new(exchange, decoded)),
            Err(err) => {
                debug!(error = %err, "WS-Management call failed");
                Err(CallError::new(err, exchange))
            }
        }
    }
}
