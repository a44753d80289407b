//! Construction des enveloppes de requête WS-Management

use crate::error::{Result, WsmanError};
use crate::namespaces::{ADDRESSING, ANONYMOUS, ENUMERATION, EVENTING, PUSH_WITH_ACK, SOAP_ENVELOPE, WSMAN};
use crate::operation::Operation;
use crate::selector::SelectorSet;
use quick_xml::escape::escape;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// `MaxElements` demandé par chaque Pull
pub const PULL_MAX_ELEMENTS: u32 = 999;

/// `MaxCharacters` demandé par chaque Pull
pub const PULL_MAX_CHARACTERS: u32 = 99999;

/// `w:OperationTimeout` envoyé avec chaque requête
pub const OPERATION_TIMEOUT: &str = "PT60S";

/// Ressource visée par une requête
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddress {
    pub resource_uri: String,
    pub selectors: Option<SelectorSet>,
}

impl ResourceAddress {
    pub fn new(resource_uri: impl Into<String>) -> Self {
        Self {
            resource_uri: resource_uri.into(),
            selectors: None,
        }
    }

    pub fn with_selectors(mut self, selectors: SelectorSet) -> Self {
        self.selectors = Some(selectors);
        self
    }
}

/// Construit les enveloppes de requête et possède le compteur de MessageID
/// d'un client.
///
/// Le compteur démarre à `base` : la première enveloppe porte `base`, chaque
/// suivante la valeur précédente plus un.
#[derive(Debug)]
pub struct MessageCreator {
    next_id: AtomicU64,
}

impl Default for MessageCreator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl MessageCreator {
    pub fn new(base: u64) -> Self {
        Self {
            next_id: AtomicU64::new(base),
        }
    }

    /// MessageID que portera la prochaine enveloppe
    pub fn peek_message_id(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    fn next_message_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Produit le texte SOAP d'une enveloppe de requête.
    ///
    /// # Arguments
    ///
    /// * `operation` - Verbe à émettre
    /// * `address` - URI de ressource et sélecteurs optionnels
    /// * `extra_headers` - Éléments d'en-tête ajoutés tels quels après les sélecteurs
    /// * `body` - Fragment pour Put/Create (obligatoire) et Subscribe/Unsubscribe (optionnel)
    ///
    /// # Errors
    ///
    /// `Configuration` si l'URI de ressource est vide ou si Put/Create n'a pas
    /// de corps, `UnsupportedOperation` pour un Invoke sans nom de méthode.
    pub fn build_envelope(
        &self,
        operation: &Operation,
        address: &ResourceAddress,
        extra_headers: Option<&str>,
        body: Option<&str>,
    ) -> Result<String> {
        if address.resource_uri.is_empty() {
            return Err(WsmanError::configuration("resource URI is empty"));
        }

        let body = render_body(operation, &address.resource_uri, body)?;
        let action = operation.action_uri(&address.resource_uri);
        let message_id = self.next_message_id();

        let mut xml = String::with_capacity(1024 + body.len());
        xml.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        xml.push_str(&format!(
            r#"<Envelope xmlns="{}" xmlns:a="{}" xmlns:w="{}">"#,
            SOAP_ENVELOPE, ADDRESSING, WSMAN
        ));
        xml.push_str("<Header>");
        xml.push_str(&format!("<a:Action>{}</a:Action>", action));
        xml.push_str("<a:To>/wsman</a:To>");
        xml.push_str(&format!(
            "<w:ResourceURI>{}</w:ResourceURI>",
            escape(address.resource_uri.as_str())
        ));
        xml.push_str(&format!("<a:MessageID>{}</a:MessageID>", message_id));
        xml.push_str(&format!(
            "<a:ReplyTo><a:Address>{}</a:Address></a:ReplyTo>",
            ANONYMOUS
        ));
        xml.push_str(&format!(
            "<w:OperationTimeout>{}</w:OperationTimeout>",
            OPERATION_TIMEOUT
        ));
        if let Some(selectors) = &address.selectors {
            xml.push_str(&selectors.to_xml());
        }
        if let Some(extra) = extra_headers {
            xml.push_str(extra);
        }
        xml.push_str("</Header>");
        xml.push_str("<Body>");
        xml.push_str(&body);
        xml.push_str("</Body>");
        xml.push_str("</Envelope>");

        trace!(
            operation = %operation.kind(),
            resource_uri = %address.resource_uri,
            message_id,
            "Built WS-Management envelope"
        );

        Ok(xml)
    }
}

fn render_body(operation: &Operation, resource_uri: &str, body: Option<&str>) -> Result<String> {
    match operation {
        Operation::Get | Operation::Delete => Ok(String::new()),
        Operation::Enumerate => Ok(format!(r#"<Enumerate xmlns="{}" />"#, ENUMERATION)),
        Operation::Pull(context) => Ok(format!(
            r#"<Pull xmlns="{}"><EnumerationContext>{}</EnumerationContext><MaxElements>{}</MaxElements><MaxCharacters>{}</MaxCharacters></Pull>"#,
            ENUMERATION,
            escape(context.as_str()),
            PULL_MAX_ELEMENTS,
            PULL_MAX_CHARACTERS
        )),
        Operation::Put | Operation::Create => body.map(str::to_string).ok_or_else(|| {
            WsmanError::configuration(format!(
                "{} requires a resource representation",
                operation.kind()
            ))
        }),
        Operation::Subscribe | Operation::Unsubscribe => {
            Ok(body.map(str::to_string).unwrap_or_default())
        }
        Operation::Invoke { method, parameters } => {
            if method.is_empty() {
                return Err(WsmanError::UnsupportedOperation(
                    "Invoke without a method name".to_string(),
                ));
            }
            let params: Vec<(&str, &str)> = parameters
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            Ok(invoke_input(resource_uri, method, &params))
        }
    }
}

/// Génère le corps `<Method>_INPUT` d'une méthode de classe
///
/// Les paramètres sont des éléments simples dans le namespace de la classe,
/// dans l'ordre donné.
pub fn invoke_input(resource_uri: &str, method: &str, parameters: &[(&str, &str)]) -> String {
    let mut xml = format!(r#"<h:{}_INPUT xmlns:h="{}">"#, method, escape(resource_uri));
    for (name, value) in parameters {
        xml.push_str(&format!("<h:{}>{}</h:{}>", name, escape(*value), name));
    }
    xml.push_str(&format!("</h:{}_INPUT>", method));
    xml
}

/// Génère un corps Subscribe WS-Eventing livrant les événements à `notify_to`
pub fn subscribe_body(notify_to: &str) -> String {
    format!(
        r#"<e:Subscribe xmlns:e="{}"><e:Delivery Mode="{}"><e:NotifyTo><a:Address>{}</a:Address></e:NotifyTo></e:Delivery></e:Subscribe>"#,
        EVENTING,
        PUSH_WITH_ACK,
        escape(notify_to)
    )
}

/// Génère l'en-tête `e:Identifier` requis par Unsubscribe
pub fn subscription_identifier_header(identifier: &str) -> String {
    format!(
        r#"<e:Identifier xmlns:e="{}">{}</e:Identifier>"#,
        EVENTING,
        escape(identifier)
    )
}

/// Sérialise `value` en fragment Put/Create dans le namespace de `resource_uri`.
///
/// L'élément racine porte le nom de la classe (dernier segment de l'URI).
pub fn resource_fragment<T: Serialize>(resource_uri: &str, value: &T) -> Result<String> {
    let class = resource_uri
        .rsplit('/')
        .next()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| WsmanError::configuration("resource URI has no class name"))?;

    let xml = quick_xml::se::to_string_with_root(class, value)
        .map_err(|e| WsmanError::configuration(format!("cannot serialize {}: {}", class, e)))?;

    // "<Class" est toujours le premier token du sérialiseur
    let rest = &xml[class.len() + 1..];
    Ok(format!(r#"<{} xmlns="{}"{}"#, class, escape(resource_uri), rest))
}
