//! Formes décodées des réponses

use crate::parser::{child_text, find_child};
use crate::selector::Selector;
use serde::Serialize;
use xmltree::Element;

/// Enveloppe SOAP générique : en-tête et corps gardés en arbres XML
#[derive(Debug, Clone)]
pub struct SoapEnvelope {
    /// En-tête SOAP optionnel
    pub header: Option<SoapHeader>,

    /// Corps SOAP
    pub body: SoapBody,
}

/// En-tête SOAP
#[derive(Debug, Clone)]
pub struct SoapHeader {
    pub content: Element,
}

/// Corps SOAP
#[derive(Debug, Clone)]
pub struct SoapBody {
    pub content: Element,
}

impl SoapEnvelope {
    /// Premier élément du corps, si le corps n'est pas vide
    pub fn first_body_element(&self) -> Option<&Element> {
        self.body.content.children.iter().find_map(|n| n.as_element())
    }

    /// Vrai si le corps contient un `Fault`
    pub fn is_fault(&self) -> bool {
        self.first_body_element()
            .map(|e| e.name == "Fault")
            .unwrap_or(false)
    }
}

/// Champs WS-Addressing / WS-Management d'un en-tête de réponse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseHeader {
    pub to: String,
    pub relates_to: String,
    pub action: String,
    pub message_id: String,
    pub resource_uri: String,
}

impl ResponseHeader {
    pub fn from_element(header: &Element) -> Self {
        Self {
            to: child_text(header, "To"),
            relates_to: child_text(header, "RelatesTo"),
            action: child_text(header, "Action"),
            message_id: child_text(header, "MessageID"),
            resource_uri: child_text(header, "ResourceURI"),
        }
    }
}

/// Corps d'une réponse Enumerate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumerateResponse {
    /// Jeton opaque consommé par Pull
    pub enumeration_context: String,
}

/// Suite d'un lot Pull
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Continuation {
    /// D'autres éléments sont disponibles avec ce contexte
    More(String),
    /// `EndOfSequence` atteint
    End,
}

/// Corps d'une réponse Pull
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullResponse<T> {
    pub items: Vec<T>,
    pub continuation: Continuation,
}

impl<T> PullResponse<T> {
    pub fn is_end_of_sequence(&self) -> bool {
        self.continuation == Continuation::End
    }

    pub fn next_context(&self) -> Option<&str> {
        match &self.continuation {
            Continuation::More(context) => Some(context),
            Continuation::End => None,
        }
    }
}

/// Référence d'endpoint renvoyée par Create (`ResourceCreated`) et
/// Subscribe (`SubscriptionManager`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointReference {
    pub address: String,
    pub resource_uri: String,
    pub selectors: Vec<Selector>,
}

impl EndpointReference {
    pub fn from_element(epr: &Element) -> Self {
        let parameters = find_child(epr, "ReferenceParameters");

        let selectors = parameters
            .and_then(|p| find_child(p, "SelectorSet"))
            .map(|set| {
                set.children
                    .iter()
                    .filter_map(|n| n.as_element())
                    .filter(|e| e.name == "Selector")
                    .map(|e| {
                        Selector::new(
                            e.attributes.get("Name").cloned().unwrap_or_default(),
                            e.get_text().map(|t| t.trim().to_string()).unwrap_or_default(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            address: child_text(epr, "Address"),
            resource_uri: parameters
                .map(|p| child_text(p, "ResourceURI"))
                .unwrap_or_default(),
            selectors,
        }
    }

    /// Valeur du sélecteur nommé `name`
    pub fn selector(&self, name: &str) -> Option<&str> {
        self.selectors
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value.as_str())
    }
}

/// Corps d'une réponse décodée, selon le verbe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResponseBody<T> {
    /// Résultats de Get, Put et Invoke
    Get(T),
    Enumerate(EnumerateResponse),
    Pull(PullResponse<T>),
    Created(EndpointReference),
    Subscribed(EndpointReference),
    /// Accusé de réception sans contenu (Delete, Unsubscribe, corps Get/Put/Invoke vide)
    Empty,
}

impl<T> ResponseBody<T> {
    pub fn as_get(&self) -> Option<&T> {
        match self {
            ResponseBody::Get(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_get(self) -> Option<T> {
        match self {
            ResponseBody::Get(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_enumerate(&self) -> Option<&EnumerateResponse> {
        match self {
            ResponseBody::Enumerate(response) => Some(response),
            _ => None,
        }
    }

    pub fn as_pull(&self) -> Option<&PullResponse<T>> {
        match self {
            ResponseBody::Pull(response) => Some(response),
            _ => None,
        }
    }

    pub fn into_pull(self) -> Option<PullResponse<T>> {
        match self {
            ResponseBody::Pull(response) => Some(response),
            _ => None,
        }
    }

    pub fn as_endpoint_reference(&self) -> Option<&EndpointReference> {
        match self {
            ResponseBody::Created(epr) | ResponseBody::Subscribed(epr) => Some(epr),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }
}

/// En-tête et corps typé d'une réponse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedResponse<T> {
    pub header: ResponseHeader,
    pub body: ResponseBody<T>,
}
