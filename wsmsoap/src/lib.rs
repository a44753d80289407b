//! # wsmsoap - WS-Management SOAP messages
//!
//! Ce crate construit les enveloppes de requête WS-Management et décode leurs
//! réponses pour les ressources de style CIM (classes AMT, IPS, CIM).
//!
//! ## Fonctionnalités
//!
//! - Enveloppes pour Get, Put, Create, Delete, Enumerate, Pull, Subscribe,
//!   Unsubscribe et les méthodes propres aux classes
//! - MessageID par client, strictement croissant
//! - Ensembles de sélecteurs ordonnés
//! - Décodage des réponses dans des formes `serde` fournies par l'appelant
//! - Décodage et construction des faults SOAP 1.2
//! - Projections JSON / YAML de toute valeur décodée
//!
//! ## Architecture
//!
//! - [`MessageCreator`] : moteur de templates d'enveloppe
//! - [`decode_response`] : décodeur de réponses
//! - [`SoapFault`] : faults distants
//! - [`Projection`] : projections JSON / YAML
//!
//! ## Example
//!
//! ```ignore
//! use wsmsoap::{MessageCreator, Operation, OperationKind, ResourceAddress, decode_response};
//!
//! let creator = MessageCreator::new(0);
//! let request = creator.build_envelope(
//!     &Operation::Get,
//!     &ResourceAddress::new("http://intel.com/wbem/wscim/1/amt-schema/1/AMT_BootCapabilities"),
//!     None,
//!     None,
//! )?;
//!
//! // ... envoyer `request`, recevoir `response` ...
//! let decoded = decode_response::<BootCapabilities>(&response, OperationKind::Get)?;
//! println!("{}", decoded.to_yaml());
//! ```

mod builder;
mod envelope;
mod error;
mod fault;
mod operation;
mod parser;
mod projection;
mod selector;

pub use builder::{
    MessageCreator, OPERATION_TIMEOUT, PULL_MAX_CHARACTERS, PULL_MAX_ELEMENTS, ResourceAddress,
    invoke_input, resource_fragment, subscribe_body, subscription_identifier_header,
};
pub use envelope::{
    Continuation, DecodedResponse, EndpointReference, EnumerateResponse, PullResponse,
    ResponseBody, ResponseHeader, SoapBody, SoapEnvelope, SoapHeader,
};
pub use error::{Result, WsmanError};
pub use fault::{SoapFault, build_soap_fault};
pub use operation::{Operation, OperationKind, actions};
pub use parser::{decode_element, decode_response, parse_soap_envelope};
pub use projection::Projection;
pub use selector::{Selector, SelectorSet};

/// URI des namespaces utilisés sur le réseau
pub mod namespaces {
    /// SOAP 1.2 envelope
    pub const SOAP_ENVELOPE: &str = "http://www.w3.org/2003/05/soap-envelope";

    /// WS-Addressing
    pub const ADDRESSING: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing";

    /// Adresse ReplyTo anonyme
    pub const ANONYMOUS: &str =
        "http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous";

    /// WS-Management
    pub const WSMAN: &str = "http://schemas.dmtf.org/wbem/wsman/1/wsman.xsd";

    /// WS-Enumeration
    pub const ENUMERATION: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration";

    /// WS-Transfer
    pub const TRANSFER: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer";

    /// WS-Eventing
    pub const EVENTING: &str = "http://schemas.xmlsoap.org/ws/2004/08/eventing";

    /// Mode de livraison d'événements push-with-ack
    pub const PUSH_WITH_ACK: &str = "http://schemas.dmtf.org/wbem/wsman/1/wsman/PushWithAck";

    /// Action des faults WS-Management
    pub const WSMAN_FAULT_ACTION: &str = "http://schemas.dmtf.org/wbem/wsman/1/wsman/fault";
}
