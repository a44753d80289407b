//! Décodage des enveloppes de réponse WS-Management

use crate::envelope::{
    Continuation, DecodedResponse, EndpointReference, EnumerateResponse, PullResponse,
    ResponseBody, ResponseHeader, SoapBody, SoapEnvelope, SoapHeader,
};
use crate::error::{Result, WsmanError};
use crate::fault::SoapFault;
use crate::operation::OperationKind;
use serde::de::DeserializeOwned;
use tracing::debug;
use xmltree::{Element, XMLNode};

/// Premier enfant dont le nom local est `name`
pub(crate) fn find_child<'a>(elem: &'a Element, name: &str) -> Option<&'a Element> {
    elem.children
        .iter()
        .filter_map(|n| n.as_element())
        .find(|e| e.name == name)
}

/// Texte nettoyé de l'enfant `name`, vide si l'enfant ou son texte manque
pub(crate) fn child_text(elem: &Element, name: &str) -> String {
    find_child(elem, name)
        .and_then(|e| e.get_text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// Parse l'enveloppe commune.
///
/// Échoue seulement si le texte n'est pas du XML bien formé, si la racine
/// n'est pas `Envelope` ou si `Body` manque ; le contenu du corps n'est pas lu.
pub fn parse_soap_envelope(xml: &str) -> Result<SoapEnvelope> {
    let root = Element::parse(xml.as_bytes())?;

    if root.name != "Envelope" {
        return Err(WsmanError::malformed(format!(
            "expected a SOAP Envelope, found <{}>",
            root.name
        )));
    }

    let header = find_child(&root, "Header").map(|e| SoapHeader { content: e.clone() });

    let body = find_child(&root, "Body")
        .map(|e| SoapBody { content: e.clone() })
        .ok_or_else(|| WsmanError::malformed("missing SOAP Body"))?;

    Ok(SoapEnvelope { header, body })
}

/// Décode la réponse à une opération de type `kind` dans la forme `T`.
///
/// `T` sert aux résultats de Get, Put et Invoke et aux éléments d'un Pull.
/// Un corps contenant un Fault SOAP donne [`WsmanError::RemoteFault`].
///
/// Un corps bien formé mais incomplet n'est pas une erreur : corps vide
/// pour Get/Put/Invoke -> `Empty`, contexte d'énumération vide, Pull sans
/// éléments terminé par `End`, référence Create/Subscribe par défaut.
pub fn decode_response<T: DeserializeOwned>(
    xml: &str,
    kind: OperationKind,
) -> Result<DecodedResponse<T>> {
    let envelope = parse_soap_envelope(xml)?;

    let header = envelope
        .header
        .as_ref()
        .map(|h| ResponseHeader::from_element(&h.content))
        .unwrap_or_default();

    if let Some(fault) = envelope.first_body_element().filter(|e| e.name == "Fault") {
        let fault = SoapFault::from_element(fault);
        debug!(code = %fault.code, reason = %fault.reason, "Response carries a SOAP fault");
        return Err(WsmanError::RemoteFault(fault));
    }

    let body = match kind {
        OperationKind::Get | OperationKind::Put | OperationKind::Invoke => {
            match envelope.first_body_element() {
                Some(elem) => ResponseBody::Get(decode_element(elem)?),
                None => ResponseBody::Empty,
            }
        }
        OperationKind::Enumerate => ResponseBody::Enumerate(decode_enumerate(&envelope)),
        OperationKind::Pull => ResponseBody::Pull(decode_pull(&envelope)?),
        OperationKind::Create => ResponseBody::Created(
            find_child(&envelope.body.content, "ResourceCreated")
                .map(EndpointReference::from_element)
                .unwrap_or_default(),
        ),
        OperationKind::Subscribe => ResponseBody::Subscribed(
            find_child(&envelope.body.content, "SubscribeResponse")
                .and_then(|r| find_child(r, "SubscriptionManager"))
                .map(EndpointReference::from_element)
                .unwrap_or_default(),
        ),
        OperationKind::Delete | OperationKind::Unsubscribe => ResponseBody::Empty,
    };

    Ok(DecodedResponse { header, body })
}

/// Décode un élément en `T`, les éléments optionnels absents prennent leur défaut
pub fn decode_element<T: DeserializeOwned>(elem: &Element) -> Result<T> {
    let mut elem = elem.clone();
    strip_nil_elements(&mut elem);

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new().write_document_declaration(false);
    elem.write_with_config(&mut buf, config)
        .map_err(|e| WsmanError::malformed(format!("cannot re-emit <{}>: {}", elem.name, e)))?;

    let xml = String::from_utf8_lossy(&buf);
    quick_xml::de::from_str(&xml).map_err(|e| {
        WsmanError::malformed(format!("<{}> does not match the expected shape: {}", elem.name, e))
    })
}

/// Retire les éléments `xsi:nil="true"`, lus ensuite comme absents
fn strip_nil_elements(elem: &mut Element) {
    elem.children
        .retain(|node| !node.as_element().is_some_and(is_nil));
    for child in elem.children.iter_mut() {
        if let XMLNode::Element(child) = child {
            strip_nil_elements(child);
        }
    }
}

// xmltree garde le nom local des attributs : `xsi:nil` devient `nil`
fn is_nil(elem: &Element) -> bool {
    elem.attributes
        .get("nil")
        .is_some_and(|v| v.trim() == "true")
}

fn decode_enumerate(envelope: &SoapEnvelope) -> EnumerateResponse {
    EnumerateResponse {
        enumeration_context: find_child(&envelope.body.content, "EnumerateResponse")
            .map(|r| child_text(r, "EnumerationContext"))
            .unwrap_or_default(),
    }
}

fn decode_pull<T: DeserializeOwned>(envelope: &SoapEnvelope) -> Result<PullResponse<T>> {
    // Sans PullResponse : aucun élément, fin de séquence
    let Some(response) = find_child(&envelope.body.content, "PullResponse") else {
        return Ok(PullResponse {
            items: Vec::new(),
            continuation: Continuation::End,
        });
    };

    let items = match find_child(response, "Items") {
        Some(items) => items
            .children
            .iter()
            .filter_map(|n| n.as_element())
            .map(decode_element)
            .collect::<Result<Vec<T>>>()?,
        None => Vec::new(),
    };

    let continuation = if find_child(response, "EndOfSequence").is_some() {
        Continuation::End
    } else {
        match find_child(response, "EnumerationContext") {
            Some(_) => Continuation::More(child_text(response, "EnumerationContext")),
            None => Continuation::End,
        }
    };

    Ok(PullResponse {
        items,
        continuation,
    })
}
