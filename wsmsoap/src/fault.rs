//! Faults SOAP 1.2 renvoyés par les endpoints WS-Management

use crate::namespaces::{ADDRESSING, SOAP_ENVELOPE, WSMAN, WSMAN_FAULT_ACTION};
use crate::parser::{child_text, find_child};
use serde::Serialize;
use std::fmt;
use xmltree::{Element, XMLNode};

/// Fault décodé depuis le corps d'une réponse
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SoapFault {
    /// Code du fault (ex: "a:Sender", "a:Receiver")
    pub code: String,

    /// Sous-code WS-Management (ex: "b:InvalidSelectors")
    pub subcode: Option<String>,

    /// Raison lisible
    pub reason: String,

    /// Texte de l'élément Detail, s'il existe
    pub detail: Option<String>,
}

impl SoapFault {
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            subcode: None,
            reason: reason.into(),
            detail: None,
        }
    }

    /// Décode un élément `Fault`.
    ///
    /// La structure SOAP 1.2 (`Code/Value`, `Code/Subcode/Value`, `Reason/Text`)
    /// est lue d'abord ; `faultcode`/`faultstring` SOAP 1.1 sont acceptés sinon.
    pub fn from_element(fault: &Element) -> Self {
        let code_elem = find_child(fault, "Code");

        let code = code_elem
            .map(|c| child_text(c, "Value"))
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| child_text(fault, "faultcode"));

        let subcode = code_elem
            .and_then(|c| find_child(c, "Subcode"))
            .map(|s| child_text(s, "Value"))
            .filter(|s| !s.is_empty());

        let reason = find_child(fault, "Reason")
            .map(|r| child_text(r, "Text"))
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| child_text(fault, "faultstring"));

        let detail = find_child(fault, "Detail")
            .or_else(|| find_child(fault, "detail"))
            .map(collect_text)
            .filter(|d| !d.is_empty());

        Self {
            code,
            subcode,
            reason,
            detail,
        }
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(subcode) = &self.subcode {
            write!(f, " ({})", subcode)?;
        }
        write!(f, ": {}", self.reason)
    }
}

fn collect_text(elem: &Element) -> String {
    let mut parts = Vec::new();
    gather(elem, &mut parts);
    parts.join(" ")
}

fn gather(elem: &Element, parts: &mut Vec<String>) {
    for child in &elem.children {
        match child {
            XMLNode::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(text.to_string());
                }
            }
            XMLNode::Element(e) => gather(e, parts),
            _ => {}
        }
    }
}

fn text_element(name: &str, text: &str) -> Element {
    let mut elem = Element::new(name);
    elem.children.push(XMLNode::Text(text.to_string()));
    elem
}

/// Crée une enveloppe de fault SOAP 1.2 WS-Management
///
/// # Arguments
///
/// * `code` - Code du fault (ex: "s:Sender")
/// * `subcode` - Sous-code WS-Management optionnel (ex: "w:InvalidSelectors")
/// * `reason` - Raison lisible
pub fn build_soap_fault(
    code: &str,
    subcode: Option<&str>,
    reason: &str,
) -> Result<String, xmltree::Error> {
    let mut code_elem = Element::new("s:Code");
    code_elem
        .children
        .push(XMLNode::Element(text_element("s:Value", code)));
    if let Some(subcode) = subcode {
        let mut subcode_elem = Element::new("s:Subcode");
        subcode_elem
            .children
            .push(XMLNode::Element(text_element("s:Value", subcode)));
        code_elem.children.push(XMLNode::Element(subcode_elem));
    }

    let mut text = text_element("s:Text", reason);
    text.attributes
        .insert("xml:lang".to_string(), "en-US".to_string());
    let mut reason_elem = Element::new("s:Reason");
    reason_elem.children.push(XMLNode::Element(text));

    let mut fault = Element::new("s:Fault");
    fault.children.push(XMLNode::Element(code_elem));
    fault.children.push(XMLNode::Element(reason_elem));

    let mut body = Element::new("s:Body");
    body.children.push(XMLNode::Element(fault));

    let mut header = Element::new("s:Header");
    header
        .children
        .push(XMLNode::Element(text_element("a:Action", WSMAN_FAULT_ACTION)));

    let mut envelope = Element::new("s:Envelope");
    envelope
        .attributes
        .insert("xmlns:s".to_string(), SOAP_ENVELOPE.to_string());
    envelope
        .attributes
        .insert("xmlns:a".to_string(), ADDRESSING.to_string());
    envelope
        .attributes
        .insert("xmlns:w".to_string(), WSMAN.to_string());
    envelope.children.push(XMLNode::Element(header));
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new().write_document_declaration(true);
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_soap_envelope;

    #[test]
    fn test_build_fault_with_subcode() {
        let xml = build_soap_fault("s:Sender", Some("w:InvalidSelectors"), "Bad selector").unwrap();

        assert!(xml.contains("<s:Value>s:Sender</s:Value>"));
        assert!(xml.contains("<s:Subcode>"));
        assert!(xml.contains("w:InvalidSelectors"));
        assert!(xml.contains("Bad selector"));
        assert!(xml.contains(SOAP_ENVELOPE));
    }

    #[test]
    fn test_fault_from_element() {
        let xml = build_soap_fault("s:Receiver", Some("w:InternalError"), "Boom").unwrap();
        let envelope = parse_soap_envelope(&xml).unwrap();
        let fault_elem = envelope.first_body_element().unwrap();

        let fault = SoapFault::from_element(fault_elem);
        assert_eq!(fault.code, "s:Receiver");
        assert_eq!(fault.subcode.as_deref(), Some("w:InternalError"));
        assert_eq!(fault.reason, "Boom");
        assert_eq!(fault.detail, None);
    }

    #[test]
    fn test_soap_11_fault_fallback() {
        let xml = r#"<?xml version="1.0"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Client</faultcode>
      <faultstring>Invalid Action</faultstring>
      <detail><code>42</code></detail>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;
        let envelope = parse_soap_envelope(xml).unwrap();
        let fault = SoapFault::from_element(envelope.first_body_element().unwrap());

        assert_eq!(fault.code, "soap:Client");
        assert_eq!(fault.reason, "Invalid Action");
        assert_eq!(fault.detail.as_deref(), Some("42"));
    }

    #[test]
    fn test_display() {
        let mut fault = SoapFault::new("s:Sender", "Access denied");
        assert_eq!(fault.to_string(), "s:Sender: Access denied");

        fault.subcode = Some("w:AccessDenied".to_string());
        assert_eq!(fault.to_string(), "s:Sender (w:AccessDenied): Access denied");
    }
}
