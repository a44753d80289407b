//! Errors of a client call, carrying the raw exchange available at the failure point

use serde::Serialize;
use thiserror::Error;
use wsmsoap::WsmanError;

/// Raw envelopes of one call, exactly as they went on and came off the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawExchange {
    /// Request envelope, empty when the call failed before one was built
    pub xml_input: String,

    /// Response text, empty when nothing was received
    pub xml_output: String,
}

impl RawExchange {
    pub fn request(xml_input: impl Into<String>) -> Self {
        Self {
            xml_input: xml_input.into(),
            xml_output: String::new(),
        }
    }

    pub fn with_response(mut self, xml_output: impl Into<String>) -> Self {
        self.xml_output = xml_output.into();
        self
    }
}

/// Failed call: the error kind plus the raw text gathered before it occurred
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source}")]
pub struct CallError {
    #[source]
    pub source: WsmanError,
    pub exchange: RawExchange,
}

impl CallError {
    pub fn new(source: WsmanError, exchange: RawExchange) -> Self {
        Self { source, exchange }
    }

    /// Error raised before any envelope was built
    pub fn local(source: WsmanError) -> Self {
        Self::new(source, RawExchange::default())
    }

    pub fn kind(&self) -> &WsmanError {
        &self.source
    }

    pub fn into_inner(self) -> WsmanError {
        self.source
    }
}

impl From<WsmanError> for CallError {
    fn from(source: WsmanError) -> Self {
        Self::local(source)
    }
}

/// Result type of client calls
pub type Result<T> = std::result::Result<T, CallError>;

#[cfg(test)]
mod tests {
    use super::*;
    use wsmsoap::SoapFault;

    #[test]
    fn test_display_is_the_underlying_error() {
        let err = CallError::new(
            WsmanError::Transport("connection refused".to_string()),
            RawExchange::request("<Envelope/>"),
        );
        assert_eq!(err.to_string(), "Transport error: connection refused");
        assert_eq!(err.exchange.xml_input, "<Envelope/>");
        assert!(err.exchange.xml_output.is_empty());
    }

    #[test]
    fn test_remote_fault_keeps_response_text() {
        let fault = SoapFault::new("s:Sender", "denied");
        let err = CallError::new(
            WsmanError::RemoteFault(fault.clone()),
            RawExchange::request("req").with_response("resp"),
        );
        assert_eq!(err.kind().fault(), Some(&fault));
        assert_eq!(err.exchange.xml_output, "resp");
    }

    #[test]
    fn test_local_error_has_empty_exchange() {
        let err: CallError = WsmanError::configuration("empty resource URI").into();
        assert!(err.kind().is_local());
        assert_eq!(err.exchange, RawExchange::default());
    }
}
