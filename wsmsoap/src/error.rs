//! Error taxonomy shared by every layer of the WS-Management core.

use crate::fault::SoapFault;
use thiserror::Error;

/// Result type of the WS-Management core
pub type Result<T> = std::result::Result<T, WsmanError>;

/// Errors produced while building, sending or decoding a WS-Management message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WsmanError {
    /// Bad input to envelope construction (empty resource URI, empty selector set...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation kind not recognized by the envelope engine
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Network or TLS failure, no response received
    #[error("Transport error: {0}")]
    Transport(String),

    /// The authentication handshake failed after its single retry
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Response is not well-formed XML or lacks the SOAP envelope/body
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Well-formed SOAP Fault returned by the remote endpoint
    #[error("Remote fault: {0}")]
    RemoteFault(SoapFault),

    /// The call was aborted by a caller-level deadline
    #[error("Call cancelled: {0}")]
    Cancelled(String),
}

impl WsmanError {
    pub fn configuration(message: impl Into<String>) -> Self {
        WsmanError::Configuration(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        WsmanError::MalformedResponse(message.into())
    }

    /// Returns the decoded fault when the remote endpoint answered with one
    pub fn fault(&self) -> Option<&SoapFault> {
        match self {
            WsmanError::RemoteFault(fault) => Some(fault),
            _ => None,
        }
    }

    /// True for errors raised before anything reached the wire
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            WsmanError::Configuration(_) | WsmanError::UnsupportedOperation(_)
        )
    }
}

impl From<xmltree::ParseError> for WsmanError {
    fn from(err: xmltree::ParseError) -> Self {
        WsmanError::MalformedResponse(format!("XML parse error: {}", err))
    }
}
