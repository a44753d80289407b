//! Classes du schéma CIM de la DMTF

pub mod ieee8021x;
pub mod kvm;

use serde::{Deserialize, Serialize};

pub use ieee8021x::Ieee8021xSettings;
pub use kvm::{KvmRedirection, KvmRedirectionSap};

/// `RequestStateChange_OUTPUT` of any class exposing that method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "RequestStateChange_OUTPUT", default)]
pub struct RequestStateChangeOutput {
    #[serde(rename = "ReturnValue")]
    pub return_value: u32,
}

impl RequestStateChangeOutput {
    pub fn is_success(&self) -> bool {
        self.return_value == 0
    }
}
