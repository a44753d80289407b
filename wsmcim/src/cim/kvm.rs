//! `CIM_KVMRedirectionSAP` : point d'accès au service de redirection KVM

use crate::class::CIM_KVM_REDIRECTION_SAP;
use crate::cim::RequestStateChangeOutput;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use wsmclient::{Response, Result, Service, WsmanClient};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "CIM_KVMRedirectionSAP", default)]
pub struct KvmRedirectionSap {
    #[serde(rename = "CreationClassName")]
    pub creation_class_name: String,

    #[serde(rename = "ElementName")]
    pub element_name: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "SystemCreationClassName")]
    pub system_creation_class_name: String,

    #[serde(rename = "SystemName")]
    pub system_name: String,

    #[serde(rename = "EnabledState")]
    pub enabled_state: u32,

    #[serde(rename = "RequestedState")]
    pub requested_state: u32,

    #[serde(rename = "KVMProtocol")]
    pub kvm_protocol: u32,
}

/// Valeurs de `RequestedState` acceptées par le service KVM
pub mod kvm_state {
    pub const ENABLED: u32 = 2;
    pub const DISABLED: u32 = 3;
    pub const ENABLED_BUT_OFFLINE: u32 = 6;
}

pub fn service(client: Arc<WsmanClient>) -> Service<KvmRedirectionSap> {
    CIM_KVM_REDIRECTION_SAP.service(client)
}

#[async_trait]
pub trait KvmRedirection {
    /// Active ou désactive la redirection KVM ; `ReturnValue` 0 signifie succès
    async fn request_state_change(
        &self,
        requested_state: u32,
    ) -> Result<Response<RequestStateChangeOutput>>;
}

#[async_trait]
impl KvmRedirection for Service<KvmRedirectionSap> {
    async fn request_state_change(
        &self,
        requested_state: u32,
    ) -> Result<Response<RequestStateChangeOutput>> {
        debug!(requested_state, "KVM redirection state change");
        let state = requested_state.to_string();
        self.invoke("RequestStateChange", None, &[("RequestedState", state.as_str())])
            .await
    }
}
