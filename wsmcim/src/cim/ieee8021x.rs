//! `CIM_IEEE8021xSettings`: wired 802.1x profile

use crate::class::CIM_IEEE8021X_SETTINGS;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wsmclient::{Service, WsmanClient};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "CIM_IEEE8021xSettings", default)]
pub struct Ieee8021xSettings {
    #[serde(rename = "ElementName")]
    pub element_name: String,

    #[serde(rename = "InstanceID")]
    pub instance_id: String,

    #[serde(rename = "AuthenticationProtocol")]
    pub authentication_protocol: Option<u32>,

    #[serde(rename = "RoamingIdentity")]
    pub roaming_identity: Option<String>,

    #[serde(rename = "ServerCertificateName")]
    pub server_certificate_name: Option<String>,

    #[serde(rename = "ServerCertificateNameComparison")]
    pub server_certificate_name_comparison: Option<u32>,

    #[serde(rename = "Username")]
    pub username: Option<String>,

    #[serde(rename = "Domain")]
    pub domain: Option<String>,
}

pub fn service(client: Arc<WsmanClient>) -> Service<Ieee8021xSettings> {
    CIM_IEEE8021X_SETTINGS.service(client)
}
