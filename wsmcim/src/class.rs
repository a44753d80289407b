//! Table des classes de ressource connues de ce crate

use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use wsmclient::{Service, WsmanClient};
use wsmsoap::OperationKind;

/// Schéma d'une classe, qui fixe le préfixe de son URI de ressource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    Amt,
    Ips,
    Cim,
}

impl Schema {
    pub fn base_uri(&self) -> &'static str {
        match self {
            Schema::Amt => "http://intel.com/wbem/wscim/1/amt-schema/1/",
            Schema::Ips => "http://intel.com/wbem/wscim/1/ips-schema/1/",
            Schema::Cim => "http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/",
        }
    }
}

/// Une classe de ressource : nom, schéma et opérations acceptées
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceClass {
    pub name: &'static str,
    pub schema: Schema,
    pub operations: &'static [OperationKind],
    /// Méthodes propres à la classe, appelées par Invoke
    pub methods: &'static [&'static str],
}

impl ResourceClass {
    pub fn resource_uri(&self) -> String {
        format!("{}{}", self.schema.base_uri(), self.name)
    }

    /// Lie la classe à `client`, les instances se décodant en `T`.
    ///
    /// Le service n'accepte que les verbes et méthodes de la table de la classe.
    pub fn service<T: DeserializeOwned>(&self, client: Arc<WsmanClient>) -> Service<T> {
        Service::new(client, self.resource_uri()).restricted_to(self.operations, self.methods)
    }
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const READ_ONLY: &[OperationKind] = &[
    OperationKind::Get,
    OperationKind::Enumerate,
    OperationKind::Pull,
];

pub const AMT_BOOT_CAPABILITIES: ResourceClass = ResourceClass {
    name: "AMT_BootCapabilities",
    schema: Schema::Amt,
    operations: READ_ONLY,
    methods: &[],
};

pub const IPS_ALARM_CLOCK_OCCURRENCE: ResourceClass = ResourceClass {
    name: "IPS_AlarmClockOccurrence",
    schema: Schema::Ips,
    operations: &[
        OperationKind::Get,
        OperationKind::Enumerate,
        OperationKind::Pull,
        OperationKind::Delete,
    ],
    methods: &[],
};

pub const CIM_KVM_REDIRECTION_SAP: ResourceClass = ResourceClass {
    name: "CIM_KVMRedirectionSAP",
    schema: Schema::Cim,
    operations: &[
        OperationKind::Get,
        OperationKind::Enumerate,
        OperationKind::Pull,
        OperationKind::Invoke,
    ],
    methods: &["RequestStateChange"],
};

pub const CIM_IEEE8021X_SETTINGS: ResourceClass = ResourceClass {
    name: "CIM_IEEE8021xSettings",
    schema: Schema::Cim,
    operations: READ_ONLY,
    methods: &[],
};

/// Toutes les classes du crate
pub const CATALOG: &[ResourceClass] = &[
    AMT_BOOT_CAPABILITIES,
    IPS_ALARM_CLOCK_OCCURRENCE,
    CIM_KVM_REDIRECTION_SAP,
    CIM_IEEE8021X_SETTINGS,
];

/// Cherche une classe par son nom, sensible à la casse
pub fn lookup(name: &str) -> Option<&'static ResourceClass> {
    CATALOG.iter().find(|class| class.name == name)
}
