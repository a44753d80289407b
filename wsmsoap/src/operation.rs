//! Verbes WS-Management et leurs URI d'action

use crate::error::WsmanError;
use std::fmt;
use std::str::FromStr;

/// URI d'action des verbes standards
pub mod actions {
    pub const GET: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Get";
    pub const PUT: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Put";
    pub const CREATE: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Create";
    pub const DELETE: &str = "http://schemas.xmlsoap.org/ws/2004/09/transfer/Delete";
    pub const ENUMERATE: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration/Enumerate";
    pub const PULL: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration/Pull";
    pub const SUBSCRIBE: &str = "http://schemas.xmlsoap.org/ws/2004/08/eventing/Subscribe";
    pub const UNSUBSCRIBE: &str = "http://schemas.xmlsoap.org/ws/2004/08/eventing/Unsubscribe";
}

/// Opération émise sur une ressource, choisie à chaque appel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Get,
    Put,
    Create,
    Delete,
    Enumerate,
    /// Lot suivant d'une énumération ; porte le contexte opaque
    Pull(String),
    Subscribe,
    Unsubscribe,
    /// Méthode propre à la classe (ex: `RequestStateChange`) avec ses paramètres nommés
    Invoke {
        method: String,
        parameters: Vec<(String, String)>,
    },
}

impl Operation {
    pub fn pull(context: impl Into<String>) -> Self {
        Operation::Pull(context.into())
    }

    pub fn invoke(method: impl Into<String>, parameters: &[(&str, &str)]) -> Self {
        Operation::Invoke {
            method: method.into(),
            parameters: parameters
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Get => OperationKind::Get,
            Operation::Put => OperationKind::Put,
            Operation::Create => OperationKind::Create,
            Operation::Delete => OperationKind::Delete,
            Operation::Enumerate => OperationKind::Enumerate,
            Operation::Pull(_) => OperationKind::Pull,
            Operation::Subscribe => OperationKind::Subscribe,
            Operation::Unsubscribe => OperationKind::Unsubscribe,
            Operation::Invoke { .. } => OperationKind::Invoke,
        }
    }

    /// URI d'action placée dans l'en-tête `a:Action`.
    ///
    /// Pour Invoke, l'action dépend de la classe : `<resource_uri>/<Method>`.
    pub fn action_uri(&self, resource_uri: &str) -> String {
        match self {
            Operation::Get => actions::GET.to_string(),
            Operation::Put => actions::PUT.to_string(),
            Operation::Create => actions::CREATE.to_string(),
            Operation::Delete => actions::DELETE.to_string(),
            Operation::Enumerate => actions::ENUMERATE.to_string(),
            Operation::Pull(_) => actions::PULL.to_string(),
            Operation::Subscribe => actions::SUBSCRIBE.to_string(),
            Operation::Unsubscribe => actions::UNSUBSCRIBE.to_string(),
            Operation::Invoke { method, .. } => format!("{}/{}", resource_uri, method),
        }
    }
}

/// Vue sans données de [`Operation`], utilisée pour choisir la forme de réponse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Get,
    Put,
    Create,
    Delete,
    Enumerate,
    Pull,
    Subscribe,
    Unsubscribe,
    Invoke,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Put => "Put",
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Enumerate => "Enumerate",
            Self::Pull => "Pull",
            Self::Subscribe => "Subscribe",
            Self::Unsubscribe => "Unsubscribe",
            Self::Invoke => "Invoke",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = WsmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Get" => Ok(Self::Get),
            "Put" => Ok(Self::Put),
            "Create" => Ok(Self::Create),
            "Delete" => Ok(Self::Delete),
            "Enumerate" => Ok(Self::Enumerate),
            "Pull" => Ok(Self::Pull),
            "Subscribe" => Ok(Self::Subscribe),
            "Unsubscribe" => Ok(Self::Unsubscribe),
            "Invoke" => Ok(Self::Invoke),
            other => Err(WsmanError::UnsupportedOperation(other.to_string())),
        }
    }
}
