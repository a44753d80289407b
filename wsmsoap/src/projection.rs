//! Projections JSON et YAML des valeurs décodées.
//!
//! Tout type `Serialize` est projeté : les champs gardent leur ordre de
//! déclaration et leurs noms passent en minuscules.

use serde::Serialize;
use serde_json::{Map, Value};

/// Projections textuelles pour l'inspection et les logs
pub trait Projection {
    /// Projection JSON
    ///
    /// # Panics
    ///
    /// Panique si la valeur n'est pas représentable en JSON (maps à clés
    /// non textuelles), ce qu'aucune forme décodée ne produit.
    fn to_json(&self) -> String;

    /// Projection YAML
    ///
    /// # Panics
    ///
    /// Mêmes conditions que [`Projection::to_json`].
    fn to_yaml(&self) -> String;
}

impl<T: Serialize + ?Sized> Projection for T {
    fn to_json(&self) -> String {
        let value = project(self);
        serde_json::to_string(&value).expect("a JSON value always serializes")
    }

    fn to_yaml(&self) -> String {
        let value = project(self);
        serde_yaml::to_string(&value).expect("a JSON value always serializes as YAML")
    }
}

fn project<T: Serialize + ?Sized>(value: &T) -> Value {
    let value = serde_json::to_value(value).expect("decoded shapes are representable as JSON");
    lowercase_keys(value)
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut folded = Map::with_capacity(map.len());
            for (key, value) in map {
                folded.insert(key.to_lowercase(), lowercase_keys(value));
            }
            Value::Object(folded)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{Continuation, EnumerateResponse, PullResponse};

    #[derive(Serialize, Clone)]
    struct Capabilities {
        #[serde(rename = "InstanceID")]
        instance_id: String,
        #[serde(rename = "IDER")]
        ider: bool,
        #[serde(rename = "BIOSReflash")]
        bios_reflash: bool,
        #[serde(rename = "PlatformErase")]
        platform_erase: u32,
        #[serde(rename = "Note")]
        note: Option<String>,
    }

    fn sample() -> Capabilities {
        Capabilities {
            instance_id: "boot 0".to_string(),
            ider: true,
            bios_reflash: false,
            platform_erase: 0,
            note: None,
        }
    }

    #[test]
    fn test_json_keeps_declaration_order_and_folds_case() {
        assert_eq!(
            sample().to_json(),
            r#"{"instanceid":"boot 0","ider":true,"biosreflash":false,"platformerase":0,"note":null}"#
        );
    }

    #[test]
    fn test_yaml_projection() {
        assert_eq!(
            sample().to_yaml(),
            "instanceid: boot 0\nider: true\nbiosreflash: false\nplatformerase: 0\nnote: null\n"
        );
    }

    #[test]
    fn test_projection_is_deterministic() {
        let value = sample();
        assert_eq!(value.to_json(), value.clone().to_json());
        assert_eq!(value.to_yaml(), value.to_yaml());
    }

    #[test]
    fn test_nested_shapes() {
        let pull = PullResponse {
            items: vec![sample()],
            continuation: Continuation::End,
        };
        let json = pull.to_json();
        assert!(json.starts_with(r#"{"items":[{"instanceid":"#));
        assert!(json.ends_with(r#""continuation":"End"}"#));

        let enumerate = EnumerateResponse::default();
        assert_eq!(enumerate.to_json(), r#"{"enumeration_context":""}"#);
        assert_eq!(enumerate.to_yaml(), "enumeration_context: ''\n");
    }

    #[test]
    fn test_empty_sequence() {
        let pull: PullResponse<Capabilities> = PullResponse {
            items: Vec::new(),
            continuation: Continuation::More("ctx".to_string()),
        };
        assert_eq!(pull.to_json(), r#"{"items":[],"continuation":{"more":"ctx"}}"#);
    }
}
