//! Ensembles de sélecteurs identifiant une instance d'une classe de ressource

use crate::error::{Result, WsmanError};
use quick_xml::escape::escape;
use serde::Serialize;

/// Un `w:Selector` (attribut Name, valeur texte)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    pub name: String,
    pub value: String,
}

impl Selector {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Liste ordonnée et jamais vide de sélecteurs.
///
/// L'ordre donné est conservé : certains récepteurs comparent les sélecteurs
/// par position. Les noms dupliqués ne sont pas vérifiés.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorSet(Vec<Selector>);

impl SelectorSet {
    pub fn new(selectors: Vec<Selector>) -> Result<Self> {
        if selectors.is_empty() {
            return Err(WsmanError::configuration(
                "a selector set needs at least one selector",
            ));
        }
        Ok(Self(selectors))
    }

    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self(vec![Selector::new(name, value)])
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|(name, value)| Selector::new(*name, *value))
                .collect(),
        )
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }

    /// Génère l'élément d'en-tête `w:SelectorSet`
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<w:SelectorSet>");
        for selector in &self.0 {
            xml.push_str(&format!(
                "<w:Selector Name=\"{}\">{}</w:Selector>",
                escape(selector.name.as_str()),
                escape(selector.value.as_str())
            ));
        }
        xml.push_str("</w:SelectorSet>");
        xml
    }
}
