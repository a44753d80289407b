//! Liaison générique d'une classe de ressource aux verbes WS-Management

use crate::client::{Response, WsmanClient};
use crate::error::{CallError, RawExchange, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;
use wsmsoap::{
    Operation, OperationKind, ResourceAddress, SelectorSet, WsmanError, resource_fragment,
    subscribe_body, subscription_identifier_header,
};

/// Verbes d'une classe de ressource dont les instances se décodent en `T`.
///
/// Sans restriction, tous les verbes sont permis. Une fois restreint par
/// [`Service::restricted_to`], un verbe ou une méthode hors table échoue en
/// `UnsupportedOperation` avant la construction de l'enveloppe.
pub struct Service<T> {
    client: Arc<WsmanClient>,
    resource_uri: String,
    operations: Option<&'static [OperationKind]>,
    methods: Option<&'static [&'static str]>,
    _shape: PhantomData<fn() -> T>,
}

impl<T> Clone for Service<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            resource_uri: self.resource_uri.clone(),
            operations: self.operations,
            methods: self.methods,
            _shape: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Service<T> {
    pub fn new(client: Arc<WsmanClient>, resource_uri: impl Into<String>) -> Self {
        Self {
            client,
            resource_uri: resource_uri.into(),
            operations: None,
            methods: None,
            _shape: PhantomData,
        }
    }

    /// Limite le service aux verbes `operations` et aux méthodes `methods`
    pub fn restricted_to(
        mut self,
        operations: &'static [OperationKind],
        methods: &'static [&'static str],
    ) -> Self {
        self.operations = Some(operations);
        self.methods = Some(methods);
        self
    }

    /// Vrai si la table du service accepte `operation`
    pub fn allows(&self, operation: &Operation) -> bool {
        let kind_allowed = self
            .operations
            .is_none_or(|operations| operations.contains(&operation.kind()));

        match operation {
            Operation::Invoke { method, .. } => {
                kind_allowed
                    && self
                        .methods
                        .is_none_or(|methods| methods.iter().any(|m| *m == method.as_str()))
            }
            _ => kind_allowed,
        }
    }

    fn check(&self, operation: &Operation) -> Result<()> {
        if self.allows(operation) {
            return Ok(());
        }

        let refused = match operation {
            Operation::Invoke { method, .. } => format!("{} {}", operation.kind(), method),
            _ => operation.kind().to_string(),
        };
        debug!(
            resource_uri = %self.resource_uri,
            operation = %refused,
            "Operation refused by the class table"
        );
        Err(CallError::local(WsmanError::UnsupportedOperation(format!(
            "{} is not supported by {}",
            refused, self.resource_uri
        ))))
    }

    pub fn resource_uri(&self) -> &str {
        &self.resource_uri
    }

    pub fn client(&self) -> &Arc<WsmanClient> {
        &self.client
    }

    fn address(&self, selectors: Option<SelectorSet>) -> ResourceAddress {
        let address = ResourceAddress::new(self.resource_uri.clone());
        match selectors {
            Some(selectors) => address.with_selectors(selectors),
            None => address,
        }
    }

    async fn call(
        &self,
        operation: Operation,
        selectors: Option<SelectorSet>,
        extra_headers: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response<T>> {
        self.check(&operation)?;
        self.client
            .call(&operation, &self.address(selectors), extra_headers, body)
            .await
    }

    /// Récupère une instance
    pub async fn get(&self, selectors: Option<SelectorSet>) -> Result<Response<T>> {
        self.call(Operation::Get, selectors, None, None).await
    }

    /// Remplace une instance par un fragment XML, envoyé tel quel
    pub async fn put(&self, selectors: Option<SelectorSet>, fragment: &str) -> Result<Response<T>> {
        self.call(Operation::Put, selectors, None, Some(fragment)).await
    }

    /// Remplace une instance par une valeur sérialisée de la classe
    pub async fn put_value<V: Serialize>(
        &self,
        selectors: Option<SelectorSet>,
        value: &V,
    ) -> Result<Response<T>> {
        let fragment = resource_fragment(&self.resource_uri, value)?;
        self.put(selectors, &fragment).await
    }

    /// Crée une instance ; le corps est la référence `ResourceCreated`
    pub async fn create(&self, fragment: &str) -> Result<Response<T>> {
        self.call(Operation::Create, None, None, Some(fragment)).await
    }

    pub async fn create_value<V: Serialize>(&self, value: &V) -> Result<Response<T>> {
        let fragment = resource_fragment(&self.resource_uri, value)?;
        self.create(&fragment).await
    }

    pub async fn delete(&self, selectors: Option<SelectorSet>) -> Result<Response<T>> {
        self.call(Operation::Delete, selectors, None, None).await
    }

    /// Ouvre une énumération ; le corps porte son contexte
    pub async fn enumerate(&self) -> Result<Response<T>> {
        self.call(Operation::Enumerate, None, None, None).await
    }

    /// Récupère le lot suivant d'une énumération
    pub async fn pull(&self, context: &str) -> Result<Response<T>> {
        self.call(Operation::pull(context), None, None, None).await
    }

    /// Énumère puis fait des Pull jusqu'à `EndOfSequence`, retourne tous les éléments
    pub async fn enumerate_all(&self) -> Result<Vec<T>> {
        let response = self.enumerate().await?;
        let mut context = match response.body.as_enumerate() {
            Some(enumerate) => enumerate.enumeration_context.clone(),
            None => return Err(unexpected_body("EnumerateResponse", response.exchange)),
        };

        let mut items = Vec::new();
        loop {
            let response = self.pull(&context).await?;
            let Response { exchange, body, .. } = response;
            let Some(batch) = body.into_pull() else {
                return Err(unexpected_body("PullResponse", exchange));
            };

            debug!(
                resource_uri = %self.resource_uri,
                count = batch.items.len(),
                "Pulled enumeration batch"
            );

            let next = batch.next_context().map(str::to_string);
            items.extend(batch.items);
            match next {
                Some(next) => context = next,
                None => return Ok(items),
            }
        }
    }

    /// Abonne `notify_to` aux événements de la classe
    pub async fn subscribe(&self, notify_to: &str) -> Result<Response<T>> {
        let body = subscribe_body(notify_to);
        self.call(Operation::Subscribe, None, None, Some(&body)).await
    }

    /// Termine l'abonnement nommé `identifier`
    pub async fn unsubscribe(&self, identifier: &str) -> Result<Response<T>> {
        let header = subscription_identifier_header(identifier);
        self.call(Operation::Unsubscribe, None, Some(&header), None)
            .await
    }

    /// Appelle une méthode de la classe ; son `<Method>_OUTPUT` se décode en `O`
    pub async fn invoke<O: DeserializeOwned>(
        &self,
        method: &str,
        selectors: Option<SelectorSet>,
        parameters: &[(&str, &str)],
    ) -> Result<Response<O>> {
        let operation = Operation::invoke(method, parameters);
        self.check(&operation)?;
        self.client
            .call(&operation, &self.address(selectors), None, None)
            .await
    }
}

fn unexpected_body(expected: &str, exchange: RawExchange) -> CallError {
    CallError::new(
        WsmanError::malformed(format!("expected {}", expected)),
        exchange,
    )
}
