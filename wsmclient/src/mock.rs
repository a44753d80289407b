//! Transport en mémoire rejouant des réponses préparées

use crate::transport::Transport;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use wsmsoap::{Result, WsmanError};

/// Transport répondant depuis une file et enregistrant chaque requête
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute une réponse, retournée par le prochain envoi sans réponse
    pub fn push_response(&self, xml: impl Into<String>) -> &Self {
        self.responses.lock().push_back(Ok(xml.into()));
        self
    }

    /// Ajoute un échec de transport
    pub fn push_error(&self, err: WsmanError) -> &Self {
        self.responses.lock().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<String> {
        self.requests.lock().last().cloned()
    }

    pub fn pending(&self) -> usize {
        self.responses.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &str) -> Result<String> {
        self.requests.lock().push(request.to_string());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(WsmanError::Transport("no canned response left".to_string())))
    }
}
