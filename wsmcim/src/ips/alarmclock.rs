//! `IPS_AlarmClockOccurrence` : alarmes de réveil programmées

use crate::class::IPS_ALARM_CLOCK_OCCURRENCE;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wsmclient::{Response, Result, Service, WsmanClient};
use wsmsoap::SelectorSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "IPS_AlarmClockOccurrence", default)]
pub struct AlarmClockOccurrence {
    #[serde(rename = "ElementName")]
    pub element_name: String,

    #[serde(rename = "InstanceID")]
    pub instance_id: String,

    #[serde(rename = "StartTime")]
    pub start_time: StartTime,

    #[serde(rename = "Interval")]
    pub interval: Interval,

    #[serde(rename = "DeleteOnCompletion")]
    pub delete_on_completion: bool,
}

/// Première occurrence de l'alarme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartTime {
    #[serde(rename = "Datetime")]
    pub datetime: Option<DateTime<Utc>>,
}

/// Période de répétition en xs:duration (`P1D`), vide pour une alarme unique
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interval {
    #[serde(rename = "Interval")]
    pub interval: String,
}

pub fn service(client: Arc<WsmanClient>) -> Service<AlarmClockOccurrence> {
    IPS_ALARM_CLOCK_OCCURRENCE.service(client)
}

/// Les occurrences sont lues par `Name` et supprimées par `InstanceID`
#[async_trait]
pub trait AlarmClockOccurrences {
    async fn get_by_name(&self, name: &str) -> Result<Response<AlarmClockOccurrence>>;

    async fn delete_by_instance_id(
        &self,
        instance_id: &str,
    ) -> Result<Response<AlarmClockOccurrence>>;
}

#[async_trait]
impl AlarmClockOccurrences for Service<AlarmClockOccurrence> {
    async fn get_by_name(&self, name: &str) -> Result<Response<AlarmClockOccurrence>> {
        self.get(Some(SelectorSet::single("Name", name))).await
    }

    async fn delete_by_instance_id(
        &self,
        instance_id: &str,
    ) -> Result<Response<AlarmClockOccurrence>> {
        self.delete(Some(SelectorSet::single("InstanceID", instance_id)))
            .await
    }
}
