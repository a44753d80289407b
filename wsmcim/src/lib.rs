//! # wsmcim - WS-Management resource classes
//!
//! Table des classes AMT, IPS et CIM accessibles via [`wsmclient`], avec les
//! formes typées dans lesquelles leurs instances se décodent.
//!
//! Chaque classe est liée au [`wsmclient::Service`] générique ; les
//! sélecteurs et méthodes propres à une classe sont des traits d'extension.
//!
//! ```ignore
//! use wsmcim::ips::{alarmclock, AlarmClockOccurrences};
//!
//! let alarms = alarmclock::service(client);
//! alarms.delete_by_instance_id("testalarm").await?;
//! ```

pub mod amt;
pub mod cim;
mod class;
pub mod ips;

pub use class::{
    AMT_BOOT_CAPABILITIES, CATALOG, CIM_IEEE8021X_SETTINGS, CIM_KVM_REDIRECTION_SAP,
    IPS_ALARM_CLOCK_OCCURRENCE, ResourceClass, Schema, lookup,
};
