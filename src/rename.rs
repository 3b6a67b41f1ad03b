//! Interface renaming.
//!
//! One SET per neighbor against `ifAlias.<port>`, every row attempted
//! regardless of what happened to the rows before it. A row's outcome is
//! classified in priority order: transport/engine failure, device rejection
//! (status plus the failing object index), then success with the value the
//! device confirmed. The port descriptor lookup happens only after a
//! successful write and only for display; losing it never turns a success
//! into a failure.

use async_snmp::error::ErrorStatus;
use async_snmp::{Value, VarBind};
use bytes::Bytes;
use tracing::debug;

use crate::describe;
use crate::discover::{Neighbor, value_text};
use crate::oids;
use crate::session::SnmpOps;

/// Per-row result of a rename attempt. Terminal; nothing is retried.
#[derive(Debug)]
pub enum RenameOutcome {
    /// The device accepted the write and confirmed the value.
    Renamed {
        port: u32,
        /// Value echoed in the SET response.
        confirmed: String,
        /// Human port label, when the resolver could produce one.
        descriptor: Option<String>,
    },
    /// The device refused the write.
    Rejected {
        port: u32,
        status: ErrorStatus,
        /// Index of the failing object in the request.
        index: u32,
    },
    /// The request never completed (timeout, I/O, engine fault).
    Failed {
        port: u32,
        error: async_snmp::Error,
    },
}

impl RenameOutcome {
    /// Whether the device confirmed this row's write.
    pub fn is_renamed(&self) -> bool {
        matches!(self, Self::Renamed { .. })
    }
}

impl std::fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Renamed {
                port,
                confirmed,
                descriptor,
            } => match descriptor {
                Some(label) => write!(f, "Port {label} name changed to: {confirmed}"),
                None => write!(f, "Port {port} name changed to: {confirmed}"),
            },
            Self::Rejected { status, index, .. } => {
                write!(f, "Error status: {status} at {index}")
            }
            Self::Failed { error, .. } => write!(f, "Error indication: {error}"),
        }
    }
}

/// Attempt one rename per neighbor, sequentially, and report every outcome.
pub async fn rename_ports<S>(snmp: &S, neighbors: &[Neighbor]) -> Vec<RenameOutcome>
where
    S: SnmpOps + 'static,
{
    let mut outcomes = Vec::with_capacity(neighbors.len());
    for neighbor in neighbors {
        outcomes.push(rename_port(snmp, neighbor).await);
    }
    outcomes
}

async fn rename_port<S>(snmp: &S, neighbor: &Neighbor) -> RenameOutcome
where
    S: SnmpOps + 'static,
{
    let oid = oids::if_alias_instance(neighbor.port);
    let varbind = VarBind::new(
        oid,
        Value::OctetString(Bytes::copy_from_slice(neighbor.name.as_bytes())),
    );

    match snmp.set(varbind).await {
        Ok(confirmed) => {
            let confirmed = value_text(&confirmed.value);
            let descriptor = describe::port_descriptor(snmp, neighbor.port).await;
            RenameOutcome::Renamed {
                port: neighbor.port,
                confirmed,
                descriptor,
            }
        }
        Err(async_snmp::Error::Snmp { status, index, .. }) => {
            debug!(port = neighbor.port, %status, index, "rename rejected by device");
            RenameOutcome::Rejected {
                port: neighbor.port,
                status,
                index,
            }
        }
        Err(error) => {
            debug!(port = neighbor.port, %error, "rename request failed");
            RenameOutcome::Failed {
                port: neighbor.port,
                error,
            }
        }
    }
}
