//! Neighbor discovery.
//!
//! Walks the lldpRemSysName subtree and turns each row into a
//! `(local port, neighbor name)` pair. The port number comes out of the row
//! OID (see [`crate::oids::local_port_index`]); the name is the row value.
//! Rows failing the naming policy are dropped silently; that is selection,
//! not an error.

use std::future::poll_fn;
use std::pin::Pin;
use std::task::Context;

use async_snmp::Value;
use futures_core::Stream;
use tracing::{debug, trace};

use crate::oids;
use crate::policy::NamePolicy;
use crate::session::SnmpOps;
use crate::walk::Walk;

/// One LLDP neighbor selected for a rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    /// lldpRemLocalPortNum, the correlation key into the ifXTable.
    pub port: u32,
    /// The neighbor's advertised system name.
    pub name: String,
}

/// Result of one discovery pass.
///
/// A walk that aborts mid-table keeps the rows collected up to that point;
/// `aborted` carries the step error for reporting.
pub struct Discovery {
    /// Selected neighbors, in device order.
    pub neighbors: Vec<Neighbor>,
    /// The error that ended the walk early, if any.
    pub aborted: Option<async_snmp::Error>,
}

impl Discovery {
    /// Operator-facing line for an aborted walk.
    pub fn abort_report(&self) -> Option<String> {
        self.aborted.as_ref().map(|e| match e {
            async_snmp::Error::Snmp { status, index, .. } => {
                format!("Error status: {status} at {index}")
            }
            other => format!("Error indication: {other}"),
        })
    }
}

/// Walk the LLDP remote-systems-name table on `snmp` and return the
/// neighbors selected by `policy`, in the order the device reported them.
pub async fn discover_neighbors<S>(snmp: &S, policy: &NamePolicy) -> Discovery
where
    S: SnmpOps + 'static,
{
    let walk = Walk::new(snmp.clone(), oids::lldp_rem_sys_name());
    let mut pinned = Box::pin(walk);

    let mut neighbors = Vec::new();
    let mut aborted = None;

    loop {
        let item = poll_fn(|cx: &mut Context<'_>| Pin::new(&mut pinned).poll_next(cx)).await;

        match item {
            Some(Ok(vb)) => {
                let Some(port) = oids::local_port_index(&vb.oid) else {
                    debug!(oid = %vb.oid, "row OID too short for a table index, skipped");
                    continue;
                };

                let name = value_text(&vb.value);
                if policy.selects(&name) {
                    neighbors.push(Neighbor { port, name });
                } else {
                    trace!(port, %name, "neighbor excluded by policy");
                }
            }
            Some(Err(e)) => {
                debug!(error = %e, "LLDP walk aborted");
                aborted = Some(e);
                break;
            }
            None => break,
        }
    }

    Discovery { neighbors, aborted }
}

/// String form of a row value. lldpRemSysName and the ifXTable columns are
/// octet strings; anything else falls back to its display form.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::OctetString(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Fault, MockSnmp, lldp_row};
    use async_snmp::oid;
    use regex::Regex;

    #[tokio::test]
    async fn test_discovers_and_filters_neighbors() {
        let mock = MockSnmp::new()
            .row(lldp_row(0, 12, 7), Value::OctetString("ap-lobby-01".into()))
            .row(lldp_row(0, 14, 3), Value::OctetString("printer-02".into()));

        let policy = NamePolicy::matching(Regex::new("^ap-").unwrap());
        let discovery = discover_neighbors(&mock, &policy).await;

        assert!(discovery.aborted.is_none());
        assert_eq!(
            discovery.neighbors,
            vec![Neighbor {
                port: 12,
                name: "ap-lobby-01".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_match_all_policy_keeps_device_order() {
        let mock = MockSnmp::new()
            .row(lldp_row(0, 3, 1), Value::OctetString("ap-3".into()))
            .row(lldp_row(0, 7, 1), Value::OctetString("ap-7".into()))
            .row(lldp_row(1, 9, 2), Value::OctetString("cam-9".into()));

        let discovery = discover_neighbors(&mock, &NamePolicy::any()).await;

        let ports: Vec<u32> = discovery.neighbors.iter().map(|n| n.port).collect();
        assert_eq!(ports, vec![3, 7, 9]);
    }

    #[tokio::test]
    async fn test_walk_does_not_leak_into_following_subtree() {
        // A lexicographically adjacent table right after lldpRemSysName
        // must not contribute rows.
        let mock = MockSnmp::new()
            .row(lldp_row(0, 5, 1), Value::OctetString("ap-east".into()))
            .row(
                oid!(1, 0, 8802, 1, 1, 2, 1, 4, 1, 1, 10, 0, 5, 1),
                Value::OctetString("not-a-name".into()),
            );

        let discovery = discover_neighbors(&mock, &NamePolicy::any()).await;

        assert_eq!(discovery.neighbors.len(), 1);
        assert_eq!(discovery.neighbors[0].name, "ap-east");
    }

    #[tokio::test]
    async fn test_partial_results_on_transport_fault() {
        let mock = MockSnmp::new()
            .row(lldp_row(0, 2, 1), Value::OctetString("ap-a".into()))
            .row(lldp_row(0, 4, 1), Value::OctetString("ap-b".into()));
        // The step after the first row dies at the transport.
        mock.fail_next_from(lldp_row(0, 2, 1), Fault::Transport);

        let discovery = discover_neighbors(&mock, &NamePolicy::any()).await;

        assert_eq!(discovery.neighbors.len(), 1);
        assert_eq!(discovery.neighbors[0].name, "ap-a");
        let report = discovery.abort_report().unwrap();
        assert!(report.starts_with("Error indication:"), "{report}");
    }

    #[tokio::test]
    async fn test_abort_report_for_device_status() {
        use async_snmp::error::ErrorStatus;

        let mock = MockSnmp::new().row(lldp_row(0, 2, 1), Value::OctetString("ap-a".into()));
        mock.fail_next_from(
            lldp_row(0, 2, 1),
            Fault::Status(ErrorStatus::GenErr, 1),
        );

        let discovery = discover_neighbors(&mock, &NamePolicy::any()).await;

        assert_eq!(discovery.neighbors.len(), 1);
        assert_eq!(
            discovery.abort_report().unwrap(),
            "Error status: genErr at 1"
        );
    }

    #[tokio::test]
    async fn test_empty_table() {
        let mock = MockSnmp::new();
        let discovery = discover_neighbors(&mock, &NamePolicy::any()).await;
        assert!(discovery.neighbors.is_empty());
        assert!(discovery.aborted.is_none());
    }
}
