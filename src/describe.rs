//! Port descriptor lookup.

use async_snmp::Value;
use tracing::debug;

use crate::oids;
use crate::session::SnmpOps;

/// Fetch the human-readable label (ifName) for one local port.
///
/// Advisory only: any error indication or status, and any non-string value,
/// collapses to `None`. No retries.
pub async fn port_descriptor<S: SnmpOps>(snmp: &S, port: u32) -> Option<String> {
    let oid = oids::if_name_instance(port);

    match snmp.get(&oid).await {
        Ok(vb) => match vb.value {
            Value::OctetString(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            other => {
                debug!(port, value = %other, "port has no string descriptor");
                None
            }
        },
        Err(e) => {
            debug!(port, error = %e, "descriptor lookup failed");
            None
        }
    }
}
