//! Shared fixtures for integration tests.

use async_snmp::Value;
use lldp_portname::mock::{MockSnmp, lldp_row};
use lldp_portname::oids;

/// The documentation device: an access point on port 12, a printer on
/// port 14, ifName labels for both ports.
pub fn lobby_switch() -> MockSnmp {
    MockSnmp::new()
        .row(lldp_row(0, 12, 7), Value::OctetString("ap-lobby-01".into()))
        .row(lldp_row(0, 14, 3), Value::OctetString("printer-02".into()))
        .row(
            oids::if_name_instance(12),
            Value::OctetString("GigabitEthernet1/0/12".into()),
        )
        .row(
            oids::if_name_instance(14),
            Value::OctetString("GigabitEthernet1/0/14".into()),
        )
}
