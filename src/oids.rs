//! OID roots and index arithmetic.
//!
//! The LLDP remote-systems table and the ifXTable are unrelated SNMP
//! subtrees; the only thing tying a neighbor row to a local interface is the
//! lldpRemLocalPortNum index embedded in the row OID. Everything here works
//! on the structured arc slice, never on the dotted string form.

use async_snmp::{Oid, oid};

/// LLDP-MIB::lldpRemSysName column (the remote-systems-name table).
///
/// Row instances are `<root>.<timeMark>.<localPortNum>.<remIndex>`, so the
/// local port number is always the second-to-last arc.
pub fn lldp_rem_sys_name() -> Oid {
    oid!(1, 0, 8802, 1, 1, 2, 1, 4, 1, 1, 9)
}

/// IF-MIB::ifAlias column (ifXTable). The writable per-port name.
pub fn if_alias() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 18)
}

/// IF-MIB::ifName column (ifXTable). Read for operator-facing port labels.
pub fn if_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 1)
}

/// Instance OID for one port's ifAlias: `<ifAlias>.<port>`.
pub fn if_alias_instance(port: u32) -> Oid {
    column_instance(&if_alias(), port)
}

/// Instance OID for one port's ifName: `<ifName>.<port>`.
pub fn if_name_instance(port: u32) -> Oid {
    column_instance(&if_name(), port)
}

fn column_instance(column: &Oid, port: u32) -> Oid {
    let mut arcs = column.arcs().to_vec();
    arcs.push(port);
    Oid::from_slice(&arcs)
}

/// Extract the LLDP local port number from a lldpRemSysName row OID.
///
/// The lldpRemEntry index is `(timeMark, localPortNum, remIndex)`, so the
/// port number is the second-to-last arc of the row instance. Returns `None`
/// for OIDs too short to carry a table index.
pub fn local_port_index(row: &Oid) -> Option<u32> {
    let arcs = row.arcs();
    if arcs.len() < 2 {
        return None;
    }
    Some(arcs[arcs.len() - 2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_roots_dotted_form() {
        assert_eq!(lldp_rem_sys_name().to_string(), "1.0.8802.1.1.2.1.4.1.1.9");
        assert_eq!(if_alias().to_string(), "1.3.6.1.2.1.31.1.1.1.18");
        assert_eq!(if_name().to_string(), "1.3.6.1.2.1.31.1.1.1.1");
    }

    #[test]
    fn test_instance_appends_port() {
        assert_eq!(
            if_alias_instance(12).to_string(),
            "1.3.6.1.2.1.31.1.1.1.18.12"
        );
        assert_eq!(if_name_instance(12).to_string(), "1.3.6.1.2.1.31.1.1.1.1.12");
    }

    #[test]
    fn test_port_index_is_second_to_last_arc() {
        // timeMark=0, localPortNum=12, remIndex=7
        let row = oid!(1, 0, 8802, 1, 1, 2, 1, 4, 1, 1, 9, 0, 12, 7);
        assert_eq!(local_port_index(&row), Some(12));

        let row = oid!(1, 0, 8802, 1, 1, 2, 1, 4, 1, 1, 9, 0, 14, 3);
        assert_eq!(local_port_index(&row), Some(14));
    }

    #[test]
    fn test_port_index_minimal_oid() {
        assert_eq!(local_port_index(&oid!(1, 3)), Some(1));
    }

    proptest! {
        #[test]
        fn prop_port_index_matches_second_to_last(
            tail in proptest::collection::vec(0u32..100_000, 2..6),
        ) {
            let mut arcs = lldp_rem_sys_name().arcs().to_vec();
            arcs.extend_from_slice(&tail);
            let row = Oid::from_slice(&arcs);

            prop_assert_eq!(
                local_port_index(&row),
                Some(arcs[arcs.len() - 2])
            );
        }
    }
}
