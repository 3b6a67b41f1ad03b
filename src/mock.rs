//! In-memory [`SnmpOps`] implementation for tests.
//!
//! Models a device as a sorted OID table: GETNEXT is a range query, GET is
//! a lookup, SET stores the value and echoes it back. Faults are injected
//! per OID so tests can engineer device rejections and transport failures
//! on exact rows. Compiled for unit tests and behind the `testing` feature
//! for integration tests.

use std::collections::{BTreeMap, VecDeque};
use std::future::Future;
use std::ops::Bound;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_snmp::error::ErrorStatus;
use async_snmp::{Error, Oid, Value, VarBind};

use crate::session::SnmpOps;

/// Engineered failure for one OID.
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    /// Device-level rejection: error status plus failing object index.
    Status(ErrorStatus, u32),
    /// Transport/engine failure (reported as a timeout).
    Transport,
}

impl Fault {
    fn into_error(self) -> Error {
        match self {
            Self::Status(status, index) => Error::Snmp {
                target: None,
                status,
                index,
                oid: None,
            },
            Self::Transport => Error::Timeout {
                target: None,
                elapsed: Duration::from_secs(1),
                request_id: 0,
                retries: 0,
            },
        }
    }
}

#[derive(Default)]
struct MockState {
    table: BTreeMap<Oid, Value>,
    fail_get: BTreeMap<Oid, Fault>,
    fail_set: BTreeMap<Oid, Fault>,
    /// Faults keyed by the request OID of a GETNEXT step.
    fail_next: BTreeMap<Oid, Fault>,
    /// When non-empty, GETNEXT answers from this script instead of the table.
    scripted_next: VecDeque<async_snmp::Result<VarBind>>,
    gets: Vec<Oid>,
    writes: Vec<VarBind>,
}

/// Scriptable in-memory SNMP device.
#[derive(Clone, Default)]
pub struct MockSnmp {
    state: Arc<Mutex<MockState>>,
}

impl MockSnmp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one table row. Chainable.
    pub fn row(self, oid: Oid, value: Value) -> Self {
        self.state.lock().unwrap().table.insert(oid, value);
        self
    }

    /// Fail GETs against `oid`.
    pub fn fail_get(&self, oid: Oid, fault: Fault) {
        self.state.lock().unwrap().fail_get.insert(oid, fault);
    }

    /// Fail SETs against `oid`.
    pub fn fail_set(&self, oid: Oid, fault: Fault) {
        self.state.lock().unwrap().fail_set.insert(oid, fault);
    }

    /// Fail the GETNEXT step whose request OID is `oid`.
    pub fn fail_next_from(&self, oid: Oid, fault: Fault) {
        self.state.lock().unwrap().fail_next.insert(oid, fault);
    }

    /// Queue a verbatim GETNEXT response, bypassing the table.
    pub fn script_next(&self, result: async_snmp::Result<VarBind>) {
        self.state.lock().unwrap().scripted_next.push_back(result);
    }

    /// OIDs requested via GET, in order.
    pub fn gets(&self) -> Vec<Oid> {
        self.state.lock().unwrap().gets.clone()
    }

    /// Bindings written via SET, in order, including rejected attempts.
    pub fn writes(&self) -> Vec<VarBind> {
        self.state.lock().unwrap().writes.clone()
    }

    fn do_get(&self, oid: &Oid) -> async_snmp::Result<VarBind> {
        let mut state = self.state.lock().unwrap();
        state.gets.push(oid.clone());

        if let Some(fault) = state.fail_get.get(oid) {
            return Err(fault.into_error());
        }

        match state.table.get(oid) {
            Some(value) => Ok(VarBind::new(oid.clone(), value.clone())),
            None => Ok(VarBind::new(oid.clone(), Value::NoSuchInstance)),
        }
    }

    fn do_get_next(&self, oid: &Oid) -> async_snmp::Result<VarBind> {
        let mut state = self.state.lock().unwrap();

        if let Some(result) = state.scripted_next.pop_front() {
            return result;
        }

        if let Some(fault) = state.fail_next.get(oid) {
            return Err(fault.into_error());
        }

        match state
            .table
            .range((Bound::Excluded(oid.clone()), Bound::Unbounded))
            .next()
        {
            Some((next_oid, value)) => Ok(VarBind::new(next_oid.clone(), value.clone())),
            None => Ok(VarBind::new(oid.clone(), Value::EndOfMibView)),
        }
    }

    fn do_set(&self, varbind: VarBind) -> async_snmp::Result<VarBind> {
        let mut state = self.state.lock().unwrap();
        state.writes.push(varbind.clone());

        if let Some(fault) = state.fail_set.get(&varbind.oid) {
            return Err(fault.into_error());
        }

        state
            .table
            .insert(varbind.oid.clone(), varbind.value.clone());
        Ok(varbind)
    }
}

impl SnmpOps for MockSnmp {
    fn get(&self, oid: &Oid) -> impl Future<Output = async_snmp::Result<VarBind>> + Send {
        let result = self.do_get(oid);
        async move { result }
    }

    fn get_next(&self, oid: &Oid) -> impl Future<Output = async_snmp::Result<VarBind>> + Send {
        let result = self.do_get_next(oid);
        async move { result }
    }

    fn set(&self, varbind: VarBind) -> impl Future<Output = async_snmp::Result<VarBind>> + Send {
        let result = self.do_set(varbind);
        async move { result }
    }
}

/// lldpRemSysName row OID for the standard `(timeMark, port, remIndex)`
/// table index.
pub fn lldp_row(time_mark: u32, port: u32, rem_index: u32) -> Oid {
    let mut arcs = crate::oids::lldp_rem_sys_name().arcs().to_vec();
    arcs.extend_from_slice(&[time_mark, port, rem_index]);
    Oid::from_slice(&arcs)
}
