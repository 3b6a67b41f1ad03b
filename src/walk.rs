//! Scoped subtree walk.
//!
//! GETNEXT-driven [`Stream`] over one OID subtree. Termination is the
//! load-bearing part: the walk stops on `EndOfMibView`, and it stops the
//! moment a returned OID falls outside the base subtree. Continuing
//! lexicographically past the table would scan unrelated (and potentially
//! huge) portions of the device's OID space. Non-increasing OIDs terminate
//! the walk with an error to avoid looping on non-conformant agents.

use std::pin::Pin;
use std::task::{Context, Poll};

use async_snmp::{Error, Oid, Value, VarBind};
use futures_core::Stream;

use crate::session::SnmpOps;

/// Async stream of the rows under one OID subtree.
///
/// Created by [`Walk::new`]. Yields `Ok` per in-subtree row; a step error is
/// yielded once and ends the stream.
pub struct Walk<S: SnmpOps> {
    snmp: S,
    base_oid: Oid,
    current_oid: Oid,
    /// Last OID handed to the caller, for non-increasing detection.
    last_returned_oid: Option<Oid>,
    done: bool,
    pending: Option<Pin<Box<dyn Future<Output = async_snmp::Result<VarBind>> + Send>>>,
}

impl<S: SnmpOps> Walk<S> {
    /// Walk the subtree rooted at `oid`.
    pub fn new(snmp: S, oid: Oid) -> Self {
        Self {
            snmp,
            base_oid: oid.clone(),
            current_oid: oid,
            last_returned_oid: None,
            done: false,
            pending: None,
        }
    }
}

impl<S: SnmpOps + 'static> Stream for Walk<S> {
    type Item = async_snmp::Result<VarBind>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.done {
            return Poll::Ready(None);
        }

        if self.pending.is_none() {
            let snmp = self.snmp.clone();
            let oid = self.current_oid.clone();

            let fut = Box::pin(async move { snmp.get_next(&oid).await });
            self.pending = Some(fut);
        }

        let pending = self.pending.as_mut().unwrap();
        match pending.as_mut().poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(result) => {
                self.pending = None;

                match result {
                    Ok(vb) => {
                        if matches!(vb.value, Value::EndOfMibView) {
                            self.done = true;
                            return Poll::Ready(None);
                        }

                        // Left the subtree: the table is exhausted.
                        if !vb.oid.starts_with(&self.base_oid) {
                            self.done = true;
                            return Poll::Ready(None);
                        }

                        if let Some(last_oid) = self.last_returned_oid.take()
                            && vb.oid <= last_oid
                        {
                            self.done = true;
                            return Poll::Ready(Some(Err(Error::NonIncreasingOid {
                                previous: last_oid,
                                current: vb.oid,
                            })));
                        }

                        self.current_oid = vb.oid.clone();
                        self.last_returned_oid = Some(vb.oid.clone());

                        Poll::Ready(Some(Ok(vb)))
                    }
                    Err(e) => {
                        self.done = true;
                        Poll::Ready(Some(Err(e)))
                    }
                }
            }
        }
    }
}
