//! Session and target plumbing.
//!
//! One credential set and one protocol engine serve the whole run. The
//! [`Session`] owns the credentials; [`Session::target`] derives the
//! per-device [`Target`] every operation is scoped to. Operations are
//! written against the [`SnmpOps`] trait so they can run against the
//! in-memory mock in tests.
//!
//! The security parameters are deliberately fixed: HMAC-MD5 authentication
//! and AES-128-CFB privacy, no negotiation. Devices provisioned for this
//! tool are expected to carry a matching USM user.

use std::future::Future;
use std::time::Duration;

use async_snmp::transport::UdpTransport;
use async_snmp::v3::{AuthProtocol, PrivProtocol};
use async_snmp::{Client, Oid, VarBind};
use bytes::Bytes;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Result;

/// Protocol operations the discover/rename/describe layers need.
///
/// The `Clone` bound mirrors the client's: walk streams own a clone of the
/// handle so concurrent operations never fight over a borrow. All
/// implementations are cheap to clone.
pub trait SnmpOps: Clone + Send + Sync {
    /// Single GET; resolves to the first variable binding of the response.
    fn get(&self, oid: &Oid) -> impl Future<Output = async_snmp::Result<VarBind>> + Send;

    /// Single GETNEXT step.
    fn get_next(&self, oid: &Oid) -> impl Future<Output = async_snmp::Result<VarBind>> + Send;

    /// Single-object SET; resolves to the confirmed binding from the
    /// response.
    fn set(&self, varbind: VarBind) -> impl Future<Output = async_snmp::Result<VarBind>> + Send;
}

/// USM credential set for the run. Key material is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    /// USM user name.
    pub username: String,
    /// Authentication key (HMAC-MD5).
    pub auth_key: String,
    /// Privacy key (AES-128-CFB).
    pub priv_key: String,
}

/// Process-wide session state: credentials plus request defaults.
///
/// Created once at startup and dropped at exit; never mutated in between.
pub struct Session {
    credentials: Credentials,
    timeout: Duration,
    retries: u32,
}

impl Session {
    /// Create a session with default timeout (5s) and retries (3).
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            timeout: Duration::from_secs(5),
            retries: 3,
        }
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of retries (UDP).
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Connect to one device and return the target handle all operations
    /// for that device share. Engine discovery and time sync happen here,
    /// once, rather than per operation.
    pub async fn target(&self, host: &str, port: u16) -> Result<Target> {
        let addr = if host.contains(':') && !host.starts_with('[') {
            // Bare IPv6 literal; bracket it for socket-address parsing.
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };

        let client = Client::v3(addr, Bytes::from(self.credentials.username.clone()))
            .auth(AuthProtocol::Md5, self.credentials.auth_key.clone())
            .privacy(PrivProtocol::Aes128, self.credentials.priv_key.clone())
            .timeout(self.timeout)
            .retries(self.retries)
            .connect()
            .await?;

        Ok(Target { client })
    }
}

/// One device under management: a connected SNMPv3 client over UDP.
///
/// Cloning shares the underlying transport and engine state.
#[derive(Clone)]
pub struct Target {
    client: Client<UdpTransport>,
}

impl SnmpOps for Target {
    fn get(&self, oid: &Oid) -> impl Future<Output = async_snmp::Result<VarBind>> + Send {
        let client = self.client.clone();
        let oid = oid.clone();
        async move {
            let varbinds = client.get_many(&[oid]).await?;
            varbinds.into_iter().next().ok_or_else(|| {
                async_snmp::Error::decode(0, async_snmp::error::DecodeErrorKind::EmptyResponse)
            })
        }
    }

    fn get_next(&self, oid: &Oid) -> impl Future<Output = async_snmp::Result<VarBind>> + Send {
        let client = self.client.clone();
        let oid = oid.clone();
        async move { client.get_next(&oid).await }
    }

    fn set(&self, varbind: VarBind) -> impl Future<Output = async_snmp::Result<VarBind>> + Send {
        let client = self.client.clone();
        async move {
            let varbinds = client.set_many(&[varbind]).await?;
            varbinds.into_iter().next().ok_or_else(|| {
                async_snmp::Error::decode(0, async_snmp::error::DecodeErrorKind::EmptyResponse)
            })
        }
    }
}
