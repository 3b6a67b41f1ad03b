//! Rename switch ports after their LLDP neighbors.
//!
//! A switch knows who is plugged into each of its ports: neighbors announce
//! themselves over LLDP and the switch exposes the collected names through
//! the LLDP-MIB remote-systems table. This crate walks that table over
//! SNMPv3, selects neighbors matching a naming policy, and writes each
//! neighbor's advertised name into the ifAlias of the local port it hangs
//! off, so port listings read `ap-lobby-01` instead of a bare number.
//!
//! The three operations (discover, rename, describe) are written against the
//! small [`SnmpOps`] seam rather than a concrete client, so the protocol
//! logic is exercised in tests without a device on the wire.
//!
//! ```rust,no_run
//! use lldp_portname::{Credentials, NamePolicy, Session, discover_neighbors, rename_ports};
//!
//! # async fn example() -> lldp_portname::Result<()> {
//! let session = Session::new(Credentials {
//!     username: "admin".into(),
//!     auth_key: "authpass123".into(),
//!     priv_key: "privpass123".into(),
//! });
//! let target = session.target("192.0.2.10", 161).await?;
//!
//! let discovery = discover_neighbors(&target, &NamePolicy::any()).await;
//! for outcome in rename_ports(&target, &discovery.neighbors).await {
//!     println!("{outcome}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod describe;
pub mod discover;
pub mod error;
pub mod oids;
pub mod policy;
pub mod rename;
pub mod session;
pub mod walk;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

pub use describe::port_descriptor;
pub use discover::{Discovery, Neighbor, discover_neighbors};
pub use error::{Error, Result};
pub use policy::NamePolicy;
pub use rename::{RenameOutcome, rename_ports};
pub use session::{Credentials, Session, SnmpOps, Target};
