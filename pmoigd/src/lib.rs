//! # pmoigd - UPnP Internet Gateway Device client
//!
//! Opens and closes port mappings on a home router through its
//! `WANIPConnection` (or `WANPPPConnection`) service.
//!
//! The caller supplies its local address and the raw text of an SSDP answer
//! from the gateway. From there:
//!
//! 1. [`ssdp::extract_location`] reads the description URL,
//! 2. [`description::resolve_wan_service`] fetches the description and finds
//!    the WAN connection service and its absolute control URL,
//! 3. [`soap::invoke_action`] issues SOAP actions on that URL,
//! 4. [`Gateway`] ties it together behind `external_ip`, `open`, `close` and
//!    `is_mapped`.
//!
//! Sending the M-SEARCH and receiving the answer is left to the caller.
//!
//! ```no_run
//! use pmoigd::{Gateway, PortMappingProtocol};
//!
//! # fn ssdp_answer() -> String { String::new() }
//! let gateway = Gateway::new("192.168.1.20".parse()?, &ssdp_answer())?;
//! if !gateway.is_mapped(PortMappingProtocol::Tcp, 8080).unwrap_or(false) {
//!     gateway.open(PortMappingProtocol::Tcp, 8080, "PMOMusic")?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod description;
pub mod errors;
pub mod gateway;
pub mod protocol;
pub mod soap;
pub mod ssdp;
pub mod transport;

mod xml;

pub use crate::config::IgdConfig;
pub use crate::errors::{IgdError, Result};
pub use crate::gateway::{Gateway, GatewayBinding};
pub use crate::protocol::PortMappingProtocol;
pub use crate::soap::SoapFault;
pub use crate::transport::{HttpReply, HttpTransport, UreqTransport};
