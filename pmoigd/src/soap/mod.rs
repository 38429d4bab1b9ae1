//! # SOAP control of the WAN connection service
//!
//! - [`build_soap_request`]: SOAP 1.1 envelope for an action and its ordered arguments
//! - [`flatten_soap_response`]: response document flattened to `name -> text`
//! - [`invoke_action`]: POST to the control URL and fault detection
//! - [`SoapFault`]: UPnP error reported by the gateway
//!
//! ```ignore
//! use pmoigd::soap::invoke_action;
//! use pmoigd::transport::UreqTransport;
//!
//! let fields = invoke_action(
//!     &UreqTransport::default(),
//!     "urn:schemas-upnp-org:service:WANIPConnection:1",
//!     "http://192.168.1.1:5000/ctl/IPConn",
//!     "GetExternalIPAddress",
//!     &[],
//! )?;
//! ```

mod builder;
mod client;
mod fault;
mod parser;

pub use builder::build_soap_request;
pub use client::invoke_action;
pub use fault::SoapFault;
pub use parser::flatten_soap_response;

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SOAP_ENCODING_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Error codes returned by WANIPConnection / WANPPPConnection actions
pub mod error_codes {
    /// Action invalide
    pub const INVALID_ACTION: &str = "401";

    /// Arguments invalides
    pub const INVALID_ARGS: &str = "402";

    /// Action échouée
    pub const ACTION_FAILED: &str = "501";

    /// The caller may not perform this action
    pub const ACTION_NOT_AUTHORIZED: &str = "606";

    /// Wildcard not permitted in source IP
    pub const WILDCARD_NOT_PERMITTED_IN_SRC_IP: &str = "715";

    /// Wildcard not permitted in external port
    pub const WILDCARD_NOT_PERMITTED_IN_EXT_PORT: &str = "716";

    /// The mapping does not exist
    pub const NO_SUCH_ENTRY_IN_ARRAY: &str = "714";

    /// The external port is already mapped to another client
    pub const CONFLICT_IN_MAPPING_ENTRY: &str = "718";

    /// Internal and external port must be the same
    pub const SAME_PORT_VALUES_REQUIRED: &str = "724";

    /// The gateway only supports permanent leases (duration 0)
    pub const ONLY_PERMANENT_LEASES_SUPPORTED: &str = "725";

    /// Remote host must be a wildcard
    pub const REMOTE_HOST_ONLY_SUPPORTS_WILDCARD: &str = "726";

    /// External port must be a wildcard
    pub const EXTERNAL_PORT_ONLY_SUPPORTS_WILDCARD: &str = "727";
}
