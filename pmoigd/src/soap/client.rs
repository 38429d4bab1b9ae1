use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::{SoapFault, build_soap_request, flatten_soap_response};
use crate::errors::{IgdError, Result};
use crate::transport::HttpTransport;

/// Invoke a SOAP action on a gateway control URL.
///
/// - `service_type`: service URN, e.g. "urn:schemas-upnp-org:service:WANIPConnection:1"
/// - `control_url`: absolute HTTP URL of the service control endpoint
/// - `action`: action name, e.g. "GetExternalIPAddress"
/// - `args`: ordered (name, value) pairs
///
/// Returns `Ok(None)` when the gateway answers with a non-2xx status and no
/// UPnP error in the body. A response carrying `errorCode` fails with
/// [`IgdError::SoapFault`] whatever the status.
pub fn invoke_action<T: HttpTransport + ?Sized>(
    transport: &T,
    service_type: &str,
    control_url: &str,
    action: &str,
    args: &[(&str, &str)],
) -> Result<Option<HashMap<String, String>>> {
    let body = build_soap_request(service_type, action, args)?;
    trace!("SOAP request {}:\n{}", action, body);

    let soap_action_header = format!(r#""{}#{}""#, service_type, action);
    let headers = [
        ("Content-Type", "text/xml"),
        ("SOAPAction", soap_action_header.as_str()),
    ];

    debug!("Invoking {} on {}", action, control_url);
    let reply = transport.post(control_url, &headers, body)?;
    trace!("SOAP response {} (HTTP {}):\n{}", action, reply.status, reply.body);

    if !reply.is_success() {
        // Gateways send UPnP errors with HTTP 500. Anything else that is not
        // a 2xx counts as "no result".
        if let Ok(fields) = flatten_soap_response(reply.body.as_bytes()) {
            if let Some(fault) = SoapFault::from_fields(&fields) {
                warn!("{} failed on {}: {}", action, control_url, fault);
                return Err(IgdError::SoapFault(fault));
            }
        }
        debug!(
            "{} on {} returned HTTP status {}, no result",
            action, control_url, reply.status
        );
        return Ok(None);
    }

    let fields = flatten_soap_response(reply.body.as_bytes())?;
    if let Some(fault) = SoapFault::from_fields(&fields) {
        warn!("{} failed on {}: {}", action, control_url, fault);
        return Err(IgdError::SoapFault(fault));
    }

    Ok(Some(fields))
}
