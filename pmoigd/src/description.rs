//! Lookup of the WAN connection service in a device description.
//!
//! An IGD description nests the `WANIPConnection` (or `WANPPPConnection` on
//! PPPoE links) service a few devices deep:
//! `InternetGatewayDevice > WANDevice > WANConnectionDevice > service`.
//! The search does not rely on that layout: every `service` element of the
//! document is considered.

use tracing::{debug, trace};
use xmltree::Element;

use crate::errors::{IgdError, Result};
use crate::ssdp::path_slash;
use crate::transport::HttpTransport;
use crate::xml::{child_elements, descendants, first_text, local_name_is};

const WAN_SERVICE_MARKERS: [&str; 2] = [":wanipconnection:", ":wanpppconnection:"];

/// A `service` entry of a device description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub service_type: String,
    pub control_url: String,
}

impl ServiceEntry {
    pub fn is_wan_connection(&self) -> bool {
        let lower = self.service_type.to_ascii_lowercase();
        WAN_SERVICE_MARKERS
            .iter()
            .any(|marker| lower.contains(marker))
    }
}

/// Reads `serviceType` and `controlURL` from a `service` element.
fn parse_service(service: &Element) -> Option<ServiceEntry> {
    let mut service_type = None;
    let mut control_url = None;

    for child in child_elements(service) {
        let Some(text) = first_text(child) else {
            continue;
        };
        if local_name_is(child, "servicetype") {
            service_type = Some(text.trim().to_string());
        } else if local_name_is(child, "controlurl") {
            control_url = Some(text.trim().to_string());
        }
    }

    Some(ServiceEntry {
        service_type: service_type?,
        control_url: control_url?,
    })
}

/// Selects the WAN connection service of a parsed description.
///
/// When several services qualify, the last one in document order is kept.
pub fn find_wan_service(root: &Element) -> Option<ServiceEntry> {
    descendants(root)
        .filter(|element| local_name_is(element, "service"))
        .filter_map(parse_service)
        .inspect(|entry| trace!("Description service {}", entry.service_type))
        .filter(ServiceEntry::is_wan_connection)
        .last()
}

/// Turns the description `controlURL` into an absolute URL on the host of
/// `location`.
///
/// The scheme, host and port are the part of `location` before its first
/// path slash; a relative control path gets a leading `/`.
pub fn absolute_control_url(location: &str, control_url: &str) -> Result<String> {
    let slash = path_slash(location).ok_or_else(|| {
        IgdError::unsupported_gateway("description location has no path after the host")
    })?;

    if control_url.starts_with('/') {
        Ok(format!("{}{}", &location[..slash], control_url))
    } else {
        Ok(format!("{}/{}", &location[..slash], control_url))
    }
}

/// Fetches the description at `location` and resolves the WAN connection
/// service type and its absolute control URL.
pub fn resolve_wan_service<T: HttpTransport + ?Sized>(
    transport: &T,
    location: &str,
) -> Result<(String, String)> {
    let body = transport.get(location)?;
    let root = Element::parse(body.as_bytes())?;

    let service = find_wan_service(&root).ok_or_else(|| {
        IgdError::unsupported_gateway("no WANIPConnection or WANPPPConnection service")
    })?;
    let control_url = absolute_control_url(location, &service.control_url)?;

    debug!(
        "Found WAN connection service at {}: type={} controlURL={}",
        location, service.service_type, control_url
    );

    Ok((service.service_type, control_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    fn service(service_type: &str, control_url: &str) -> String {
        format!(
            "<service><serviceType>{}</serviceType><serviceId>urn:upnp-org:serviceId:x</serviceId><controlURL>{}</controlURL></service>",
            service_type, control_url
        )
    }

    fn description(services: &[String]) -> String {
        format!(
            r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <device>
    <deviceType>urn:schemas-upnp-org:device:InternetGatewayDevice:1</deviceType>
    <serviceList>
      <service>
        <serviceType>urn:schemas-upnp-org:service:Layer3Forwarding:1</serviceType>
        <controlURL>/ctl/L3F</controlURL>
      </service>
    </serviceList>
    <deviceList>
      <device>
        <deviceType>urn:schemas-upnp-org:device:WANConnectionDevice:1</deviceType>
        <serviceList>{}</serviceList>
      </device>
    </deviceList>
  </device>
</root>"#,
            services.concat()
        )
    }

    #[test]
    fn test_find_ip_connection() {
        let root = parse(&description(&[service(
            "urn:schemas-upnp-org:service:WANIPConnection:1",
            "/ctl/IPConn",
        )]));
        let entry = find_wan_service(&root).unwrap();
        assert_eq!(entry.service_type, "urn:schemas-upnp-org:service:WANIPConnection:1");
        assert_eq!(entry.control_url, "/ctl/IPConn");
    }

    #[test]
    fn test_last_qualifying_service_wins() {
        let root = parse(&description(&[
            service("urn:schemas-upnp-org:service:WANIPConnection:1", "/first"),
            service("urn:schemas-upnp-org:service:WANPPPConnection:1", "/second"),
            service("urn:schemas-upnp-org:service:WANCommonInterfaceConfig:1", "/wcic"),
        ]));
        let entry = find_wan_service(&root).unwrap();
        assert_eq!(entry.control_url, "/second");
    }

    #[test]
    fn test_case_and_namespace_insensitive() {
        let root = parse(
            r#"<d:root xmlns:d="urn:schemas-upnp-org:device-1-0">
  <d:service>
    <d:SERVICETYPE>  URN:SCHEMAS-UPNP-ORG:SERVICE:WANIPCONNECTION:2  </d:SERVICETYPE>
    <d:controlurl> upnp/control/WANIPConn1 </d:controlurl>
  </d:service>
</d:root>"#,
        );
        let entry = find_wan_service(&root).unwrap();
        assert_eq!(entry.service_type, "URN:SCHEMAS-UPNP-ORG:SERVICE:WANIPCONNECTION:2");
        assert_eq!(entry.control_url, "upnp/control/WANIPConn1");
    }

    #[test]
    fn test_service_needs_both_fields() {
        let root = parse(
            "<root><service><serviceType>urn:schemas-upnp-org:service:WANIPConnection:1</serviceType></service></root>",
        );
        assert_eq!(find_wan_service(&root), None);
    }

    #[test]
    fn test_no_wan_service() {
        let root = parse(&description(&[]));
        assert_eq!(find_wan_service(&root), None);
    }

    #[test]
    fn test_absolute_control_url() {
        let location = "http://192.168.1.1:5000/desc.xml";
        assert_eq!(
            absolute_control_url(location, "/ctl/IPConn").unwrap(),
            "http://192.168.1.1:5000/ctl/IPConn"
        );
        assert_eq!(
            absolute_control_url(location, "ctl/IPConn").unwrap(),
            "http://192.168.1.1:5000/ctl/IPConn"
        );
        assert_eq!(
            absolute_control_url("http://10.0.0.1/a/b/c.xml", "/upnp/control").unwrap(),
            "http://10.0.0.1/upnp/control"
        );
        assert!(absolute_control_url("http://10.0.0.1", "/x").is_err());
    }
}
