use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

use tracing::{debug, info};

use crate::config::IgdConfig;
use crate::description::resolve_wan_service;
use crate::errors::Result;
use crate::protocol::{PortMappingProtocol, soap_bool};
use crate::soap::invoke_action;
use crate::ssdp::extract_location;
use crate::transport::{HttpTransport, UreqTransport};

/// Resolved control endpoint of a gateway, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayBinding {
    pub local_ip: IpAddr,
    pub service_type: String,
    /// Absolute URL on the host that served the device description
    pub control_url: String,
}

/// An Internet Gateway Device bound to its WAN connection service.
///
/// Construction runs discovery parsing and description lookup once; every
/// operation afterwards is a single SOAP round trip on the stored control
/// URL. There is no refresh: if the gateway moves its endpoint, build a new
/// `Gateway` from a fresh SSDP response.
///
/// ```no_run
/// use pmoigd::{Gateway, PortMappingProtocol};
///
/// let ssdp = "HTTP/1.1 200 OK\r\nLOCATION: http://192.168.1.1:5000/desc.xml\r\n";
/// let gateway = Gateway::new("192.168.1.20".parse()?, ssdp)?;
/// gateway.open(PortMappingProtocol::Tcp, 8080, "pmomusic")?;
/// println!("external ip: {:?}", gateway.external_ip()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Gateway<T: HttpTransport = UreqTransport> {
    binding: GatewayBinding,
    transport: T,
}

impl Gateway<UreqTransport> {
    pub fn new(local_ip: IpAddr, ssdp_response: &str) -> Result<Self> {
        Self::with_transport(local_ip, ssdp_response, UreqTransport::default())
    }

    /// Same as [`Gateway::new`], with the HTTP settings of `config`.
    pub fn with_config(local_ip: IpAddr, ssdp_response: &str, config: &IgdConfig) -> Result<Self> {
        Self::with_transport(
            local_ip,
            ssdp_response,
            UreqTransport::from_config(&config.http),
        )
    }
}

impl<T: HttpTransport> Gateway<T> {
    pub fn with_transport(local_ip: IpAddr, ssdp_response: &str, transport: T) -> Result<Self> {
        let location = extract_location(ssdp_response)?;
        let (service_type, control_url) = resolve_wan_service(&transport, &location)?;

        info!("Gateway bound: {} ({})", control_url, service_type);

        Ok(Self {
            binding: GatewayBinding {
                local_ip,
                service_type,
                control_url,
            },
            transport,
        })
    }

    pub fn binding(&self) -> &GatewayBinding {
        &self.binding
    }

    pub fn local_ip(&self) -> IpAddr {
        self.binding.local_ip
    }

    pub fn service_type(&self) -> &str {
        &self.binding.service_type
    }

    pub fn control_url(&self) -> &str {
        &self.binding.control_url
    }

    fn run_command(
        &self,
        action: &str,
        args: &[(&str, &str)],
    ) -> Result<Option<HashMap<String, String>>> {
        invoke_action(
            &self.transport,
            &self.binding.service_type,
            &self.binding.control_url,
            action,
            args,
        )
    }

    /// Public address of the gateway, `None` when it does not report one
    /// or reports something that is not an IP address.
    pub fn external_ip(&self) -> Result<Option<IpAddr>> {
        let fields = self.run_command("GetExternalIPAddress", &[])?;
        let ip = fields
            .as_ref()
            .and_then(|f| f.get("NewExternalIPAddress"))
            .and_then(|value| value.parse::<IpAddr>().ok());

        debug!("External IP: {:?}", ip);
        Ok(ip)
    }

    /// Maps `port` on the WAN side to the same port on the local address,
    /// with a permanent lease.
    pub fn open(&self, protocol: PortMappingProtocol, port: u16, description: &str) -> Result<()> {
        let port = port.to_string();
        let local_ip = self.binding.local_ip.to_string();

        self.run_command(
            "AddPortMapping",
            &[
                ("NewRemoteHost", ""),
                ("NewProtocol", protocol.as_str()),
                ("NewExternalPort", port.as_str()),
                ("NewInternalClient", local_ip.as_str()),
                ("NewInternalPort", port.as_str()),
                ("NewEnabled", soap_bool(true)),
                ("NewPortMappingDescription", description),
                ("NewLeaseDuration", "0"),
            ],
        )?;
        Ok(())
    }

    pub fn close(&self, protocol: PortMappingProtocol, port: u16) -> Result<()> {
        let port = port.to_string();

        self.run_command(
            "DeletePortMapping",
            &[
                ("NewRemoteHost", ""),
                ("NewProtocol", protocol.as_str()),
                ("NewExternalPort", port.as_str()),
            ],
        )?;
        Ok(())
    }

    /// Whether the gateway holds a mapping for `port`.
    ///
    /// Most gateways answer an unknown mapping with UPnP error 714, which
    /// comes back as an [`IgdError::SoapFault`](crate::IgdError::SoapFault)
    /// rather than `false`; see [`SoapFault::is_no_such_entry`](crate::soap::SoapFault::is_no_such_entry).
    pub fn is_mapped(&self, protocol: PortMappingProtocol, port: u16) -> Result<bool> {
        let port = port.to_string();

        let fields = self.run_command(
            "GetSpecificPortMappingEntry",
            &[
                ("NewRemoteHost", ""),
                ("NewProtocol", protocol.as_str()),
                ("NewExternalPort", port.as_str()),
            ],
        )?;

        Ok(fields.is_some_and(|f| f.contains_key("NewInternalPort")))
    }
}

impl<T: HttpTransport> fmt::Debug for Gateway<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}
