use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Transport protocol of a port mapping, sent as `NewProtocol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortMappingProtocol {
    Tcp,
    Udp,
}

impl PortMappingProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortMappingProtocol::Tcp => "TCP",
            PortMappingProtocol::Udp => "UDP",
        }
    }
}

impl fmt::Display for PortMappingProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortMappingProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("tcp") {
            Ok(PortMappingProtocol::Tcp)
        } else if s.eq_ignore_ascii_case("udp") {
            Ok(PortMappingProtocol::Udp)
        } else {
            Err(format!("unknown port mapping protocol: {s}"))
        }
    }
}

/// UPnP boolean as sent on the wire.
pub(crate) fn soap_bool(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}
