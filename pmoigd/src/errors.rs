use thiserror::Error;

use crate::soap::SoapFault;

#[derive(Error, Debug)]
pub enum IgdError {
    /// The SSDP response or the device description does not lead to a
    /// WANIPConnection / WANPPPConnection control endpoint.
    #[error("Unsupported gateway: {0}")]
    UnsupportedGateway(String),
    #[error("{0}")]
    SoapFault(SoapFault),
    #[error("HTTP transport error: {0}")]
    Transport(String),
    #[error("Malformed XML: {0}")]
    MalformedXml(#[from] xmltree::ParseError),
    #[error("Cannot build SOAP request: {0}")]
    SoapBuild(#[from] xmltree::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IgdError {
    pub fn unsupported_gateway(reason: &str) -> Self {
        IgdError::UnsupportedGateway(reason.to_string())
    }

    pub fn transport(url: &str, message: impl std::fmt::Display) -> Self {
        IgdError::Transport(format!("{url}: {message}"))
    }

    /// Returns the gateway fault carried by this error, if any.
    pub fn soap_fault(&self) -> Option<&SoapFault> {
        match self {
            IgdError::SoapFault(fault) => Some(fault),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IgdError>;
