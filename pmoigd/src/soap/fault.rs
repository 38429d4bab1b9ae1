//! UPnP errors reported by the gateway inside SOAP responses

use std::collections::HashMap;
use std::fmt;

use super::error_codes;

/// Gateway-side error (`<errorCode>` in the SOAP response).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// UPnP error code as sent by the gateway, e.g. "714"
    pub code: String,

    /// `<errorDescription>` when the gateway provides one
    pub description: Option<String>,
}

impl SoapFault {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: None,
        }
    }

    /// Extracts a fault from a flattened SOAP response, if it carries one.
    pub(crate) fn from_fields(fields: &HashMap<String, String>) -> Option<Self> {
        let code = fields.get("errorCode")?;
        Some(Self {
            code: code.clone(),
            description: fields.get("errorDescription").cloned(),
        })
    }

    /// Numeric value of the code, when it is one.
    pub fn code_number(&self) -> Option<u32> {
        self.code.parse().ok()
    }

    /// `NoSuchEntryInArray`: the queried or deleted mapping does not exist.
    pub fn is_no_such_entry(&self) -> bool {
        self.code == error_codes::NO_SUCH_ENTRY_IN_ARRAY
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "UPnP error {}: {}", self.code, description),
            None => write!(f, "UPnP error {}", self.code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_from_fields() {
        let mut fields = HashMap::new();
        assert_eq!(SoapFault::from_fields(&fields), None);

        fields.insert("errorCode".to_string(), "714".to_string());
        let fault = SoapFault::from_fields(&fields).unwrap();
        assert_eq!(fault.code, "714");
        assert_eq!(fault.code_number(), Some(714));
        assert!(fault.is_no_such_entry());
        assert_eq!(fault.to_string(), "UPnP error 714");

        fields.insert(
            "errorDescription".to_string(),
            "NoSuchEntryInArray".to_string(),
        );
        let fault = SoapFault::from_fields(&fields).unwrap();
        assert_eq!(fault.to_string(), "UPnP error 714: NoSuchEntryInArray");
    }

    #[test]
    fn test_non_numeric_code() {
        let fault = SoapFault::new("s:Client");
        assert_eq!(fault.code_number(), None);
        assert!(!fault.is_no_such_entry());
    }
}
