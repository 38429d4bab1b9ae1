//! Flattening of SOAP responses

use std::collections::HashMap;

use xmltree::Element;

use crate::errors::Result;
use crate::xml::{descendants, first_text};

/// Parses a SOAP response and maps every text-bearing element to its value.
///
/// The whole document is walked, envelope included, so the result holds the
/// action output arguments as well as fault fields (`faultcode`,
/// `errorCode`, `errorDescription`). Keys are local names; when a name
/// appears twice the later element wins. Values are trimmed.
pub fn flatten_soap_response(xml: &[u8]) -> Result<HashMap<String, String>> {
    let root = Element::parse(xml)?;

    let mut fields = HashMap::new();
    for element in descendants(&root) {
        if let Some(text) = first_text(element) {
            fields.insert(element.name.clone(), text.trim().to_string());
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IgdError;

    #[test]
    fn test_flatten_action_response() {
        let xml = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <s:Body>
    <u:GetSpecificPortMappingEntryResponse xmlns:u="urn:schemas-upnp-org:service:WANIPConnection:1">
      <NewInternalPort>8080</NewInternalPort>
      <NewInternalClient> 192.168.1.20 </NewInternalClient>
      <NewEnabled>1</NewEnabled>
      <NewPortMappingDescription></NewPortMappingDescription>
    </u:GetSpecificPortMappingEntryResponse>
  </s:Body>
</s:Envelope>"#;

        let fields = flatten_soap_response(xml.as_bytes()).unwrap();
        assert_eq!(fields.get("NewInternalPort").map(String::as_str), Some("8080"));
        assert_eq!(
            fields.get("NewInternalClient").map(String::as_str),
            Some("192.168.1.20")
        );
        assert_eq!(fields.get("NewEnabled").map(String::as_str), Some("1"));
        // empty element: no text node
        assert!(!fields.contains_key("NewPortMappingDescription"));
        assert!(!fields.contains_key("GetSpecificPortMappingEntryResponse"));
    }

    #[test]
    fn test_flatten_fault() {
        let xml = r#"<?xml version="1.0"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <s:Fault>
      <faultcode>s:Client</faultcode>
      <faultstring>UPnPError</faultstring>
      <detail>
        <UPnPError xmlns="urn:schemas-upnp-org:control-1-0">
          <errorCode>714</errorCode>
          <errorDescription>NoSuchEntryInArray</errorDescription>
        </UPnPError>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;

        let fields = flatten_soap_response(xml.as_bytes()).unwrap();
        assert_eq!(fields.get("faultcode").map(String::as_str), Some("s:Client"));
        assert_eq!(fields.get("errorCode").map(String::as_str), Some("714"));
        assert_eq!(
            fields.get("errorDescription").map(String::as_str),
            Some("NoSuchEntryInArray")
        );
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let xml = "<r><a><v>first</v></a><b><v>second</v></b></r>";
        let fields = flatten_soap_response(xml.as_bytes()).unwrap();
        assert_eq!(fields.get("v").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_malformed_xml() {
        match flatten_soap_response(b"<s:Envelope><unclosed>") {
            Err(IgdError::MalformedXml(_)) => {}
            other => panic!("expected MalformedXml, got {:?}", other),
        }
    }
}
