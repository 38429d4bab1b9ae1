//! Construction des requêtes SOAP

use xmltree::{Element, XMLNode};

use super::{SOAP_ENCODING_NS, SOAP_ENVELOPE_NS};

fn build_soap_envelope_with_body(body_child: Element) -> Result<String, xmltree::Error> {
    let mut body = Element::new("s:Body");
    body.children.push(XMLNode::Element(body_child));

    let mut envelope = Element::new("s:Envelope");
    envelope
        .attributes
        .insert("xmlns:s".to_string(), SOAP_ENVELOPE_NS.to_string());
    envelope
        .attributes
        .insert("s:encodingStyle".to_string(), SOAP_ENCODING_NS.to_string());
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(true)
        .indent_string("  ");
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Builds the SOAP request body for an IGD action.
///
/// The action element is `m:{action}` in the `service_urn` namespace and
/// carries one child per argument, in the order given. Values are escaped by
/// the XML emitter.
///
/// # Arguments
///
/// * `service_urn` - service type, e.g. "urn:schemas-upnp-org:service:WANIPConnection:1"
/// * `action` - action name, e.g. "AddPortMapping"
/// * `args` - ordered (name, value) pairs
pub fn build_soap_request(
    service_urn: &str,
    action: &str,
    args: &[(&str, &str)],
) -> Result<String, xmltree::Error> {
    let request_name = format!("m:{}", action);
    let mut request_elem = Element::new(&request_name);
    request_elem
        .attributes
        .insert("xmlns:m".to_string(), service_urn.to_string());

    for (name, value) in args {
        let mut child = Element::new(*name);
        child.children.push(XMLNode::Text((*value).to_string()));
        request_elem.children.push(XMLNode::Element(child));
    }

    build_soap_envelope_with_body(request_elem)
}
