//! Namespace-agnostic helpers over `xmltree` elements.
//!
//! Gateways are sloppy with prefixes and namespaces, so every lookup here is
//! done on the local element name only.

use xmltree::{Element, XMLNode};

/// Case-insensitive comparison of an element local name.
pub(crate) fn local_name_is(element: &Element, name: &str) -> bool {
    element.name.trim().eq_ignore_ascii_case(name)
}

/// Text of the first child node, when that node is text or CDATA.
///
/// A leading child element yields `None`, even if text follows.
pub(crate) fn first_text(element: &Element) -> Option<&str> {
    match element.children.first() {
        Some(XMLNode::Text(text)) | Some(XMLNode::CData(text)) => Some(text.as_str()),
        _ => None,
    }
}

/// Direct child elements, skipping text, comments and processing instructions.
pub(crate) fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(XMLNode::as_element)
}

/// Pre-order walk over `root` and every element below it, in document order.
pub(crate) fn descendants(root: &Element) -> Descendants<'_> {
    Descendants { stack: vec![root] }
}

pub(crate) struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(current.children.iter().rev().filter_map(XMLNode::as_element));
        Some(current)
    }
}
