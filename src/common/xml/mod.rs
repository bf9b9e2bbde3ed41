//! XML part codec.
//!
//! Parts are parsed into an owned element tree with namespace URIs resolved,
//! edited in place, and written back with their original escaping intact.

mod codec;
mod element;
mod error;
mod escape;

pub use codec::XmlDocument;
pub use element::{
    Descendants, Namespace, PrunedDescendants, XML_NAMESPACE, XMLNS_NAMESPACE, XmlAttribute,
    XmlElement, XmlNode,
};
pub use error::XmlError;
pub use escape::{escape_xml, unescape_xml};
