//! Parsing and serialization of whole XML parts.
use super::element::{Namespace, XML_NAMESPACE, XMLNS_NAMESPACE, XmlAttribute, XmlElement, XmlNode};
use super::error::{Result, XmlError};
use super::escape::unescape_xml;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use std::borrow::Cow;

/// A parsed XML part.
///
/// Text and attribute values keep their original escaping, so serializing an
/// untouched document reproduces its content (whitespace, entity and character
/// references included) modulo the XML declaration and empty-element form.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

/// In-scope `prefix -> uri` bindings for one element. `""` is the default namespace.
type Scope = Vec<(String, String)>;

impl XmlDocument {
    /// Parse a part from raw bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(false);

        let mut scopes: Vec<Scope> = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let element = open_element(&e, &mut scopes)?;
                    stack.push(element);
                },
                Event::Empty(e) => {
                    let element = open_element(&e, &mut scopes)?;
                    scopes.pop();
                    attach(element, &mut stack, &mut root)?;
                },
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| XmlError::Malformed("unexpected end tag".to_string()))?;
                    scopes.pop();
                    attach(element, &mut stack, &mut root)?;
                },
                Event::Text(t) => {
                    if let Some(parent) = stack.last_mut() {
                        push_raw_text(parent, std::str::from_utf8(&t)?);
                    }
                },
                Event::GeneralRef(r) => {
                    if let Some(parent) = stack.last_mut() {
                        let reference = format!("&{};", std::str::from_utf8(&r)?);
                        push_raw_text(parent, &reference);
                    }
                },
                Event::CData(c) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = std::str::from_utf8(&c)?.to_string();
                        parent.children.push(XmlNode::CData(text));
                    }
                },
                Event::Comment(c) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = std::str::from_utf8(&c)?.to_string();
                        parent.children.push(XmlNode::Comment(text));
                    }
                },
                Event::PI(pi) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = std::str::from_utf8(&pi)?.to_string();
                        parent.children.push(XmlNode::ProcessingInstruction(text));
                    }
                },
                Event::Eof => break,
                _ => {},
            }
        }

        if !stack.is_empty() {
            return Err(XmlError::Malformed("unclosed element at end of input".to_string()));
        }

        root.map(|root| Self { root }).ok_or(XmlError::MissingRoot)
    }

    /// Serialize with a standalone UTF-8 declaration.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(|e| XmlError::Write(format!("Failed to write XML declaration: {}", e)))?;
        writer
            .write_event(Event::Text(BytesText::from_escaped("\r\n")))
            .map_err(|e| XmlError::Write(e.to_string()))?;

        write_element(&mut writer, &self.root)?;

        Ok(writer.into_inner())
    }

    /// Prefix bound to `uri` on the root element, declaring `preferred_prefix`
    /// (or a numbered variant if that prefix is taken) when there is none.
    pub fn bind_namespace(&mut self, uri: &str, preferred_prefix: &str) -> Namespace {
        if let Some((prefix, _)) = self
            .root
            .namespace_declarations()
            .find(|(prefix, bound)| !prefix.is_empty() && bound == uri)
        {
            return Namespace::new(uri, prefix);
        }

        let taken: Vec<String> = self
            .root
            .namespace_declarations()
            .map(|(prefix, _)| prefix.to_string())
            .collect();
        let mut prefix = preferred_prefix.to_string();
        let mut counter = 0;
        while taken.contains(&prefix) {
            counter += 1;
            prefix = format!("{}{}", preferred_prefix, counter);
        }

        let ns = Namespace::new(uri, prefix);
        self.root.declare_namespace(&ns);
        ns
    }
}

fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

fn resolve(scopes: &[Scope], prefix: &str) -> Option<String> {
    if prefix == "xml" {
        return Some(XML_NAMESPACE.to_string());
    }
    for scope in scopes.iter().rev() {
        if let Some((_, uri)) = scope.iter().find(|(p, _)| p == prefix) {
            // xmlns="" undeclares the default namespace
            return (!uri.is_empty()).then(|| uri.clone());
        }
    }
    None
}

fn open_element(start: &BytesStart<'_>, scopes: &mut Vec<Scope>) -> Result<XmlElement> {
    let mut declared = Scope::new();
    let mut raw_attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = std::str::from_utf8(&attr.value)?.to_string();
        if key == "xmlns" {
            declared.push((String::new(), unescape_xml(&value).into_owned()));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declared.push((prefix.to_string(), unescape_xml(&value).into_owned()));
        }
        raw_attributes.push((key, value));
    }
    scopes.push(declared);

    let name = start.name();
    let qname = std::str::from_utf8(name.as_ref())?;
    let (prefix, local) = split_qname(qname);
    let namespace = resolve(scopes, prefix.unwrap_or(""));

    let attributes = raw_attributes
        .into_iter()
        .map(|(key, raw_value)| {
            let (prefix, local) = split_qname(&key);
            let namespace = match prefix {
                Some("xmlns") => Some(XMLNS_NAMESPACE.to_string()),
                Some(p) => resolve(scopes, p),
                None if local == "xmlns" => Some(XMLNS_NAMESPACE.to_string()),
                None => None,
            };
            XmlAttribute {
                prefix: prefix.map(str::to_string),
                local: local.to_string(),
                namespace,
                raw_value,
            }
        })
        .collect();

    Ok(XmlElement {
        prefix: prefix.map(str::to_string),
        local: local.to_string(),
        namespace,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(XmlError::Malformed(
                "more than one root element".to_string(),
            ));
        },
    }
    Ok(())
}

fn push_raw_text(parent: &mut XmlElement, raw: &str) {
    if let Some(XmlNode::Text(existing)) = parent.children.last_mut() {
        existing.push_str(raw);
    } else {
        parent.children.push(XmlNode::Text(raw.to_string()));
    }
}

/// Raw values read from single-quoted attributes may hold a bare `"`. They
/// are always written double-quoted, so that quote (and any stray `<`) is
/// escaped. Existing references are left alone.
fn double_quote_safe(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['"', '<']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    let name = element.qname();
    let mut start = BytesStart::new(name.as_str());
    for attr in &element.attributes {
        let key = attr.qname();
        let value = double_quote_safe(&attr.raw_value);
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Borrowed(value.as_bytes()),
        });
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| XmlError::Write(format!("Failed to write <{}/>: {}", name, e)));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| XmlError::Write(format!("Failed to write <{}>: {}", name, e)))?;

    for child in &element.children {
        let event = match child {
            XmlNode::Element(e) => {
                write_element(writer, e)?;
                continue;
            },
            XmlNode::Text(raw) => Event::Text(BytesText::from_escaped(raw.as_str())),
            XmlNode::CData(text) => Event::CData(BytesCData::new(text.as_str())),
            XmlNode::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
            XmlNode::ProcessingInstruction(text) => Event::PI(BytesPI::new(text.as_str())),
        };
        writer
            .write_event(event)
            .map_err(|e| XmlError::Write(e.to_string()))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(|e| XmlError::Write(format!("Failed to write </{}>: {}", name, e)))
}
