/// Style id to style name lookup for `word/styles.xml`.
use crate::common::xml::XmlError;
use crate::ooxml::opc::constants::namespace::WML_MAIN;
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, QName, ResolveResult};
use std::collections::HashMap;

/// Names of the styles defined in a styles part, keyed by style id.
///
/// Paragraphs reference their style by id (`Heading1`), while the heading
/// level is conveyed by the style's name (`heading 1`).
#[derive(Debug, Clone, Default)]
pub struct StyleNames {
    names: HashMap<String, String>,
}

fn is_wml(resolved: &ResolveResult<'_>) -> bool {
    matches!(resolved, ResolveResult::Bound(Namespace(uri)) if *uri == WML_MAIN.as_bytes())
}

fn is_wml_element(reader: &NsReader<&[u8]>, name: QName<'_>, local: &[u8]) -> bool {
    let (resolved, name) = reader.resolver().resolve_element(name);
    name.as_ref() == local && is_wml(&resolved)
}

/// Value of the `w:`-qualified attribute `local` on `start`.
fn wml_attribute(reader: &NsReader<&[u8]>, start: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    start.attributes().flatten().find_map(|attr| {
        let (resolved, name) = reader.resolver().resolve_attribute(attr.key);
        if name.as_ref() != local || !is_wml(&resolved) {
            return None;
        }
        attr.decode_and_unescape_value(reader.decoder())
            .ok()
            .map(|value| value.into_owned())
    })
}

impl StyleNames {
    /// Parse a styles part. Only WordprocessingML `w:style` elements count.
    /// Styles without an id are skipped; styles without a name are recorded
    /// with an empty name.
    pub fn parse(xml: &[u8]) -> Result<Self, XmlError> {
        let mut reader = NsReader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut names = HashMap::new();
        let mut current_id: Option<String> = None;
        let mut current_name: Option<String> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) if is_wml_element(&reader, e.name(), b"style") => {
                    current_name = None;
                    current_id = wml_attribute(&reader, &e, b"styleId");
                },
                Event::Empty(e) if is_wml_element(&reader, e.name(), b"style") => {
                    if let Some(style_id) = wml_attribute(&reader, &e, b"styleId") {
                        names.insert(style_id, String::new());
                    }
                },
                Event::Empty(e) | Event::Start(e)
                    if current_id.is_some() && is_wml_element(&reader, e.name(), b"name") =>
                {
                    if let Some(name) = wml_attribute(&reader, &e, b"val") {
                        current_name = Some(name);
                    }
                },
                Event::End(e) if is_wml_element(&reader, e.name(), b"style") => {
                    if let Some(style_id) = current_id.take() {
                        names.insert(style_id, current_name.take().unwrap_or_default());
                    }
                },
                Event::Eof => break,
                _ => {},
            }
        }

        Ok(Self { names })
    }

    /// Name of the style with this id.
    pub fn name(&self, style_id: &str) -> Option<&str> {
        self.names
            .get(style_id)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Name of the style with this id, falling back to the id itself.
    pub fn display_name<'a>(&'a self, style_id: &'a str) -> &'a str {
        self.name(style_id).unwrap_or(style_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
