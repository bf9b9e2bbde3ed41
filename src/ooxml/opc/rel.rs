/// Relationship-related objects for OPC packages.
///
/// This module parses `.rels` parts into an ordered, id-indexed collection of
/// relationships and resolves internal targets to member names.
use crate::ooxml::opc::constants::namespace::OPC_RELATIONSHIPS;
use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::Result;
use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use std::collections::HashMap;

/// A single relationship from a source part to a target.
///
/// Represents a connection between parts in an OPC package, identified by an rId
/// (relationship ID). Can be either internal (pointing to another part) or external
/// (pointing to an external URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(r_id: String, reltype: String, target_ref: String, is_external: bool) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    ///
    /// For internal relationships, this is a relative part reference.
    /// For external relationships, this is an absolute URL.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Member name of an internal target, resolved against `base_dir`
    /// (e.g. `word/`). `None` for external relationships.
    pub fn target_member(&self, base_dir: &str) -> Option<String> {
        if self.is_external {
            return None;
        }
        Some(resolve_member(base_dir, &self.target_ref))
    }
}

/// Join a relative reference onto a directory, normalizing `.` and `..`.
/// Absolute references (leading `/`) are taken from the package root.
fn resolve_member(base_dir: &str, target: &str) -> String {
    let mut segments: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        base_dir.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            s => segments.push(s),
        }
    }

    segments.join("/")
}

/// Collection of relationships from a single source, in document order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,

    /// Map of relationship ID to position in `rels`
    by_id: HashMap<String, usize>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.rels` part.
    ///
    /// Only `Relationship` elements in the package relationships namespace
    /// count. Those lacking an `Id` or `Target` are skipped. A missing `Type`
    /// is kept as the empty string.
    pub fn parse(rels_xml: &[u8]) -> Result<Self> {
        let mut rels = Self::new();
        let mut reader = NsReader::from_reader(rels_xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Empty(ref e) | Event::Start(ref e) => {
                    let (resolved, local) = reader.resolver().resolve_element(e.name());
                    let in_rels_namespace = matches!(
                        resolved,
                        ResolveResult::Bound(Namespace(uri)) if uri == OPC_RELATIONSHIPS.as_bytes()
                    );
                    if in_rels_namespace && local.as_ref() == b"Relationship" {
                        let mut r_id = None;
                        let mut reltype = String::new();
                        let mut target_ref = None;
                        let mut is_external = false;

                        for attr in e.attributes() {
                            let attr = attr?;
                            match attr.key.as_ref() {
                                b"Id" => r_id = Some(attr.unescape_value()?.to_string()),
                                b"Type" => reltype = attr.unescape_value()?.to_string(),
                                b"Target" => target_ref = Some(attr.unescape_value()?.to_string()),
                                b"TargetMode" => {
                                    is_external =
                                        attr.unescape_value()?.as_ref() == target_mode::EXTERNAL
                                },
                                _ => {},
                            }
                        }

                        if let (Some(id), Some(target)) = (r_id, target_ref) {
                            rels.add_relationship(Relationship::new(
                                id,
                                reltype,
                                target,
                                is_external,
                            ));
                        }
                    }
                },
                Event::Eof => break,
                _ => {},
            }
        }

        Ok(rels)
    }

    /// Add a relationship. A repeated id replaces the earlier entry in place.
    pub fn add_relationship(&mut self, rel: Relationship) {
        match self.by_id.get(rel.r_id()) {
            Some(&i) => self.rels[i] = rel,
            None => {
                self.by_id.insert(rel.r_id().to_string(), self.rels.len());
                self.rels.push(rel);
            },
        }
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.by_id.get(r_id).map(|&i| &self.rels[i])
    }

    /// Target reference for `r_id`, as written in the part.
    pub fn target_ref(&self, r_id: &str) -> Option<&str> {
        self.get(r_id).map(Relationship::target_ref)
    }

    /// Get an iterator over all relationships in document order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}
