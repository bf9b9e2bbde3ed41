//! Owned, namespace-resolved XML element tree.
//!
//! Every element and attribute carries the namespace URI it was bound to when
//! the part was parsed. Lookups compare URIs, so a part that binds
//! WordprocessingML to `w:` and one that binds it to `ns0:` behave the same.
use super::error::XmlError;
use super::escape::{escape_xml, unescape_xml};

/// Namespace URI for `xmlns` declarations.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Namespace URI bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A namespace URI together with the prefix used to write new names in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub uri: String,
    pub prefix: String,
}

impl Namespace {
    pub fn new(uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            prefix: prefix.into(),
        }
    }
}

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Character data, stored escaped exactly as it appeared in the part
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
}

/// An attribute with its resolved namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    pub prefix: Option<String>,
    pub local: String,
    pub namespace: Option<String>,
    /// Escaped value as written in the part
    pub raw_value: String,
}

impl XmlAttribute {
    /// Unescaped attribute value.
    pub fn value(&self) -> String {
        unescape_xml(&self.raw_value).into_owned()
    }

    /// Qualified name as written.
    pub fn qname(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }

    /// Whether this is an `xmlns` or `xmlns:*` declaration.
    pub fn is_namespace_declaration(&self) -> bool {
        self.namespace.as_deref() == Some(XMLNS_NAMESPACE)
    }

    #[inline]
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == Some(namespace)
    }
}

/// An element with its resolved namespace, attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub prefix: Option<String>,
    pub local: String,
    pub namespace: Option<String>,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element in `ns`.
    pub fn new(ns: &Namespace, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(ns.prefix.clone()),
            local: local.into(),
            namespace: Some(ns.uri.clone()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Qualified name as written.
    pub fn qname(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }

    /// Whether this element is `{namespace}local`.
    #[inline]
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == Some(namespace)
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Direct children named `{namespace}local`.
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.is(namespace, local))
    }

    /// First direct child named `{namespace}local`.
    pub fn child(&self, namespace: &str, local: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(namespace, local))
    }

    pub fn child_mut(&mut self, namespace: &str, local: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|e| e.is(namespace, local))
    }

    /// Index into `children` of the first child element named `{namespace}local`.
    pub fn child_position(&self, namespace: &str, local: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.is(namespace, local)))
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Descendant elements in document order, without entering any element
    /// for which `prune` returns true. Pruned elements are not yielded.
    pub fn descendants_pruned<F>(&self, prune: F) -> PrunedDescendants<'_, F>
    where
        F: Fn(&XmlElement) -> bool,
    {
        PrunedDescendants {
            stack: vec![self.children.iter()],
            prune,
        }
    }

    /// First descendant named `{namespace}local`.
    pub fn find(&self, namespace: &str, local: &str) -> Option<&XmlElement> {
        self.descendants().find(|e| e.is(namespace, local))
    }

    /// Value of the attribute `{namespace}local`.
    pub fn attribute_ns(&self, namespace: &str, local: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|a| a.is(namespace, local))
            .map(XmlAttribute::value)
    }

    /// Value of an attribute that has no namespace.
    pub fn attribute(&self, local: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.local == local)
            .map(XmlAttribute::value)
    }

    /// Set `{ns}local` to `value`, replacing an existing value in place.
    pub fn set_attribute_ns(&mut self, ns: &Namespace, local: &str, value: &str) {
        let raw_value = escape_xml(value).into_owned();
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.is(&ns.uri, local)) {
            attr.raw_value = raw_value;
            return;
        }
        self.attributes.push(XmlAttribute {
            prefix: Some(ns.prefix.clone()),
            local: local.to_string(),
            namespace: Some(ns.uri.clone()),
            raw_value,
        });
    }

    /// Remove `{namespace}local`, returning whether it was present.
    pub fn remove_attribute_ns(&mut self, namespace: &str, local: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|a| !a.is(namespace, local));
        self.attributes.len() != before
    }

    /// Declare `ns` on this element unless the same binding is already present.
    pub fn declare_namespace(&mut self, ns: &Namespace) {
        let declared = self.attributes.iter().any(|a| {
            a.is_namespace_declaration() && a.prefix.is_some() && a.local == ns.prefix
        });
        if !declared {
            self.attributes.push(XmlAttribute {
                prefix: Some("xmlns".to_string()),
                local: ns.prefix.clone(),
                namespace: Some(XMLNS_NAMESPACE.to_string()),
                raw_value: escape_xml(&ns.uri).into_owned(),
            });
        }
    }

    /// Prefixes declared on this element, paired with their URIs.
    /// The default namespace is reported with an empty prefix.
    pub fn namespace_declarations(&self) -> impl Iterator<Item = (&str, String)> {
        self.attributes
            .iter()
            .filter(|a| a.is_namespace_declaration())
            .map(|a| {
                let prefix = if a.prefix.is_some() { a.local.as_str() } else { "" };
                (prefix, a.value())
            })
    }

    pub fn push_child(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Insert `element` at `index` in `children`, clamped to the end.
    pub fn insert_child(&mut self, index: usize, element: XmlElement) {
        let index = index.min(self.children.len());
        self.children.insert(index, XmlNode::Element(element));
    }

    /// First child named `{ns}local`, inserting an empty one at `index`
    /// (clamped to the end) when there is none.
    pub fn get_or_insert_child(
        &mut self,
        ns: &Namespace,
        local: &str,
        index: usize,
    ) -> Result<&mut XmlElement, XmlError> {
        let position = match self.child_position(&ns.uri, local) {
            Some(position) => position,
            None => {
                let position = index.min(self.children.len());
                self.children
                    .insert(position, XmlNode::Element(XmlElement::new(ns, local)));
                position
            },
        };
        match self.children.get_mut(position) {
            Some(XmlNode::Element(element)) => Ok(element),
            _ => Err(XmlError::Malformed(format!(
                "no <{}> element at child {}",
                local, position
            ))),
        }
    }

    /// Remove direct child elements matching `predicate`, returning how many went.
    pub fn remove_children_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&XmlElement) -> bool,
    {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, XmlNode::Element(e) if predicate(e)));
        before - self.children.len()
    }

    /// Remove every descendant element matching `predicate`, at any depth.
    pub fn remove_descendants_where<F>(&mut self, predicate: &F) -> usize
    where
        F: Fn(&XmlElement) -> bool,
    {
        let mut removed = self.remove_children_where(|e| predicate(e));
        for child in self.elements_mut() {
            removed += child.remove_descendants_where(predicate);
        }
        removed
    }

    /// Visit `self` and every descendant element mutably, in document order.
    pub fn walk_mut<F>(&mut self, visit: &mut F)
    where
        F: FnMut(&mut XmlElement),
    {
        visit(self);
        for child in self.elements_mut() {
            child.walk_mut(visit);
        }
    }

    /// Concatenated, unescaped text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children
                .push(XmlNode::Text(escape_xml(text).into_owned()));
        }
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for node in &element.children {
        match node {
            XmlNode::Text(raw) => out.push_str(&unescape_xml(raw)),
            XmlNode::CData(text) => out.push_str(text),
            XmlNode::Element(child) => collect_text(child, out),
            _ => {},
        }
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, XmlNode>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(XmlNode::Element(e)) => {
                    self.stack.push(e.children.iter());
                    return Some(e);
                },
                Some(_) => {},
                None => {
                    self.stack.pop();
                },
            }
        }
        None
    }
}

/// Pre-order iterator that skips whole subtrees.
pub struct PrunedDescendants<'a, F> {
    stack: Vec<std::slice::Iter<'a, XmlNode>>,
    prune: F,
}

impl<'a, F> Iterator for PrunedDescendants<'a, F>
where
    F: Fn(&XmlElement) -> bool,
{
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(XmlNode::Element(e)) => {
                    if (self.prune)(e) {
                        continue;
                    }
                    self.stack.push(e.children.iter());
                    return Some(e);
                },
                Some(_) => {},
                None => {
                    self.stack.pop();
                },
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "urn:test";

    fn ns() -> Namespace {
        Namespace::new(NS, "t")
    }

    fn tree() -> XmlElement {
        let mut root = XmlElement::new(&ns(), "root");
        let mut a = XmlElement::new(&ns(), "a");
        a.push_child(XmlElement::new(&ns(), "b"));
        root.push_child(a);
        root.children.push(XmlNode::Text("x &amp; y".to_string()));
        root.push_child(XmlElement::new(&ns(), "c"));
        root
    }

    #[test]
    fn test_descendants_are_preorder() {
        let root = tree();
        let names: Vec<_> = root.descendants().map(|e| e.local.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_pruned_descendants_skip_subtree() {
        let root = tree();
        let names: Vec<_> = root
            .descendants_pruned(|e| e.local == "a")
            .map(|e| e.local.as_str())
            .collect();
        assert_eq!(names, ["c"]);
    }

    #[test]
    fn test_text_content_unescapes() {
        assert_eq!(tree().text_content(), "x & y");
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut e = XmlElement::new(&ns(), "e");
        e.set_attribute_ns(&ns(), "val", "a<b");
        e.set_attribute_ns(&ns(), "val", "c");
        assert_eq!(e.attributes.len(), 1);
        assert_eq!(e.attribute_ns(NS, "val").as_deref(), Some("c"));

        e.set_attribute_ns(&ns(), "other", "a<b");
        assert_eq!(e.attributes[1].raw_value, "a&lt;b");
        assert!(e.remove_attribute_ns(NS, "val"));
        assert!(!e.remove_attribute_ns(NS, "val"));
    }

    #[test]
    fn test_remove_descendants_at_any_depth() {
        let mut root = tree();
        let removed = root.remove_descendants_where(&|e: &XmlElement| e.local == "b");
        assert_eq!(removed, 1);
        assert!(root.find(NS, "b").is_none());
        assert!(root.find(NS, "a").is_some());
    }

    #[test]
    fn test_get_or_insert_child() {
        let mut root = tree();
        root.get_or_insert_child(&ns(), "first", 0).unwrap();
        assert!(matches!(&root.children[0], XmlNode::Element(e) if e.local == "first"));

        let existing = root.get_or_insert_child(&ns(), "c", 0).unwrap();
        assert!(existing.children.is_empty());
        assert_eq!(root.elements().filter(|e| e.local == "c").count(), 1);
    }

    #[test]
    fn test_get_or_insert_child_clamps_and_chains() {
        let mut root = XmlElement::new(&ns(), "root");
        root.get_or_insert_child(&ns(), "outer", usize::MAX)
            .unwrap()
            .get_or_insert_child(&ns(), "inner", usize::MAX)
            .unwrap()
            .set_text("x");
        root.get_or_insert_child(&ns(), "outer", 0)
            .unwrap()
            .get_or_insert_child(&ns(), "inner", 0)
            .unwrap();

        assert_eq!(root.elements().count(), 1);
        let outer = root.find(NS, "outer").unwrap();
        assert_eq!(outer.elements().count(), 1);
        assert_eq!(outer.find(NS, "inner").unwrap().text_content(), "x");
    }

    #[test]
    fn test_declare_namespace_once() {
        let mut e = XmlElement::new(&ns(), "e");
        e.declare_namespace(&ns());
        e.declare_namespace(&ns());
        let decls: Vec<_> = e.namespace_declarations().collect();
        assert_eq!(decls, [("t", NS.to_string())]);
    }
}
