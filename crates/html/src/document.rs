use crate::dom_builder::parse_html;
use crate::types::{Attribute, Id, Node};

#[derive(Debug, PartialEq, Eq)]
pub enum DocumentError {
    UnknownNode(Id),
    InvalidParent(Id),
    AlreadyAttached(Id),
    CycleDetected { parent: Id, child: Id },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document { doctype: Option<String> },
    Element {
        name: String,
        attributes: Vec<Attribute>,
    },
    Text { text: String },
    Comment { text: String },
}

#[derive(Clone, Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<Id>,
    children: Vec<Id>,
}

impl NodeRecord {
    fn allows_children(&self) -> bool {
        matches!(self.kind, NodeKind::Document { .. } | NodeKind::Element { .. })
    }
}

/// Mutable document with parent links, addressed by [`Id`].
///
/// Node ids are arena indices; the document node is always [`Id::DOCUMENT`]. Nodes are never
/// removed, so ids handed out stay valid for the life of the document.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<NodeRecord>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeRecord {
                kind: NodeKind::Document { doctype: None },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn parse(html: &str) -> Self {
        Self::from_node(parse_html(html))
    }

    /// Move an owned tree into a fresh arena. A non-document root is adopted under the
    /// document node.
    pub fn from_node(root: Node) -> Self {
        let mut doc = Self::new();
        let mut stack: Vec<(Id, Node)> = Vec::new();

        match root {
            Node::Document { doctype, children } => {
                doc.nodes[0].kind = NodeKind::Document { doctype };
                for child in children.into_iter().rev() {
                    stack.push((Id::DOCUMENT, child));
                }
            }
            other => stack.push((Id::DOCUMENT, other)),
        }

        // Children are pushed reversed so they are attached in source order.
        while let Some((parent, node)) = stack.pop() {
            let (kind, children) = match node {
                Node::Document { children, .. } => {
                    // Nested documents cannot exist in a parsed tree; splice their children.
                    for child in children.into_iter().rev() {
                        stack.push((parent, child));
                    }
                    continue;
                }
                Node::Element {
                    name,
                    attributes,
                    children,
                } => (NodeKind::Element { name, attributes }, children),
                Node::Text { text } => (NodeKind::Text { text }, Vec::new()),
                Node::Comment { text } => (NodeKind::Comment { text }, Vec::new()),
            };
            let id = doc.push(kind, Some(parent));
            doc.nodes[parent.index()].children.push(id);
            for child in children.into_iter().rev() {
                stack.push((id, child));
            }
        }
        doc
    }

    fn push(&mut self, kind: NodeKind, parent: Option<Id>) -> Id {
        let id = Id(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    fn record(&self, id: Id) -> Option<&NodeRecord> {
        self.nodes.get(id.index())
    }

    fn attributes_mut(&mut self, id: Id) -> Option<&mut Vec<Attribute>> {
        match &mut self.nodes.get_mut(id.index())?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn root(&self) -> Id {
        Id::DOCUMENT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].children.is_empty()
    }

    pub fn contains(&self, id: Id) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn kind(&self, id: Id) -> Option<&NodeKind> {
        self.record(id).map(|r| &r.kind)
    }

    pub fn doctype(&self) -> Option<&str> {
        match &self.nodes[0].kind {
            NodeKind::Document { doctype } => doctype.as_deref(),
            _ => None,
        }
    }

    pub fn element_name(&self, id: Id) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, id: Id) -> bool {
        self.element_name(id).is_some()
    }

    pub fn is_element_named(&self, id: Id, name: &str) -> bool {
        self.element_name(id)
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.record(id).and_then(|r| r.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.record(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// Ancestors of `id`, nearest first, ending with the document node.
    pub fn ancestors(&self, id: Id) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Descendants of `id` in tree order, excluding `id` itself.
    pub fn descendants(&self, id: Id) -> Vec<Id> {
        let mut out = Vec::new();
        let mut stack: Vec<Id> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// All elements in tree order.
    pub fn elements(&self) -> impl Iterator<Item = Id> + '_ {
        self.descendants(Id::DOCUMENT)
            .into_iter()
            .filter(|id| self.is_element(*id))
    }

    pub fn first_element_named(&self, name: &str) -> Option<Id> {
        self.elements().find(|id| self.is_element_named(*id, name))
    }

    pub fn body(&self) -> Option<Id> {
        self.first_element_named("body")
    }

    pub fn head(&self) -> Option<Id> {
        self.first_element_named("head")
    }

    /// First element in tree order whose `id` attribute equals `value`.
    pub fn element_by_id(&self, value: &str) -> Option<Id> {
        if value.is_empty() {
            return None;
        }
        self.elements().find(|id| self.attr(*id, "id") == Some(value))
    }

    pub fn attributes(&self, id: Id) -> &[Attribute] {
        match self.kind(id) {
            Some(NodeKind::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    /// Attribute value; a present attribute without a value reads as `""`.
    pub fn attr(&self, id: Id, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, id: Id, name: &str) -> bool {
        self.attributes(id)
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Set an attribute; returns `true` when the stored value changed.
    pub fn set_attr(&mut self, id: Id, name: &str, value: &str) -> bool {
        let Some(attributes) = self.attributes_mut(id) else {
            return false;
        };
        match attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) if v.as_deref() == Some(value) => false,
            Some((_, v)) => {
                *v = Some(value.to_string());
                true
            }
            None => {
                attributes.push((name.to_ascii_lowercase(), Some(value.to_string())));
                true
            }
        }
    }

    /// Remove an attribute; returns `true` if it was present.
    pub fn remove_attr(&mut self, id: Id, name: &str) -> bool {
        let Some(attributes) = self.attributes_mut(id) else {
            return false;
        };
        let before = attributes.len();
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        attributes.len() != before
    }

    pub fn classes(&self, id: Id) -> impl Iterator<Item = &str> {
        self.attr(id, "class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.classes(id).any(|c| c == class)
    }

    /// Add a class token; returns `true` if the class list changed.
    pub fn add_class(&mut self, id: Id, class: &str) -> bool {
        if !self.is_element(id) || self.has_class(id, class) {
            return false;
        }
        let mut list: Vec<&str> = self.classes(id).collect();
        list.push(class);
        let joined = list.join(" ");
        self.set_attr(id, "class", &joined)
    }

    /// Remove every occurrence of a class token; returns `true` if the class list changed.
    pub fn remove_class(&mut self, id: Id, class: &str) -> bool {
        if !self.has_class(id, class) {
            return false;
        }
        let joined = self
            .classes(id)
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(id, "class", &joined)
    }

    pub fn text_content(&self, id: Id) -> String {
        let mut out = String::new();
        if let Some(NodeKind::Text { text }) = self.kind(id) {
            out.push_str(text);
            return out;
        }
        for node in self.descendants(id) {
            if let Some(NodeKind::Text { text }) = self.kind(node) {
                out.push_str(text);
            }
        }
        out
    }

    pub fn create_element(&mut self, name: &str, attributes: Vec<Attribute>) -> Id {
        self.push(
            NodeKind::Element {
                name: name.to_ascii_lowercase(),
                attributes,
            },
            None,
        )
    }

    pub fn create_text(&mut self, text: &str) -> Id {
        self.push(
            NodeKind::Text {
                text: text.to_string(),
            },
            None,
        )
    }

    pub fn append_child(&mut self, parent: Id, child: Id) -> Result<(), DocumentError> {
        let parent_record = self.record(parent).ok_or(DocumentError::UnknownNode(parent))?;
        let child_record = self.record(child).ok_or(DocumentError::UnknownNode(child))?;
        if !parent_record.allows_children() {
            return Err(DocumentError::InvalidParent(parent));
        }
        if child_record.parent.is_some() || child == Id::DOCUMENT {
            return Err(DocumentError::AlreadyAttached(child));
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(DocumentError::CycleDetected { parent, child });
        }
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
        Ok(())
    }

    /// Materialize the subtree at `id` as an owned tree.
    pub fn to_node(&self, id: Id) -> Option<Node> {
        let record = self.record(id)?;
        let children = || {
            record
                .children
                .iter()
                .filter_map(|c| self.to_node(*c))
                .collect::<Vec<_>>()
        };
        Some(match &record.kind {
            NodeKind::Document { doctype } => Node::Document {
                doctype: doctype.clone(),
                children: children(),
            },
            NodeKind::Element { name, attributes } => Node::Element {
                name: name.clone(),
                attributes: attributes.clone(),
                children: children(),
            },
            NodeKind::Text { text } => Node::Text { text: text.clone() },
            NodeKind::Comment { text } => Node::Comment { text: text.clone() },
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<Id>,
}

impl Iterator for Ancestors<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>t</title></head>
<body>
  <div class="file-input-wrapper  extra"><input type="file" id="json-file"><label class="file-input-label">Drop</label></div>
  <textarea id="json-input">{}</textarea>
</body></html>"#;

    #[test]
    fn parses_into_arena_with_parent_links() {
        let doc = Document::parse(PAGE);
        let input = doc.element_by_id("json-file").expect("file input");
        let wrapper = doc.parent(input).expect("wrapper");
        assert!(doc.has_class(wrapper, "file-input-wrapper"));
        let chain: Vec<&str> = doc
            .ancestors(input)
            .filter_map(|a| doc.element_name(a))
            .collect();
        assert_eq!(chain, vec!["div", "body", "html"]);
        assert_eq!(doc.ancestors(input).last(), Some(Id::DOCUMENT));
        assert_eq!(doc.doctype(), Some("DOCTYPE html"));
    }

    #[test]
    fn class_list_edits_are_idempotent() {
        let mut doc = Document::parse(PAGE);
        let label = doc
            .elements()
            .find(|id| doc.has_class(*id, "file-input-label"))
            .expect("label");

        assert!(doc.add_class(label, "drag-highlight"));
        assert!(!doc.add_class(label, "drag-highlight"));
        assert_eq!(doc.attr(label, "class"), Some("file-input-label drag-highlight"));

        assert!(doc.remove_class(label, "drag-highlight"));
        assert!(!doc.remove_class(label, "drag-highlight"));
        assert_eq!(doc.attr(label, "class"), Some("file-input-label"));
    }

    #[test]
    fn attribute_edits_report_changes() {
        let mut doc = Document::parse(PAGE);
        let input = doc.element_by_id("json-input").expect("textarea");
        assert!(doc.set_attr(input, "Disabled", ""));
        assert!(doc.has_attr(input, "disabled"));
        assert_eq!(doc.attr(input, "disabled"), Some(""));
        assert!(!doc.set_attr(input, "disabled", ""));
        assert!(doc.remove_attr(input, "disabled"));
        assert!(!doc.remove_attr(input, "disabled"));
        assert_eq!(doc.text_content(input), "{}");
    }

    #[test]
    fn append_child_rejects_cycles_and_reparenting() {
        let mut doc = Document::parse(PAGE);
        let head = doc.head().expect("head");
        let body = doc.body().expect("body");

        let style = doc.create_element("STYLE", Vec::new());
        let text = doc.create_text(".a{}");
        assert_eq!(doc.append_child(style, text), Ok(()));
        assert_eq!(doc.append_child(head, style), Ok(()));
        assert_eq!(doc.parent(style), Some(head));
        assert_eq!(doc.text_content(style), ".a{}");

        assert_eq!(
            doc.append_child(body, style),
            Err(DocumentError::AlreadyAttached(style))
        );
        let html = doc.parent(body).expect("html");
        let orphan = doc.create_element("div", Vec::new());
        assert_eq!(doc.append_child(orphan, html), Err(DocumentError::AlreadyAttached(html)));
        assert_eq!(
            doc.append_child(text, orphan),
            Err(DocumentError::InvalidParent(text))
        );
        assert_eq!(
            doc.append_child(orphan, orphan),
            Err(DocumentError::CycleDetected {
                parent: orphan,
                child: orphan
            })
        );
    }

    #[test]
    fn element_by_id_returns_first_in_tree_order() {
        let doc = Document::parse(r#"<p id="x">a</p><p id="x">b</p>"#);
        let first = doc.element_by_id("x").expect("first");
        assert_eq!(doc.text_content(first), "a");
        assert_eq!(doc.element_by_id(""), None);
        assert_eq!(doc.element_by_id("missing"), None);
    }
}
