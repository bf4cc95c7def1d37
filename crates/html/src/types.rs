pub type NodeId = u32;

/// Stable handle of a node inside a [`Document`](crate::Document).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const DOCUMENT: Id = Id(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub type Attribute = (String, Option<String>);

#[derive(Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

/// Owned tree produced by the tree builder, before it is moved into a [`Document`](crate::Document).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document {
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl Node {
    pub fn element(name: &str, attributes: Vec<Attribute>, children: Vec<Node>) -> Node {
        Node::Element {
            name: name.to_ascii_lowercase(),
            attributes,
            children,
        }
    }

    pub fn text(text: &str) -> Node {
        Node::Text {
            text: text.to_string(),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            Node::Text { .. } | Node::Comment { .. } => &[],
        }
    }
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose content is scanned up to the matching close tag without tag recognition.
pub(crate) fn raw_body_kind(name: &str) -> Option<RawBody> {
    match name {
        "script" | "style" => Some(RawBody::RawText),
        "textarea" | "title" => Some(RawBody::RcData),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RawBody {
    RawText,
    RcData,
}
