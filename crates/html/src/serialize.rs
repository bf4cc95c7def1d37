use crate::document::{Document, NodeKind};
use crate::types::{Id, RawBody, is_void_element, raw_body_kind};

/// Serialize the whole document back to markup.
pub fn to_html(doc: &Document) -> String {
    outer_html(doc, doc.root())
}

/// Serialize `id` and its subtree.
pub fn outer_html(doc: &Document, id: Id) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    out
}

fn write_node(doc: &Document, id: Id, out: &mut String) {
    let Some(kind) = doc.kind(id) else {
        return;
    };
    match kind {
        NodeKind::Document { doctype } => {
            if let Some(doctype) = doctype {
                out.push_str("<!");
                out.push_str(doctype);
                out.push('>');
            }
            for child in doc.children(id) {
                write_node(doc, *child, out);
            }
        }
        NodeKind::Element { name, attributes } => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                if let Some(v) = v {
                    out.push_str("=\"");
                    escape_into(v, true, out);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            let raw = raw_body_kind(name) == Some(RawBody::RawText);
            for child in doc.children(id) {
                match doc.kind(*child) {
                    Some(NodeKind::Text { text }) if raw => out.push_str(text),
                    _ => write_node(doc, *child, out),
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        NodeKind::Text { text } => escape_into(text, false, out),
        NodeKind::Comment { text } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn escape_into(s: &str, attribute: bool, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
