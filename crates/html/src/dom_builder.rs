use crate::tokenizer::tokenize;
use crate::types::{Attribute, Node, Token};

/// Parse a page into an owned tree rooted at [`Node::Document`].
pub fn parse_html(input: &str) -> Node {
    build_dom(tokenize(input))
}

/// Build a tree from a token stream.
///
/// End tags close the nearest open element with the same name (and everything opened after
/// it); end tags with no open counterpart are dropped. Elements still open at the end are
/// closed implicitly.
pub fn build_dom(tokens: Vec<Token>) -> Node {
    let mut doctype = None;
    let mut root_children: Vec<Node> = Vec::new();
    let mut open: Vec<OpenElement> = Vec::new();

    fn append(open: &mut [OpenElement], root_children: &mut Vec<Node>, node: Node) {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => root_children.push(node),
        }
    }

    for token in tokens {
        match token {
            Token::Doctype(s) => doctype = Some(s),
            Token::Comment(text) => append(&mut open, &mut root_children, Node::Comment { text }),
            Token::Text(text) => {
                if !text.is_empty() {
                    append(&mut open, &mut root_children, Node::Text { text });
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = OpenElement {
                    name,
                    attributes,
                    children: Vec::new(),
                };
                if self_closing {
                    append(&mut open, &mut root_children, element.close());
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                let Some(depth) = open.iter().rposition(|e| e.name == name) else {
                    log::debug!(target: "html.builder", "dropping unmatched end tag </{name}>");
                    continue;
                };
                while open.len() > depth {
                    let Some(element) = open.pop() else { break };
                    append(&mut open, &mut root_children, element.close());
                }
            }
        }
    }

    while let Some(element) = open.pop() {
        append(&mut open, &mut root_children, element.close());
    }

    Node::Document {
        doctype,
        children: root_children,
    }
}

struct OpenElement {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl OpenElement {
    fn close(self) -> Node {
        Node::Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nests_elements_and_closes_voids() {
        let dom = parse_html(r#"<div class="w"><input type="file"><label>Drop</label></div>"#);
        assert_eq!(
            dom,
            Node::Document {
                doctype: None,
                children: vec![Node::element(
                    "div",
                    vec![("class".into(), Some("w".into()))],
                    vec![
                        Node::element("input", vec![("type".into(), Some("file".into()))], vec![]),
                        Node::element("label", vec![], vec![Node::text("Drop")]),
                    ],
                )],
            }
        );
    }

    #[test]
    fn unmatched_end_tag_is_ignored() {
        let dom = parse_html("<div><p>a</span>b</p></div>");
        assert_eq!(
            dom.children(),
            &[Node::element(
                "div",
                vec![],
                vec![Node::element("p", vec![], vec![Node::text("a"), Node::text("b")])],
            )]
        );
    }

    #[test]
    fn end_tag_closes_intervening_elements() {
        let dom = parse_html("<section><div><p>x</section><footer></footer>");
        let names: Vec<&str> = dom
            .children()
            .iter()
            .filter_map(|n| match n {
                Node::Element { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["section", "footer"]);
    }

    #[test]
    fn keeps_doctype_and_deep_nesting() {
        let depth = 5_000;
        let mut src = String::from("<!DOCTYPE html>");
        src.push_str(&"<div>".repeat(depth));
        let dom = parse_html(&src);
        let Node::Document { doctype, children } = &dom else {
            panic!("expected document root");
        };
        assert_eq!(doctype.as_deref(), Some("DOCTYPE html"));

        let mut seen = 0;
        let mut level = children.as_slice();
        while let [Node::Element { children, .. }] = level {
            seen += 1;
            level = children.as_slice();
        }
        assert_eq!(seen, depth);
    }
}
