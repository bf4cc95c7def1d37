//! Selector subset used by the page behaviors and by scripted page interactions.
//!
//! Supported: type and universal selectors, `#id`, `.class`, attribute selectors with the
//! `=`, `^=`, `$=`, `*=` and `~=` operators, descendant and child (`>`) combinators, and
//! comma-separated lists. Anything else is a parse error, in the same way an unsupported
//! selector makes `querySelector` throw.
use html::{Document, Id};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected {found:?} at byte {at} in selector")]
    Unexpected { at: usize, found: char },
    #[error("unterminated {0} in selector")]
    Unterminated(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals,
    Prefix,
    Suffix,
    Substring,
    Includes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrSelector {
    pub name: String,
    pub op: AttrOp,
    pub value: String,
}

// HTML attributes whose values selectors compare ASCII case-insensitively.
const CASE_INSENSITIVE_ATTRS: &[&str] = &["type", "method", "dir", "lang", "rel"];

impl AttrSelector {
    fn matches(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        if CASE_INSENSITIVE_ATTRS.contains(&self.name.as_str()) {
            let folded = AttrSelector {
                name: String::new(),
                op: self.op,
                value: self.value.to_ascii_lowercase(),
            };
            return folded.matches(Some(&actual.to_ascii_lowercase()));
        }
        let v = self.value.as_str();
        match self.op {
            AttrOp::Exists => true,
            AttrOp::Equals => actual == v,
            // Empty operands never match for the substring family.
            AttrOp::Prefix => !v.is_empty() && actual.starts_with(v),
            AttrOp::Suffix => !v.is_empty() && actual.ends_with(v),
            AttrOp::Substring => !v.is_empty() && actual.contains(v),
            AttrOp::Includes => actual.split_ascii_whitespace().any(|t| t == v),
        }
    }
}

/// One compound selector such as `input.x[type="file"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrSelector>,
}

impl Compound {
    fn matches(&self, doc: &Document, id: Id) -> bool {
        let Some(name) = doc.element_name(id) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| !t.eq_ignore_ascii_case(name)) {
            return false;
        }
        if self.id.as_deref().is_some_and(|v| doc.attr(id, "id") != Some(v)) {
            return false;
        }
        if !self.classes.iter().all(|c| doc.has_class(id, c)) {
            return false;
        }
        self.attrs.iter().all(|a| a.matches(doc.attr(id, &a.name)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// A chain of compounds; `rest[i]` pairs the combinator to the left of a compound with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Complex {
    pub first: Compound,
    pub rest: Vec<(Combinator, Compound)>,
}

impl Complex {
    fn matches(&self, doc: &Document, id: Id) -> bool {
        // Flatten to subject-first order: (compound, combinator to its left).
        let mut parts: Vec<(&Compound, Option<Combinator>)> = Vec::with_capacity(self.rest.len() + 1);
        for (comb, compound) in self.rest.iter().rev() {
            parts.push((compound, Some(*comb)));
        }
        parts.push((&self.first, None));
        match_from(doc, id, &parts)
    }
}

fn match_from(doc: &Document, id: Id, parts: &[(&Compound, Option<Combinator>)]) -> bool {
    let Some(((compound, combinator), rest)) = parts.split_first() else {
        return true;
    };
    if !compound.matches(doc, id) {
        return false;
    }
    match combinator {
        None => true,
        Some(Combinator::Child) => doc
            .parent(id)
            .is_some_and(|p| match_from(doc, p, rest)),
        Some(Combinator::Descendant) => doc.ancestors(id).any(|a| match_from(doc, a, rest)),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Complex>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input)
            .parse_list()
            .inspect_err(|err| log::trace!(target: "css.selector", "rejected `{input}`: {err}"))
    }

    pub fn matches(&self, doc: &Document, id: Id) -> bool {
        self.0.iter().any(|c| c.matches(doc, id))
    }
}

/// Elements under `scope` matching `selector`, in tree order.
pub fn query_selector_all(
    doc: &Document,
    scope: Id,
    selector: &str,
) -> Result<Vec<Id>, SelectorError> {
    let list = SelectorList::parse(selector)?;
    Ok(doc
        .descendants(scope)
        .into_iter()
        .filter(|id| list.matches(doc, *id))
        .collect())
}

pub fn query_selector(
    doc: &Document,
    scope: Id,
    selector: &str,
) -> Result<Option<Id>, SelectorError> {
    let list = SelectorList::parse(selector)?;
    Ok(doc
        .descendants(scope)
        .into_iter()
        .find(|id| list.matches(doc, *id)))
}

/// Nearest inclusive ancestor of `id` matching `selector`.
pub fn closest(doc: &Document, id: Id, selector: &str) -> Result<Option<Id>, SelectorError> {
    let list = SelectorList::parse(selector)?;
    Ok(std::iter::once(id)
        .chain(doc.ancestors(id))
        .find(|candidate| list.matches(doc, *candidate)))
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::Unexpected {
                at: self.pos,
                found,
            },
            None => SelectorError::Unterminated("selector"),
        }
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.unexpected());
        }
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut out = Vec::new();
        loop {
            self.skip_ws();
            if self.peek().is_none() {
                return Err(if out.is_empty() {
                    SelectorError::Empty
                } else {
                    SelectorError::Unterminated("selector list")
                });
            }
            out.push(self.parse_complex()?);
            match self.bump() {
                None => return Ok(SelectorList(out)),
                Some(',') => continue,
                Some(c) => {
                    self.pos -= c.len_utf8();
                    return Err(self.unexpected());
                }
            }
        }
    }

    fn parse_complex(&mut self) -> Result<Complex, SelectorError> {
        let first = self.parse_compound()?;
        let mut rest = Vec::new();
        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.bump();
                    self.skip_ws();
                    Combinator::Child
                }
                Some(_) if had_ws => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            rest.push((combinator, self.parse_compound()?));
        }
        Ok(Complex { first, rest })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let start = self.pos;

        match self.peek() {
            Some('*') => {
                self.bump();
            }
            Some(c) if c.is_ascii_alphabetic() => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attrs.push(self.parse_attr()?);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn parse_attr(&mut self) -> Result<AttrSelector, SelectorError> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();
        let op = match self.bump() {
            Some(']') => {
                return Ok(AttrSelector {
                    name,
                    op: AttrOp::Exists,
                    value: String::new(),
                });
            }
            Some('=') => AttrOp::Equals,
            Some(c @ ('^' | '$' | '*' | '~')) => {
                if self.bump() != Some('=') {
                    self.pos -= 1;
                    return Err(self.unexpected());
                }
                match c {
                    '^' => AttrOp::Prefix,
                    '$' => AttrOp::Suffix,
                    '*' => AttrOp::Substring,
                    _ => AttrOp::Includes,
                }
            }
            Some(c) => {
                self.pos -= c.len_utf8();
                return Err(self.unexpected());
            }
            None => return Err(SelectorError::Unterminated("attribute selector")),
        };
        self.skip_ws();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                let rel = self.src[start..]
                    .find(q)
                    .ok_or(SelectorError::Unterminated("string"))?;
                self.pos = start + rel + 1;
                self.src[start..start + rel].to_string()
            }
            _ => self.ident()?,
        };
        self.skip_ws();
        match self.bump() {
            Some(']') => Ok(AttrSelector { name, op, value }),
            None => Err(SelectorError::Unterminated("attribute selector")),
            Some(c) => {
                self.pos -= c.len_utf8();
                Err(self.unexpected())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<body>
<nav><a href="#usage">Usage</a><a href="/help/">Help</a><a href="#">Top</a></nav>
<section id="usage" class="card tips">
  <div class="file-input-wrapper"><input type="file" id="f1"><label class="file-input-label">A</label></div>
  <div class="other"><input type="FILE" id="f2"></div>
  <input type="text" id="t">
</section>
</body>"##;

    fn ids(doc: &Document, found: &[Id]) -> Vec<String> {
        found
            .iter()
            .map(|id| {
                doc.attr(*id, "id")
                    .or_else(|| doc.attr(*id, "href"))
                    .unwrap_or("?")
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn anchors_with_fragment_hrefs() {
        let doc = Document::parse(PAGE);
        let found = query_selector_all(&doc, doc.root(), r##"a[href^="#"]"##).expect("parse");
        assert_eq!(ids(&doc, &found), vec!["#usage", "#"]);
    }

    #[test]
    fn type_attribute_values_ignore_case() {
        let doc = Document::parse(PAGE);
        let found = query_selector_all(&doc, doc.root(), r#"input[type="file"]"#).expect("parse");
        assert_eq!(ids(&doc, &found), vec!["f1", "f2"]);
        let found = query_selector_all(&doc, doc.root(), r#"[class="Card tips"]"#).expect("parse");
        assert!(found.is_empty());
    }

    #[test]
    fn closest_includes_self_and_walks_up() {
        let doc = Document::parse(PAGE);
        let f1 = doc.element_by_id("f1").expect("f1");
        let f2 = doc.element_by_id("f2").expect("f2");
        let wrapper = closest(&doc, f1, ".file-input-wrapper").expect("parse");
        assert!(wrapper.is_some_and(|w| doc.has_class(w, "file-input-wrapper")));
        assert_eq!(closest(&doc, f2, ".file-input-wrapper"), Ok(None));
        assert_eq!(closest(&doc, f1, "input"), Ok(Some(f1)));
    }

    #[test]
    fn combinators_and_lists() {
        let doc = Document::parse(PAGE);
        let root = doc.root();
        let found = query_selector_all(&doc, root, "section.tips > input, .other input").expect("parse");
        assert_eq!(ids(&doc, &found), vec!["f2", "t"]);
        let found = query_selector_all(&doc, root, "#usage .file-input-label").expect("parse");
        assert_eq!(found.len(), 1);
        assert_eq!(query_selector(&doc, root, "nav > input"), Ok(None));
    }

    #[test]
    fn scoped_queries_only_see_descendants() {
        let doc = Document::parse(PAGE);
        let wrapper = query_selector(&doc, doc.root(), ".file-input-wrapper")
            .expect("parse")
            .expect("wrapper");
        let label = query_selector(&doc, wrapper, ".file-input-label").expect("parse");
        assert!(label.is_some());
        assert_eq!(query_selector(&doc, wrapper, "#t"), Ok(None));
    }

    #[test]
    fn rejects_unsupported_or_malformed_selectors() {
        assert_eq!(SelectorList::parse(""), Err(SelectorError::Empty));
        assert_eq!(SelectorList::parse("   "), Err(SelectorError::Empty));
        assert!(SelectorList::parse("#").is_err());
        assert!(SelectorList::parse("#1abc").is_err());
        assert!(SelectorList::parse("a:hover").is_err());
        assert!(SelectorList::parse("a + b").is_err());
        assert!(SelectorList::parse("[href^=\"#").is_err());
        assert!(SelectorList::parse("a,").is_err());
        assert!(SelectorList::parse("#section-2").is_ok());
    }
}
