/// A single property: `border-color: #38a169`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.trim().to_ascii_lowercase(),
            value: value.trim().to_string(),
        }
    }
}

// input: "color: red; font-size: 12px;"
// output: [Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim();
            if name.is_empty() {
                return None;
            }
            Some(Declaration::new(name, v))
        })
        .collect()
}

/// Declarations of a `style` attribute, kept in source order.
///
/// Setting a property that already exists replaces it in place, so serializing after an edit
/// keeps the author's ordering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<Declaration>,
}

impl InlineStyle {
    pub fn parse(attr: &str) -> Self {
        let mut style = Self::default();
        for decl in parse_declarations(attr) {
            style.set(&decl.name, &decl.value);
        }
        style
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.value.as_str())
    }

    /// Set `name: value`; an empty value removes the property, as `style.x = ''` does.
    pub fn set(&mut self, name: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.remove(name);
            return;
        }
        match self
            .declarations
            .iter_mut()
            .find(|d| d.name.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.value = value.to_string(),
            None => self.declarations.push(Declaration::new(name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.declarations.len();
        self.declarations
            .retain(|d| !d.name.eq_ignore_ascii_case(name));
        before != self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Serialize back to attribute text: `a: 1; b: 2;`.
    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|d| format!("{}: {};", d.name, d.value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
