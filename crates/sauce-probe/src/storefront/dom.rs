//! Minimal element tree and selector matching for the storefront double.

use crate::catalog::Product;
use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};

/// Form control a node is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Username,
    Password,
    FirstName,
    LastName,
    PostalCode,
    Sort,
}

/// What clicking a node does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Login,
    CloseError,
    OpenMenu,
    CloseMenu,
    AllItems,
    About,
    Logout,
    ResetApp,
    OpenCart,
    AddToCart(Product),
    RemoveFromCart(Product),
    ToggleDetails(Product),
    OpenProduct(Product),
    ContinueShopping,
    Checkout,
    ContinueCheckout,
    Cancel,
    Finish,
    BackToProducts,
}

/// One element
#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<&'static str>,
    pub data_test: Option<String>,
    pub text: String,
    pub value: Option<String>,
    pub hidden: bool,
    pub disabled: bool,
    pub action: Option<Action>,
    pub field: Option<Field>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn div(classes: &'static str) -> Self {
        Self::new("div").class(classes)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, classes: &'static str) -> Self {
        self.classes.extend(classes.split_whitespace());
        self
    }

    pub fn data_test(mut self, value: impl Into<String>) -> Self {
        self.data_test = Some(value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn hidden_if(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn bind(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    /// Attach a click action to this node and every descendant without one,
    /// so clicks on inner elements bubble up to it
    pub fn on_click(mut self, action: Action) -> Self {
        fn inherit(node: &mut Node, action: Action) {
            if node.action.is_none() {
                node.action = Some(action);
            }
            for child in &mut node.children {
                inherit(child, action);
            }
        }
        inherit(&mut self, action);
        self
    }

    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    pub fn child_if(self, present: bool, child: impl FnOnce() -> Self) -> Self {
        if present {
            self.child(child())
        } else {
            self
        }
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Own text followed by the text of every descendant
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    fn matches(&self, simple: &Simple) -> bool {
        match simple {
            Simple::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
            Simple::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Simple::Class(class) => self.classes.iter().any(|c| c == class),
            Simple::DataTest(value) => self.data_test.as_deref() == Some(value.as_str()),
        }
    }
}

/// A matched node together with its effective visibility
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hit<'a> {
    pub node: &'a Node,
    pub visible: bool,
}

impl<'a> Hit<'a> {
    pub fn root(node: &'a Node) -> Self {
        Self {
            node,
            visible: !node.hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Simple {
    Tag(String),
    Id(String),
    Class(String),
    DataTest(String),
}

/// Descendants of `scope` in document order
fn descendants<'a>(scope: Hit<'a>, out: &mut Vec<Hit<'a>>) {
    for child in &scope.node.children {
        let hit = Hit {
            node: child,
            visible: scope.visible && !child.hidden,
        };
        out.push(hit);
        descendants(hit, out);
    }
}

fn matching<'a>(scope: Hit<'a>, compound: &[Simple]) -> Vec<Hit<'a>> {
    let mut all = Vec::new();
    descendants(scope, &mut all);
    all.into_iter()
        .filter(|hit| compound.iter().all(|s| hit.node.matches(s)))
        .collect()
}

/// Every match of `selector` below `scope`, in document order
pub(crate) fn query_all<'a>(scope: Hit<'a>, selector: &Selector) -> ProbeResult<Vec<Hit<'a>>> {
    Ok(match selector {
        Selector::Id(id) => matching(scope, &[Simple::Id(id.clone())]),
        Selector::Class(class) => matching(scope, &[Simple::Class(class.clone())]),
        Selector::DataTest(value) => matching(scope, &[Simple::DataTest(value.clone())]),
        Selector::Tag(tag) => matching(scope, &[Simple::Tag(tag.clone())]),
        Selector::Css(css) => {
            let chain = parse_css(css)?;
            let mut scopes = vec![scope];
            for compound in &chain {
                let mut next: Vec<Hit<'a>> = Vec::new();
                for s in scopes {
                    for hit in matching(s, compound) {
                        if !next.iter().any(|h| std::ptr::eq(h.node, hit.node)) {
                            next.push(hit);
                        }
                    }
                }
                scopes = next;
            }
            scopes
        }
        Selector::WithText { base, text } => query_all(scope, base)?
            .into_iter()
            .filter(|hit| hit.node.text_content().contains(text.as_str()))
            .collect(),
        Selector::Nth { base, index } => query_all(scope, base)?
            .into_iter()
            .nth(*index)
            .into_iter()
            .collect(),
        Selector::Within { parent, child } => {
            let mut out = Vec::new();
            for p in query_all(scope, parent)? {
                out.extend(query_all(p, child)?);
            }
            out
        }
    })
}

/// Parse the CSS subset the storefront double understands: descendant chains
/// of compounds built from tag, `#id`, `.class` and `[data-test=...]`
fn parse_css(css: &str) -> ProbeResult<Vec<Vec<Simple>>> {
    let unsupported = || ProbeError::NotActionable {
        selector: css.to_string(),
        reason: "selector syntax not supported by the storefront double".to_string(),
    };

    let mut chain = Vec::new();
    for part in css.split_whitespace() {
        let mut compound = Vec::new();
        let mut rest = part;
        while !rest.is_empty() {
            if let Some(attr) = rest.strip_prefix('[') {
                let end = attr.find(']').ok_or_else(unsupported)?;
                let (name, value) = attr[..end].split_once('=').ok_or_else(unsupported)?;
                if name.trim() != "data-test" {
                    return Err(unsupported());
                }
                let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                compound.push(Simple::DataTest(value.to_string()));
                rest = &attr[end + 1..];
                continue;
            }
            let (kind, body) = match rest.as_bytes()[0] {
                b'#' => (Some('#'), &rest[1..]),
                b'.' => (Some('.'), &rest[1..]),
                _ => (None, rest),
            };
            let end = body.find(['#', '.', '[']).unwrap_or(body.len());
            let ident = &body[..end];
            if ident.is_empty() || ident.contains([':', '>', '+', '~', ',', '*']) {
                return Err(unsupported());
            }
            compound.push(match kind {
                Some('#') => Simple::Id(ident.to_string()),
                Some(_) => Simple::Class(ident.to_string()),
                None => Simple::Tag(ident.to_string()),
            });
            rest = &body[end..];
        }
        chain.push(compound);
    }
    if chain.is_empty() {
        return Err(unsupported());
    }
    Ok(chain)
}
