//! Locator abstraction for element selection.
//!
//! A [`Selector`] is a structured description of which element(s) to find;
//! a [`Locator`] pairs it with auto-wait options. Selectors compose: a row
//! can be picked positionally with [`Locator::nth`] and a field inside it
//! addressed with [`Locator::locator`], so the whole chain resolves against
//! the same DOM node.
//!
//! Drivers consume selectors in two ways: the Chromium driver compiles them
//! to JavaScript via [`Selector::to_query_all`], the in-memory storefront
//! matches them structurally.

use crate::wait::DEFAULT_POLL_INTERVAL_MS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default timeout for auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// Raw CSS selector (e.g., "button.primary")
    Css(String),
    /// Element id (`#id`)
    Id(String),
    /// Class name (`.class`)
    Class(String),
    /// `data-test` attribute hook used by the storefront
    DataTest(String),
    /// Tag name (e.g., "button")
    Tag(String),
    /// Base selector filtered to elements whose text contains `text`
    WithText {
        /// Base selector
        base: Box<Selector>,
        /// Text content to match
        text: String,
    },
    /// The `index`-th match (zero-based) of the base selector
    Nth {
        /// Base selector
        base: Box<Selector>,
        /// Position among the matches
        index: usize,
    },
    /// Descendants matching `child` inside elements matching `parent`
    Within {
        /// Scope selector
        parent: Box<Selector>,
        /// Selector evaluated inside each scope element
        child: Box<Selector>,
    },
}

impl Selector {
    /// Create a raw CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a class selector
    #[must_use]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Create a `data-test` selector
    #[must_use]
    pub fn data_test(value: impl Into<String>) -> Self {
        Self::DataTest(value.into())
    }

    /// Create a tag selector
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Plain CSS for selectors that CSS can express on its own
    #[must_use]
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::Css(s) | Self::Tag(s) => Some(s.clone()),
            Self::Id(id) => Some(format!("#{id}")),
            Self::Class(class) => Some(format!(".{class}")),
            Self::DataTest(value) => Some(format!("[data-test={}]", js_string(value))),
            Self::Within { parent, child } => {
                Some(format!("{} {}", parent.to_css()?, child.to_css()?))
            }
            Self::WithText { .. } | Self::Nth { .. } => None,
        }
    }

    /// JavaScript expression evaluating to an array of matching elements,
    /// searched below the node expression `root`
    #[must_use]
    pub fn to_query_all(&self, root: &str) -> String {
        match self {
            Self::WithText { base, text } => format!(
                "{}.filter(el => (el.textContent || '').includes({}))",
                base.to_query_all(root),
                js_string(text)
            ),
            Self::Nth { base, index } => {
                format!("{}.slice({index}, {})", base.to_query_all(root), index + 1)
            }
            Self::Within { parent, child } => format!(
                "{}.flatMap(scope => {})",
                parent.to_query_all(root),
                child.to_query_all("scope")
            ),
            simple => {
                let css = simple.to_css().unwrap_or_default();
                format!("Array.from({root}.querySelectorAll({}))", js_string(&css))
            }
        }
    }

    /// JavaScript expression for the first match (or `null`)
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("({}[0] || null)", self.to_query_all("document"))
    }

    /// JavaScript expression counting matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("{}.length", self.to_query_all("document"))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithText { base, text } => write!(f, "{base}:has-text({text:?})"),
            Self::Nth { base, index } => write!(f, "{base} >> nth={index}"),
            Self::Within { parent, child } => write!(f, "{parent} >> {child}"),
            simple => write!(f, "{}", simple.to_css().unwrap_or_default()),
        }
    }
}

/// Quote a string as a JavaScript string literal
pub(crate) fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

/// Locator options for customizing behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting
    pub timeout: Duration,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// A locator for finding and interacting with elements.
///
/// Locators are cheap descriptions; nothing is resolved until a driver
/// performs an action or query with one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Filter by text content
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            selector: Selector::WithText {
                base: Box::new(self.selector),
                text: text.into(),
            },
            options: self.options,
        }
    }

    /// Pick the `index`-th match
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        Self {
            selector: Selector::Nth {
                base: Box::new(self.selector.clone()),
                index,
            },
            options: self.options.clone(),
        }
    }

    /// Pick the first match
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Scope a child selector inside this locator
    #[must_use]
    pub fn locator(&self, child: impl Into<Selector>) -> Self {
        Self {
            selector: Selector::Within {
                parent: Box::new(self.selector.clone()),
                child: Box::new(child.into()),
            },
            options: self.options.clone(),
        }
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set a custom polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// Timeout in whole milliseconds, for error reporting
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.options.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl From<Selector> for Locator {
    fn from(selector: Selector) -> Self {
        Self::from_selector(selector)
    }
}

impl From<&str> for Selector {
    fn from(css: &str) -> Self {
        Self::Css(css.to_owned())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt(f)
    }
}
