//! XML payloads for POST requests.
//!
//! Write calls (`ProductCreate`, `Image`, `CreateWebhook`, ...) send an XML
//! document whose root is `<Request>`. Payloads are built from a closed set of
//! node types: an [`XmlElement`] holds nothing, text, or child elements, and
//! text is either [`XmlText::Plain`] (entity-escaped) or [`XmlText::Markup`]
//! (wrapped in CDATA so embedded HTML survives untouched).
//!
//! # Example
//!
//! ```rust
//! use seller_center::clients::{render_document, XmlElement};
//!
//! let node = XmlElement::parent(
//!     "Node",
//!     vec![
//!         XmlElement::text("Id", "123").unwrap(),
//!         XmlElement::text("Notification", "Hello").unwrap(),
//!     ],
//! )
//! .unwrap();
//!
//! let xml = render_document("Request", &[node]);
//! assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Request>"));
//! ```

use std::fmt::Write as _;
use thiserror::Error;

/// The XML declaration prepended to every payload.
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const INDENT: &str = "    ";

/// Errors raised while building an XML payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The element name is not a valid XML name.
    #[error("Invalid XML element name '{name}'")]
    InvalidElementName {
        /// The rejected name.
        name: String,
    },
}

/// Text content of an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlText {
    /// Ordinary text, entity-escaped on output.
    Plain(String),
    /// Markup such as HTML descriptions, emitted inside CDATA sections.
    Markup(String),
}

impl XmlText {
    /// Plain text.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self::Plain(value.into())
    }

    /// Markup text.
    #[must_use]
    pub fn markup(value: impl Into<String>) -> Self {
        Self::Markup(value.into())
    }

    /// Returns the unescaped text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Markup(s) => s,
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Plain(s) => escape_into(out, s),
            Self::Markup(s) => {
                out.push_str("<![CDATA[");
                out.push_str(&s.replace("]]>", "]]]]><![CDATA[>"));
                out.push_str("]]>");
            }
        }
    }
}

impl From<&str> for XmlText {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl From<String> for XmlText {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

/// Content of an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlContent {
    /// No content: `<Name></Name>`.
    Empty,
    /// A single text node.
    Text(XmlText),
    /// Nested elements, in order.
    Children(Vec<XmlElement>),
}

/// An element of a request payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    content: XmlContent,
}

impl XmlElement {
    /// Creates an element with validated `name` and the given content.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidElementName`] if `name` is not a valid XML name.
    pub fn new(name: impl Into<String>, content: XmlContent) -> Result<Self, XmlError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(XmlError::InvalidElementName { name });
        }
        Ok(Self { name, content })
    }

    /// Creates an element with no content.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidElementName`] if `name` is not a valid XML name.
    pub fn empty(name: impl Into<String>) -> Result<Self, XmlError> {
        Self::new(name, XmlContent::Empty)
    }

    /// Creates an element holding plain text.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidElementName`] if `name` is not a valid XML name.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Result<Self, XmlError> {
        Self::new(name, XmlContent::Text(XmlText::Plain(value.into())))
    }

    /// Creates an element holding markup rendered as CDATA.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidElementName`] if `name` is not a valid XML name.
    pub fn markup(name: impl Into<String>, value: impl Into<String>) -> Result<Self, XmlError> {
        Self::new(name, XmlContent::Text(XmlText::Markup(value.into())))
    }

    /// Creates an element holding `children`.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidElementName`] if `name` is not a valid XML name.
    pub fn parent(name: impl Into<String>, children: Vec<Self>) -> Result<Self, XmlError> {
        Self::new(name, XmlContent::Children(children))
    }

    /// Returns the element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element content.
    #[must_use]
    pub const fn content(&self) -> &XmlContent {
        &self.content
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let pad = INDENT.repeat(depth);
        let _ = write!(out, "{pad}<{}>", self.name);

        match &self.content {
            XmlContent::Empty => {}
            XmlContent::Text(text) => text.write_to(out),
            XmlContent::Children(children) if children.is_empty() => {}
            XmlContent::Children(children) => {
                for child in children {
                    out.push('\n');
                    child.write_to(out, depth + 1);
                }
                out.push('\n');
                out.push_str(&pad);
            }
        }

        let _ = write!(out, "</{}>", self.name);
    }
}

/// Renders a complete document: the XML declaration, a newline, and `root`
/// wrapping `elements`, indented by four spaces per level.
///
/// The output carries no trailing newline.
#[must_use]
pub fn render_document(root: &str, elements: &[XmlElement]) -> String {
    let mut out = String::with_capacity(64 + elements.len() * 64);
    out.push_str(XML_HEADER);
    out.push('\n');

    let root = XmlElement {
        name: root.to_string(),
        content: XmlContent::Children(elements.to_vec()),
    };
    root.write_to(&mut out, 0);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(c),
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
