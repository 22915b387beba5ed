//! Minimal ordered XML tree for Qt Linguist `.ts` catalogs.
//!
//! The tree keeps what a round trip needs: element order, attribute order,
//! text, tails (the text that follows an element inside its parent), comments
//! and the `<!DOCTYPE>` line. Processing instructions and whitespace outside
//! the root element are dropped.

use std::{borrow::Cow, io::Write};

use anyhow::{Result, anyhow, bail};
use quick_xml::{
    Reader, Writer,
    escape::{partial_escape, unescape},
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

/// Two spaces per nesting level.
const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub node: Node,
    pub tail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Child>,
    /// Written as `<name/>` when it still has no content.
    pub self_closing: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            self_closing: false,
        }
    }

    fn from_start(start: &BytesStart<'_>, self_closing: bool) -> Result<Self> {
        let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
        element.self_closing = self_closing;
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value);
            let value = unescape(&normalize_line_breaks(&raw))?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(index).1)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match &child.node {
            Node::Element(e) => Some(e),
            Node::Comment(_) => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|child| match &mut child.node {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Return the first child called `name`, appending an empty one if absent.
    pub fn child_or_insert(&mut self, name: &str) -> &mut Element {
        if self.child(name).is_none() {
            self.push_element(Element::new(name));
        }
        match self.child_mut(name) {
            Some(e) => e,
            None => unreachable!("child was just inserted"),
        }
    }

    pub fn push_element(&mut self, element: Element) {
        self.self_closing = false;
        self.children.push(Child {
            node: Node::Element(element),
            tail: None,
        });
    }

    /// Visit every descendant element named `name`, in document order.
    /// Matches are not searched for nested matches.
    pub fn for_each_named_mut(&mut self, name: &str, f: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Node::Element(e) = &mut child.node {
                if e.name == name {
                    f(e);
                } else {
                    e.for_each_named_mut(name, f);
                }
            }
        }
    }

    /// Append character data at the current end of this element's content.
    fn append_text(&mut self, text: &str) {
        let slot = match self.children.last_mut() {
            Some(child) => &mut child.tail,
            None => &mut self.text,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    /// Normalize whitespace-only text so every nesting level is indented by
    /// two spaces. Text that contains anything besides whitespace is kept, as
    /// is the text of leaf elements.
    pub fn indent(&mut self, level: usize) {
        if self.children.is_empty() {
            return;
        }
        let inner = format!("\n{}", INDENT.repeat(level + 1));
        let outer = format!("\n{}", INDENT.repeat(level));

        if is_blank(&self.text) {
            self.text = Some(inner.clone());
        }
        let last = self.children.len() - 1;
        for (index, child) in self.children.iter_mut().enumerate() {
            if let Node::Element(e) = &mut child.node {
                e.indent(level + 1);
            }
            if is_blank(&child.tail) {
                child.tail = Some(if index == last {
                    outer.clone()
                } else {
                    inner.clone()
                });
            }
        }
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        let empty = self.children.is_empty() && self.text.as_deref().unwrap_or("").is_empty();
        if empty && self.self_closing {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            write_text(writer, text)?;
        }
        for child in &self.children {
            match &child.node {
                Node::Element(e) => e.write(writer)?,
                Node::Comment(c) => {
                    writer.write_event(Event::Comment(BytesText::from_escaped(c.as_str())))?
                }
            }
            if let Some(tail) = &child.tail {
                write_text(writer, tail)?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

/// `\r\n` and lone `\r` become `\n`, as an XML processor must do before
/// parsing. Character references such as `&#13;` are expanded afterwards and
/// so survive.
fn normalize_line_breaks(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

fn is_blank(text: &Option<String>) -> bool {
    text.as_deref().is_none_or(|t| t.trim().is_empty())
}

fn write_text<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    }
    Ok(())
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Content of the `<!DOCTYPE ...>` declaration, e.g. `TS`.
    pub doctype: Option<String>,
    pub root: Element,
}

impl Document {
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut doctype = None;
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| anyhow!("{} at byte {}", e, reader.buffer_position()))?;
            match event {
                Event::DocType(text) => {
                    doctype = Some(String::from_utf8_lossy(&text).trim().to_string());
                }
                Event::Start(start) => stack.push(Element::from_start(&start, false)?),
                Event::Empty(start) => {
                    let element = Element::from_start(&start, true)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let Some(element) = stack.pop() else {
                        bail!("Unexpected closing tag");
                    };
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        let raw = String::from_utf8_lossy(&text);
                        parent.append_text(&unescape(&normalize_line_breaks(&raw))?);
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        let raw = String::from_utf8_lossy(&data);
                        parent.append_text(&normalize_line_breaks(&raw));
                    }
                }
                Event::Comment(comment) => {
                    if let Some(parent) = stack.last_mut() {
                        let comment = String::from_utf8_lossy(&comment).into_owned();
                        parent.children.push(Child {
                            node: Node::Comment(comment),
                            tail: None,
                        });
                    }
                }
                Event::Eof => break,
                Event::Decl(_) | Event::PI(_) => {}
            }
        }

        if !stack.is_empty() {
            bail!("Unexpected end of document: <{}> is not closed", stack[stack.len() - 1].name);
        }
        let root = root.ok_or_else(|| anyhow!("Document has no root element"))?;
        Ok(Self { doctype, root })
    }

    /// Serialize with an XML declaration, the original doctype and a trailing newline.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.get_mut().write_all(b"\n")?;
        if let Some(doctype) = &self.doctype {
            writer.write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))?;
            writer.get_mut().write_all(b"\n")?;
        }
        self.root.write(&mut writer)?;
        writer.get_mut().write_all(b"\n")?;

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_element(element),
        None if root.is_none() => *root = Some(element),
        None => bail!("Document has more than one root element"),
    }
    Ok(())
}
