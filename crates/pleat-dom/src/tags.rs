//! Tag classification.
//!
//! Tag classes decide two things: whether the parser looks for children at
//! all, and whether the formatter may restructure an element's content.

use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

/// Elements which cannot contain content, even without self-closing syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoidElement {
    /// `<area>`
    Area,
    /// `<base>`
    Base,
    /// `<br>`
    Br,
    /// `<col>`
    Col,
    /// `<command>`
    Command,
    /// `<embed>`
    Embed,
    /// `<hr>`
    Hr,
    /// `<img>`
    Img,
    /// `<input>`
    Input,
    /// `<keygen>`
    Keygen,
    /// `<link>`
    Link,
    /// `<meta>`
    Meta,
    /// `<param>`
    Param,
    /// `<source>`
    Source,
    /// `<track>`
    Track,
    /// `<wbr>`
    Wbr,
}

/// Elements whose content is whitespace-sensitive when rendered, so the
/// formatter must not trim or re-indent anything inside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WhitespaceSensitiveTag {
    /// `<span>`
    Span,
    /// `<pre>`
    Pre,
    /// `<a>`
    A,
    /// `<label>`
    Label,
    /// `<p>`
    P,
}

/// Check whether `tag_name` is in the void element set (case-insensitive).
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VoidElement::from_str(tag_name).is_ok()
}

/// Check whether `tag_name` is whitespace-sensitive (case-insensitive).
#[must_use]
pub fn is_whitespace_sensitive(tag_name: &str) -> bool {
    WhitespaceSensitiveTag::from_str(tag_name).is_ok()
}

/// Directives such as `<!DOCTYPE html>` are tags whose name starts with `!`.
#[must_use]
pub fn is_directive(tag_name: &str) -> bool {
    tag_name.starts_with('!')
}
