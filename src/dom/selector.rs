// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSS Selector parsing and matching
//!
//! Covers what candidate queries and `<style>` rules need: selector groups,
//! compound selectors, descendant/child combinators, attribute operators and
//! a handful of structural pseudo-classes.

use crate::error::{Error, Result};

use super::element::Element;

/// A comma-separated group of selectors (`a, button, [role='button']`)
#[derive(Debug, Clone)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

/// One complex selector: compounds joined by combinators, stored right-to-left
#[derive(Debug, Clone)]
pub struct Selector {
    /// Rightmost compound first; each entry carries the combinator that links
    /// it to the next compound on its left.
    compounds: Vec<(Compound, Option<Combinator>)>,
}

/// Combinator between selector parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant (space)
    Descendant,
    /// Child (>)
    Child,
}

/// A sequence of simple selectors that must all match one element
#[derive(Debug, Clone, Default)]
pub struct Compound {
    parts: Vec<SelectorPart>,
}

/// A part of a selector
#[derive(Debug, Clone)]
pub enum SelectorPart {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
    PseudoClass(PseudoClass),
}

/// Attribute selector
#[derive(Debug, Clone)]
pub struct AttributeSelector {
    pub name: String,
    pub operator: Option<AttributeOperator>,
    pub value: Option<String>,
    pub case_insensitive: bool,
}

/// Attribute selector operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOperator {
    /// [attr=value]
    Equals,
    /// [attr~=value]
    Includes,
    /// [attr|=value]
    DashMatch,
    /// [attr^=value]
    Prefix,
    /// [attr$=value]
    Suffix,
    /// [attr*=value]
    Substring,
}

/// Supported pseudo-classes
#[derive(Debug, Clone)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    Empty,
    Checked,
    Disabled,
    Enabled,
    Root,
    Not(Box<SelectorList>),
    /// Anything we cannot evaluate statically (`:hover`, `:focus`, ...)
    Never,
}

impl SelectorList {
    /// Parse a selector group
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::selector(input, "empty selector"));
        }
        let selectors = split_top_level(input, ',')
            .into_iter()
            .map(|s| Selector::parse(&s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// True when any selector of the group matches
    pub fn matches(&self, element: &Element) -> bool {
        self.selectors.iter().any(|s| s.matches(element))
    }

    /// Highest specificity among the selectors that match, if any do
    pub fn matching_specificity(&self, element: &Element) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|s| s.matches(element))
            .map(Selector::specificity)
            .max()
    }
}

/// Selector specificity as (ids, classes/attributes/pseudo-classes, types)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Selector {
    /// Parse a single complex selector (no top-level commas)
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::selector(input, "empty selector"));
        }
        let mut parser = SelectorParser::new(input);
        parser.parse_complex()
    }

    /// Check if an element matches this selector
    pub fn matches(&self, element: &Element) -> bool {
        self.matches_from(0, element)
    }

    /// Cascade specificity of this selector
    pub fn specificity(&self) -> Specificity {
        let mut spec = Specificity::default();
        for (compound, _) in &self.compounds {
            for part in &compound.parts {
                match part {
                    SelectorPart::Id(_) => spec.0 += 1,
                    SelectorPart::Class(_)
                    | SelectorPart::Attribute(_)
                    | SelectorPart::PseudoClass(_) => spec.1 += 1,
                    SelectorPart::Tag(_) => spec.2 += 1,
                    SelectorPart::Universal => {}
                }
            }
        }
        spec
    }

    fn matches_from(&self, index: usize, element: &Element) -> bool {
        let Some((compound, combinator)) = self.compounds.get(index) else {
            return true;
        };
        if !compound.matches(element) {
            return false;
        }
        match combinator {
            None => true,
            Some(Combinator::Child) => element
                .parent_element()
                .map(|p| self.matches_from(index + 1, &p))
                .unwrap_or(false),
            Some(Combinator::Descendant) => element
                .ancestors()
                .any(|a| self.matches_from(index + 1, &a)),
        }
    }
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        self.parts.iter().all(|p| part_matches(p, element))
    }
}

fn part_matches(part: &SelectorPart, element: &Element) -> bool {
    match part {
        SelectorPart::Universal => true,
        SelectorPart::Tag(tag) => element.local_name().eq_ignore_ascii_case(tag),
        SelectorPart::Id(id) => element.id().map(|v| v == *id).unwrap_or(false),
        SelectorPart::Class(class) => element.has_class(class),
        SelectorPart::Attribute(attr) => attribute_matches(attr, element),
        SelectorPart::PseudoClass(pseudo) => pseudo_matches(pseudo, element),
    }
}

fn attribute_matches(attr: &AttributeSelector, element: &Element) -> bool {
    let Some(value) = element.get_attribute(&attr.name) else {
        return false;
    };
    let (Some(op), Some(target)) = (&attr.operator, &attr.value) else {
        return true;
    };
    let (value, target) = if attr.case_insensitive {
        (value.to_lowercase(), target.to_lowercase())
    } else {
        (value, target.clone())
    };
    match op {
        AttributeOperator::Equals => value == target,
        AttributeOperator::Includes => value.split_whitespace().any(|w| w == target),
        AttributeOperator::DashMatch => {
            value == target || value.starts_with(&format!("{}-", target))
        }
        AttributeOperator::Prefix => !target.is_empty() && value.starts_with(&target),
        AttributeOperator::Suffix => !target.is_empty() && value.ends_with(&target),
        AttributeOperator::Substring => !target.is_empty() && value.contains(&target),
    }
}

fn pseudo_matches(pseudo: &PseudoClass, element: &Element) -> bool {
    match pseudo {
        PseudoClass::FirstChild => element.previous_element_sibling().is_none(),
        PseudoClass::LastChild => element.next_element_sibling().is_none(),
        PseudoClass::OnlyChild => {
            element.previous_element_sibling().is_none()
                && element.next_element_sibling().is_none()
        }
        PseudoClass::Empty => element.node.children().is_empty(),
        PseudoClass::Checked => element.has_attribute("checked"),
        PseudoClass::Disabled => element.disabled(),
        PseudoClass::Enabled => !element.disabled(),
        PseudoClass::Root => element.parent_element().is_none(),
        PseudoClass::Not(list) => !list.matches(element),
        PseudoClass::Never => false,
    }
}

/// Split on a separator outside brackets, parentheses and quotes
fn split_top_level(input: &str, sep: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    for c in input.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    current.push(c);
                }
                '[' | '(' => {
                    depth += 1;
                    current.push(c);
                }
                ']' | ')' => {
                    depth -= 1;
                    current.push(c);
                }
                c if c == sep && depth == 0 => {
                    out.push(std::mem::take(&mut current));
                }
                _ => current.push(c),
            },
        }
    }
    out.push(current);
    out
}

/// Simple selector parser
struct SelectorParser {
    input: Vec<char>,
    source: String,
    pos: usize,
}

impl SelectorParser {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            source: input.to_string(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::selector(self.source.clone(), reason)
    }

    /// Parse compounds left-to-right, then store them right-to-left
    fn parse_complex(&mut self) -> Result<Selector> {
        let mut left_to_right: Vec<(Compound, Option<Combinator>)> = Vec::new();
        let mut pending: Option<Combinator> = None;

        loop {
            let had_space = self.skip_whitespace();
            if self.peek().is_none() {
                break;
            }
            if self.peek() == Some('>') {
                self.advance();
                pending = Some(Combinator::Child);
                continue;
            }
            if matches!(self.peek(), Some('+') | Some('~')) {
                return Err(self.error("sibling combinators are not supported"));
            }
            if !left_to_right.is_empty() && pending.is_none() && had_space {
                pending = Some(Combinator::Descendant);
            }
            let compound = self.parse_compound()?;
            if let Some(last) = left_to_right.last_mut() {
                last.1 = Some(pending.take().unwrap_or(Combinator::Descendant));
            }
            left_to_right.push((compound, None));
        }

        if left_to_right.is_empty() || pending.is_some() {
            return Err(self.error("dangling combinator"));
        }

        // Re-link right-to-left: the combinator attached to compound i (left
        // to right) describes its relation to compound i+1, which is exactly
        // the relation compound i+1 needs when matching leftwards.
        let mut compounds = Vec::with_capacity(left_to_right.len());
        let n = left_to_right.len();
        for i in (0..n).rev() {
            let link = if i == 0 { None } else { left_to_right[i - 1].1 };
            compounds.push((left_to_right[i].0.clone(), link));
        }
        Ok(Selector { compounds })
    }

    fn parse_compound(&mut self) -> Result<Compound> {
        let mut parts = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                '#' => {
                    self.advance();
                    parts.push(SelectorPart::Id(self.read_identifier()?));
                }
                '.' => {
                    self.advance();
                    parts.push(SelectorPart::Class(self.read_identifier()?));
                }
                '[' => parts.push(SelectorPart::Attribute(self.parse_attribute()?)),
                ':' => parts.push(SelectorPart::PseudoClass(self.parse_pseudo()?)),
                '*' => {
                    self.advance();
                    parts.push(SelectorPart::Universal);
                }
                c if c.is_alphabetic() || c == '_' || c == '-' => {
                    let tag = self.read_identifier()?;
                    parts.push(SelectorPart::Tag(tag.to_lowercase()));
                }
                _ => break,
            }
        }
        if parts.is_empty() {
            return Err(self.error(format!("unexpected character at {}", self.pos)));
        }
        Ok(Compound { parts })
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
        self.pos > start
    }

    fn read_identifier(&mut self) -> Result<String> {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                result.push(c);
                self.advance();
            } else if c == '\\' {
                self.advance();
                if let Some(escaped) = self.advance() {
                    result.push(escaped);
                }
            } else {
                break;
            }
        }
        if result.is_empty() {
            return Err(self.error("expected identifier"));
        }
        Ok(result)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector> {
        self.advance(); // '['
        self.skip_whitespace();
        let name = self.read_identifier()?.to_lowercase();
        self.skip_whitespace();

        let mut operator = None;
        let mut value = None;
        let mut case_insensitive = false;

        if let Some(c) = self.peek() {
            if c != ']' {
                let op = match c {
                    '=' => AttributeOperator::Equals,
                    '~' => AttributeOperator::Includes,
                    '|' => AttributeOperator::DashMatch,
                    '^' => AttributeOperator::Prefix,
                    '$' => AttributeOperator::Suffix,
                    '*' => AttributeOperator::Substring,
                    other => return Err(self.error(format!("unknown operator '{}'", other))),
                };
                self.advance();
                if op != AttributeOperator::Equals {
                    self.expect('=')?;
                }
                operator = Some(op);

                self.skip_whitespace();
                value = Some(self.read_string_or_ident()?);
                self.skip_whitespace();

                if let Some('i') | Some('I') = self.peek() {
                    case_insensitive = true;
                    self.advance();
                    self.skip_whitespace();
                }
            }
        }

        self.expect(']')?;

        Ok(AttributeSelector {
            name,
            operator,
            value,
            case_insensitive,
        })
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass> {
        self.advance(); // ':'
        if let Some(':') = self.peek() {
            self.advance();
        }

        let name = self.read_identifier()?;
        let pseudo = match name.to_lowercase().as_str() {
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "empty" => PseudoClass::Empty,
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            "root" => PseudoClass::Root,
            "not" => {
                let inner = self.parse_function_arg()?;
                PseudoClass::Not(Box::new(SelectorList::parse(&inner)?))
            }
            _ => {
                if let Some('(') = self.peek() {
                    self.parse_function_arg()?;
                }
                PseudoClass::Never
            }
        };

        Ok(pseudo)
    }

    fn parse_function_arg(&mut self) -> Result<String> {
        self.expect('(')?;
        let mut depth = 1;
        let mut result = String::new();

        while let Some(c) = self.advance() {
            match c {
                '(' => {
                    depth += 1;
                    result.push(c);
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(result.trim().to_string());
                    }
                    result.push(c);
                }
                _ => result.push(c),
            }
        }

        Err(self.error("unterminated '('"))
    }

    fn read_string_or_ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let mut result = String::new();
                while let Some(c) = self.advance() {
                    if c == quote {
                        return Ok(result);
                    }
                    if c == '\\' {
                        if let Some(escaped) = self.advance() {
                            result.push(escaped);
                        }
                    } else {
                        result.push(c);
                    }
                }
                Err(self.error("unterminated string"))
            }
            _ => self.read_identifier(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', got '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', got end of input", expected))),
        }
    }
}
