//! Multi-section advisory messages
//!
//! Failures in flutegen are read on a console during a generation run, so
//! every user-facing error carries an [`AdvisoryMessage`]: a one-line notice
//! followed by titled sections (`[Advice]`, `[SQL File]`, ...).
//!
//! ```text
//! Look! Read the message below.
//! /* * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
//! The title of the outside-SQL was not found.
//!
//! [Advice]
//! Add a descriptive comment at the top of the SQL.
//!
//! [SQL File]
//! MemberBhv_selectSimpleMember.sql
//! * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * */
//! ```

use std::fmt;

const HEADER: &str = "Look! Read the message below.";
const FRAME_OPEN: &str =
    "/* * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *";
const FRAME_CLOSE: &str =
    "* * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * */";

/// Title of the section filled by [`AdvisoryMessageBuilder::advice`]
pub const ADVICE_TITLE: &str = "Advice";

/// A titled section of an advisory message
#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    title: String,
    elements: Vec<String>,
}

/// A console-oriented failure report with a notice and titled sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryMessage {
    notice: String,
    sections: Vec<Section>,
}

impl AdvisoryMessage {
    /// Start building a message with the given notice line
    pub fn builder(notice: impl Into<String>) -> AdvisoryMessageBuilder {
        AdvisoryMessageBuilder {
            message: AdvisoryMessage {
                notice: notice.into(),
                sections: Vec::new(),
            },
        }
    }

    /// The leading notice line
    pub fn notice(&self) -> &str {
        &self.notice
    }

    /// Elements of the first section with the given title
    pub fn section(&self, title: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.elements.as_slice())
    }

    /// Append a titled section to a finished message
    pub fn with_entry(mut self, title: impl Into<String>, element: impl Into<String>) -> Self {
        self.sections.push(Section {
            title: title.into(),
            elements: vec![element.into()],
        });
        self
    }

    /// Section titles in display order
    pub fn section_titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.title.as_str())
    }
}

impl fmt::Display for AdvisoryMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        writeln!(f, "{FRAME_OPEN}")?;
        writeln!(f, "{}", self.notice)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "[{}]", section.title)?;
            for element in &section.elements {
                writeln!(f, "{element}")?;
            }
        }
        write!(f, "{FRAME_CLOSE}")
    }
}

/// Builder for [`AdvisoryMessage`]
#[derive(Debug, Clone)]
pub struct AdvisoryMessageBuilder {
    message: AdvisoryMessage,
}

impl AdvisoryMessageBuilder {
    /// Append a line of advice, opening the `[Advice]` section if needed
    pub fn advice(mut self, line: impl Into<String>) -> Self {
        let line = line.into();
        match self.message.sections.last_mut() {
            Some(last) if last.title == ADVICE_TITLE => last.elements.push(line),
            _ => self.message.sections.push(Section {
                title: ADVICE_TITLE.to_string(),
                elements: vec![line],
            }),
        }
        self
    }

    /// Open a new titled section
    pub fn item(mut self, title: impl Into<String>) -> Self {
        self.message.sections.push(Section {
            title: title.into(),
            elements: Vec::new(),
        });
        self
    }

    /// Append an element to the most recently opened section
    ///
    /// Without an open section the element lands in an `[Element]` section.
    pub fn element(mut self, element: impl Into<String>) -> Self {
        let element = element.into();
        match self.message.sections.last_mut() {
            Some(last) => last.elements.push(element),
            None => self.message.sections.push(Section {
                title: "Element".to_string(),
                elements: vec![element],
            }),
        }
        self
    }

    /// Shorthand for `item(title).element(element)`
    pub fn entry(self, title: impl Into<String>, element: impl Into<String>) -> Self {
        self.item(title).element(element)
    }

    pub fn build(self) -> AdvisoryMessage {
        self.message
    }
}
