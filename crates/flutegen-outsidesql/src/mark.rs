//! Mark analysis for outside-SQL files
//!
//! An outside-SQL file describes itself in its first descriptive block
//! comment and declares generation hints in line comments:
//!
//! ```sql
//! /*
//!  [Member Search]
//!  Search members by name and status.
//! */
//! -- #df:entity#
//! -- !df:pmb!
//! -- !!AutoDetect!!
//! select ...
//! ```
//!
//! The legacy form tags the parts explicitly with `[df:title]` and
//! `[df:description]`.

use flutegen_twoway::{is_directive_comment, SqlToken, SqlTokenizer};

pub const ENTITY_MARK: &str = "#df:entity#";
pub const PMB_MARK: &str = "!df:pmb!";
pub const AUTO_DETECT_MARK: &str = "!!AutoDetect!!";

const LEGACY_TITLE_TAG: &str = "[df:title]";
const LEGACY_DESCRIPTION_TAG: &str = "[df:description]";

/// A parameter-bean property declared by `-- !!Type name!!`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PmbProperty {
    pub type_name: String,
    pub name: String,
}

/// Reads marks, title and description out of an outside-SQL file
#[derive(Debug, Clone, Copy)]
pub struct SqlMarkAnalyzer<'a> {
    sql: &'a str,
}

impl<'a> SqlMarkAnalyzer<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self { sql }
    }

    /// The SQL title, if the file has one
    pub fn title(&self) -> Option<String> {
        let comment = self.descriptive_comment()?;
        let title = if has_legacy_tags(comment) {
            legacy_section(comment, LEGACY_TITLE_TAG)?.trim().to_string()
        } else {
            let first = comment.lines().map(str::trim).find(|l| !l.is_empty())?;
            strip_brackets(first).to_string()
        };
        non_blank(title)
    }

    /// The SQL description, if the file has one
    pub fn description(&self) -> Option<String> {
        let comment = self.descriptive_comment()?;
        if has_legacy_tags(comment) {
            let section = legacy_section(comment, LEGACY_DESCRIPTION_TAG)?;
            return non_blank(join_trimmed_lines(section));
        }
        let mut lines = comment.lines().map(str::trim).skip_while(|l| l.is_empty());
        lines.next()?;
        let rest: Vec<&str> = lines.collect();
        non_blank(join_trimmed_lines(&rest.join("\n")))
    }

    /// `-- #df:entity#` is present
    pub fn has_entity_mark(&self) -> bool {
        self.marks().any(|mark| mark == ENTITY_MARK)
    }

    /// `-- !df:pmb!` is present
    pub fn has_pmb_mark(&self) -> bool {
        self.marks().any(|mark| mark == PMB_MARK)
    }

    /// `-- !!AutoDetect!!` is present
    pub fn has_auto_detect(&self) -> bool {
        self.marks().any(|mark| mark == AUTO_DETECT_MARK)
    }

    /// Entity name from `-- #Name#`
    pub fn custom_entity_name(&self) -> Option<&'a str> {
        self.marks().find_map(|mark| {
            let name = mark.strip_prefix('#')?.strip_suffix('#')?;
            (mark != ENTITY_MARK && is_name(name)).then_some(name)
        })
    }

    /// Parameter-bean name from `-- !Name!`
    pub fn pmb_name(&self) -> Option<&'a str> {
        self.marks().find_map(|mark| {
            if mark.starts_with("!!") {
                return None;
            }
            let name = mark.strip_prefix('!')?.strip_suffix('!')?;
            (mark != PMB_MARK && is_name(name)).then_some(name)
        })
    }

    /// Properties declared by `-- !!Type name!!`, in file order
    pub fn pmb_properties(&self) -> Vec<PmbProperty> {
        self.marks()
            .filter(|mark| *mark != AUTO_DETECT_MARK)
            .filter_map(|mark| {
                let body = mark.strip_prefix("!!")?.strip_suffix("!!")?.trim();
                let (type_name, name) = body.rsplit_once(char::is_whitespace)?;
                Some(PmbProperty {
                    type_name: type_name.trim().to_string(),
                    name: name.to_string(),
                })
            })
            .collect()
    }

    /// Trimmed bodies of every `--` line comment
    fn marks(&self) -> impl Iterator<Item = &'a str> {
        self.sql.lines().filter_map(|line| {
            let body = line.trim().strip_prefix("--")?.trim();
            (!body.is_empty()).then_some(body)
        })
    }

    /// First block comment that is neither a directive nor an optimizer hint
    fn descriptive_comment(&self) -> Option<&'a str> {
        let mut tokenizer = SqlTokenizer::new(self.sql);
        while let Ok(Some(token)) = tokenizer.next_token() {
            if let SqlToken::BlockComment(content) = token {
                if !is_directive_comment(content) && !content.starts_with('+') {
                    return Some(content);
                }
            }
        }
        None
    }
}

fn has_legacy_tags(comment: &str) -> bool {
    comment.contains(LEGACY_TITLE_TAG) || comment.contains(LEGACY_DESCRIPTION_TAG)
}

/// Text after `tag` up to the next legacy tag or the end of the comment
fn legacy_section<'c>(comment: &'c str, tag: &str) -> Option<&'c str> {
    let start = comment.find(tag)? + tag.len();
    let rest = &comment[start..];
    let end = [LEGACY_TITLE_TAG, LEGACY_DESCRIPTION_TAG]
        .iter()
        .filter_map(|other| rest.find(other))
        .min()
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

fn strip_brackets(line: &str) -> &str {
    line.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .map_or(line, str::trim)
}

fn join_trimmed_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_blank(text: String) -> Option<String> {
    (!text.trim().is_empty()).then_some(text)
}

fn is_name(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}
