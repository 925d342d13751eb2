//! Outside-SQL checker
//!
//! Validates one SQL file before it is used for generation or execution:
//!
//! 1. misspelled entity / parameter-bean marks
//! 2. two-way SQL structure
//! 3. IF-comment expressions (when enabled)
//! 4. title presence and uniqueness (when required)
//! 5. description presence and uniqueness (when required)
//!
//! The first violation is returned; nothing is retried.

use crate::error::{OutsideSqlError, OutsideSqlResult};
use crate::mark::{SqlMarkAnalyzer, ENTITY_MARK, PMB_MARK};
use crate::session::UniquenessRegistry;
use flutegen_core::{AdvisoryMessage, OutsideSqlConfig};
use flutegen_twoway::{IfExpression, NullResolver, SqlAnalyzer, SqlTemplate};
use tracing::debug;

/// Placeholder title written by the SQL scaffold
pub const DEFAULT_TITLE: &str = "SQL title here";

/// Placeholder description written by the SQL scaffold
pub const DEFAULT_DESCRIPTION: &str = "SQL description here";

const BAD_ENTITY_MARKS: [&str; 2] = ["#df;entity#", "#df:emtity#"];
const BAD_PMB_MARKS: [&str; 2] = ["!df;pmb!", "!df:pbm!"];

/// A file that passed every check
#[derive(Debug, Clone)]
pub struct CheckedSql {
    pub file_name: String,
    pub template: SqlTemplate,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Checks outside-SQL files against a [`OutsideSqlConfig`] policy
#[derive(Debug, Clone, Default)]
pub struct OutsideSqlChecker {
    config: OutsideSqlConfig,
}

impl OutsideSqlChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: OutsideSqlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutsideSqlConfig {
        &self.config
    }

    pub fn with_if_comment_check(mut self, enabled: bool) -> Self {
        self.config.check_if_comment_expression = enabled;
        self
    }

    pub fn with_required_title_check(mut self, enabled: bool) -> Self {
        self.config.required_title_check = enabled;
        self
    }

    pub fn with_required_description_check(mut self, enabled: bool) -> Self {
        self.config.required_description_check = enabled;
        self
    }

    pub fn with_suppressed_title_uniqueness(mut self, suppressed: bool) -> Self {
        self.config.suppress_title_uniqueness = suppressed;
        self
    }

    pub fn with_suppressed_description_uniqueness(mut self, suppressed: bool) -> Self {
        self.config.suppress_description_uniqueness = suppressed;
        self
    }

    /// Check one file, registering its title and description in `registry`
    pub fn check(
        &self,
        registry: &mut dyn UniquenessRegistry,
        file_name: &str,
        sql: &str,
    ) -> OutsideSqlResult<CheckedSql> {
        check_marks(file_name, sql)?;

        let template = SqlAnalyzer::new(sql)
            .analyze()
            .map_err(|e| OutsideSqlError::parse(e, file_name, sql))?;

        if self.config.check_if_comment_expression {
            for expression in template.if_expressions() {
                IfExpression::parse(expression)
                    .and_then(|parsed| parsed.evaluate(&NullResolver))
                    .map_err(|e| OutsideSqlError::if_comment(e, file_name, sql))?;
            }
        }

        let marks = SqlMarkAnalyzer::new(sql);
        let title = marks.title();
        let description = marks.description();

        if self.config.required_title_check {
            let Some(title) = title.as_deref().filter(|t| !is_default_text(t, DEFAULT_TITLE))
            else {
                return Err(OutsideSqlError::TitleNotFound {
                    advisory: Box::new(title_not_found(file_name, sql)),
                });
            };
            if !self.config.suppress_title_uniqueness {
                if let Some(owner) = registry.claim_title(title, file_name) {
                    return Err(OutsideSqlError::TitleCollision {
                        advisory: Box::new(collision("title", title, &owner, file_name)),
                    });
                }
            }
        }

        if self.config.required_description_check {
            let Some(description) = description
                .as_deref()
                .filter(|d| !is_default_text(d, DEFAULT_DESCRIPTION))
            else {
                return Err(OutsideSqlError::DescriptionNotFound {
                    advisory: Box::new(description_not_found(file_name, sql)),
                });
            };
            if !self.config.suppress_description_uniqueness {
                if let Some(owner) = registry.claim_description(description, file_name) {
                    return Err(OutsideSqlError::DescriptionCollision {
                        advisory: Box::new(collision(
                            "description",
                            description,
                            &owner,
                            file_name,
                        )),
                    });
                }
            }
        }

        debug!(file = file_name, "outside-SQL checked");
        Ok(CheckedSql {
            file_name: file_name.to_string(),
            template,
            title,
            description,
        })
    }
}

/// Placeholder comparison: case-insensitive, trailing dot ignored
fn is_default_text(text: &str, default: &str) -> bool {
    let text = text.trim();
    let text = text.strip_suffix('.').unwrap_or(text).trim_end();
    text.eq_ignore_ascii_case(default)
}

fn check_marks(file_name: &str, sql: &str) -> OutsideSqlResult<()> {
    for line in sql.lines().map(str::trim).filter(|l| l.contains("--")) {
        let expected = if BAD_ENTITY_MARKS.iter().any(|bad| line.contains(bad)) {
            ENTITY_MARK
        } else if BAD_PMB_MARKS.iter().any(|bad| line.contains(bad)) {
            PMB_MARK
        } else {
            continue;
        };
        let advisory = AdvisoryMessage::builder("The mark comment was wrong.")
            .advice("Make sure the spelling of your mark comment.")
            .advice("For example:")
            .advice(format!("  (o): -- {expected}"))
            .entry("Bad Mark", line)
            .entry("Expected Mark", expected)
            .entry("SQL File", file_name)
            .entry("SQL", sql)
            .build();
        return Err(OutsideSqlError::MarkInvalid {
            advisory: Box::new(advisory),
        });
    }
    Ok(())
}

fn title_not_found(file_name: &str, sql: &str) -> AdvisoryMessage {
    AdvisoryMessage::builder("The title of the outside-SQL was not found.")
        .advice("Write a descriptive comment with the title on its first line.")
        .advice("For example:")
        .advice("  /*")
        .advice("   [Member Search]")
        .advice("   Search members by name and status.")
        .advice("  */")
        .advice(format!("'{DEFAULT_TITLE}' is a placeholder and does not count."))
        .entry("SQL File", file_name)
        .entry("SQL", sql)
        .build()
}

fn description_not_found(file_name: &str, sql: &str) -> AdvisoryMessage {
    AdvisoryMessage::builder("The description of the outside-SQL was not found.")
        .advice("Write the description below the title in the descriptive comment.")
        .advice("For example:")
        .advice("  /*")
        .advice("   [Member Search]")
        .advice("   Search members by name and status.")
        .advice("  */")
        .advice(format!("'{DEFAULT_DESCRIPTION}' is a placeholder and does not count."))
        .entry("SQL File", file_name)
        .entry("SQL", sql)
        .build()
}

fn collision(kind: &str, value: &str, owner: &str, file_name: &str) -> AdvisoryMessage {
    AdvisoryMessage::builder(format!("The {kind} of the outside-SQL was duplicated."))
        .advice(format!("Every outside-SQL needs a unique {kind}."))
        .entry(capitalize(kind), value)
        .item("SQL Files")
        .element(owner)
        .element(file_name)
        .build()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
