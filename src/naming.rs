// Copyright 2025 Cowboy AI, LLC.

//! Naming convention translation between field identifiers and column names
//!
//! A convention is modeled as a leading-segment case plus an optional
//! separator. Translation is a pure function: an identifier is parsed into
//! its lowercase segments under the source convention and rendered under the
//! target convention. For identifiers composed of alphanumeric segments the
//! translation is invertible: translating forward and back yields the
//! original identifier.

use crate::errors::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Case applied to an identifier segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentCase {
    /// All characters lowercase
    Lower,
    /// First character uppercase, remainder lowercase
    Capitalized,
    /// All characters uppercase
    Upper,
}

/// A naming convention: the case of the first segment plus an optional
/// separator between segments
///
/// With a separator, every segment is rendered in the leading case
/// (`first_name`, `FIRST_NAME`). Without one, segment boundaries are marked
/// by medial capitals, so the first segment takes the leading case and the
/// rest are capitalized (`firstName`, `FirstName`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convention {
    /// Case of the first segment
    pub leading: SegmentCase,
    /// Separator between segments, if any
    pub separator: Option<char>,
}

impl Convention {
    /// Medial capitals, lowercase first segment: `firstName`
    pub const LOWER_CAMEL: Convention = Convention {
        leading: SegmentCase::Lower,
        separator: None,
    };

    /// Medial capitals, capitalized first segment: `FirstName`
    pub const UPPER_CAMEL: Convention = Convention {
        leading: SegmentCase::Capitalized,
        separator: None,
    };

    /// Lowercase segments joined by underscores: `first_name`
    pub const SNAKE_CASE: Convention = Convention {
        leading: SegmentCase::Lower,
        separator: Some('_'),
    };

    /// Uppercase segments joined by underscores: `FIRST_NAME`
    pub const SCREAMING_SNAKE: Convention = Convention {
        leading: SegmentCase::Upper,
        separator: Some('_'),
    };

    /// Check that this convention can mark segment boundaries
    ///
    /// Uppercase segments without a separator leave boundaries unrecoverable,
    /// and an alphanumeric separator is indistinguishable from segment
    /// content; both pairings are rejected.
    pub fn validate(&self) -> StoreResult<()> {
        if self.separator.is_none() && self.leading == SegmentCase::Upper {
            return Err(StoreError::configuration(
                "uppercase segments without a separator cannot be split back into segments",
            ));
        }
        if let Some(sep) = self.separator {
            if sep.is_ascii_alphanumeric() {
                return Err(StoreError::configuration(format!(
                    "separator {sep:?} is alphanumeric and cannot delimit segments"
                )));
            }
        }
        Ok(())
    }

    /// Parse an identifier written in this convention into lowercase segments
    fn parse(&self, identifier: &str) -> StoreResult<Vec<String>> {
        if identifier.is_empty() {
            return Err(StoreError::configuration("empty identifier"));
        }

        let segments = match self.separator {
            Some(sep) => {
                let mut segments = Vec::new();
                for segment in identifier.split(sep) {
                    if segment.is_empty() {
                        return Err(StoreError::configuration(format!(
                            "identifier {identifier:?} has an empty segment"
                        )));
                    }
                    if !segment.chars().all(|c| c.is_ascii_alphanumeric()) {
                        return Err(StoreError::configuration(format!(
                            "identifier {identifier:?} contains non-alphanumeric characters"
                        )));
                    }
                    segments.push(segment.to_ascii_lowercase());
                }
                segments
            }
            None => {
                if !identifier.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(StoreError::configuration(format!(
                        "identifier {identifier:?} contains non-alphanumeric characters"
                    )));
                }
                let mut segments = Vec::new();
                let mut current = String::new();
                for c in identifier.chars() {
                    if c.is_ascii_uppercase() && !current.is_empty() {
                        segments.push(current);
                        current = String::new();
                    }
                    current.push(c.to_ascii_lowercase());
                }
                segments.push(current);
                segments
            }
        };

        Ok(segments)
    }

    /// Render lowercase segments in this convention
    fn render(&self, segments: &[String]) -> String {
        let mut out = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                if let Some(sep) = self.separator {
                    out.push(sep);
                }
            }
            let case = match (i, self.separator) {
                (0, _) => self.leading,
                (_, Some(_)) => self.leading,
                (_, None) => SegmentCase::Capitalized,
            };
            out.push_str(&apply_case(segment, case));
        }
        out
    }
}

fn apply_case(segment: &str, case: SegmentCase) -> String {
    match case {
        SegmentCase::Lower => segment.to_ascii_lowercase(),
        SegmentCase::Upper => segment.to_ascii_uppercase(),
        SegmentCase::Capitalized => {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        }
    }
}

/// Translate an identifier from one naming convention to another
///
/// Pure and deterministic. Fails with a configuration error when either
/// convention cannot delimit segments or the identifier does not decompose
/// into alphanumeric segments under the source convention.
pub fn translate(
    identifier: &str,
    source: Convention,
    target: Convention,
) -> StoreResult<String> {
    source.validate()?;
    target.validate()?;
    let segments = source.parse(identifier)?;
    Ok(target.render(&segments))
}

/// Naming configuration passed into descriptor construction
///
/// An explicit value, never a process-wide default: the conventions used by
/// record field identifiers and by table column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Convention of record field identifiers
    pub field_convention: Convention,
    /// Convention of table column names
    pub column_convention: Convention,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            field_convention: Convention::LOWER_CAMEL,
            column_convention: Convention::SNAKE_CASE,
        }
    }
}

impl NamingConfig {
    /// Derive a column name from a field identifier
    pub fn column_name(&self, identifier: &str) -> StoreResult<String> {
        translate(identifier, self.field_convention, self.column_convention)
    }

    /// Derive a field identifier from a column name
    pub fn field_identifier(&self, column: &str) -> StoreResult<String> {
        translate(column, self.column_convention, self.field_convention)
    }
}
