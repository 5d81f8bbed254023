//! User-editable regions inside generated files
//!
//! A region starts on a line containing `weaver:user-begin <id>` and ends on
//! a line containing `weaver:user-end <id>`. The marker lines themselves may
//! carry any comment syntax around the marker.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::value_objects::LineBreak;

pub const BEGIN_MARKER: &str = "weaver:user-begin";
pub const END_MARKER: &str = "weaver:user-end";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("line {line}: region '{id}' opened inside region '{open}'")]
    Nested { line: usize, id: String, open: String },

    #[error("line {line}: end of region '{id}' without matching begin")]
    UnexpectedEnd { line: usize, id: String },

    #[error("region '{id}' is never closed")]
    Unclosed { id: String },

    #[error("line {line}: marker without region id")]
    MissingId { line: usize },

    #[error("region '{id}' appears more than once")]
    Duplicate { id: String },
}

enum Marker<'a> {
    Begin(&'a str),
    End(&'a str),
}

fn marker_of(line: &str, number: usize) -> Result<Option<Marker<'_>>, MarkerError> {
    let (rest, begin) = if let Some(idx) = line.find(BEGIN_MARKER) {
        (&line[idx + BEGIN_MARKER.len()..], true)
    } else if let Some(idx) = line.find(END_MARKER) {
        (&line[idx + END_MARKER.len()..], false)
    } else {
        return Ok(None);
    };
    let id = rest
        .split_whitespace()
        .next()
        .ok_or(MarkerError::MissingId { line: number })?;
    Ok(Some(if begin {
        Marker::Begin(id)
    } else {
        Marker::End(id)
    }))
}

fn lines_with_breaks(content: &str) -> Vec<&str> {
    LineBreak::lines(content).map(|(line, _)| line).collect()
}

/// Bodies of all user regions, keyed by region id. A body is the exact text
/// between the begin and end marker lines.
pub fn user_regions(content: &str) -> Result<HashMap<String, String>, MarkerError> {
    let mut regions = HashMap::new();
    let mut open: Option<(String, String)> = None;

    for (idx, line) in lines_with_breaks(content).into_iter().enumerate() {
        let number = idx + 1;
        match marker_of(line, number)? {
            Some(Marker::Begin(id)) => {
                if let Some((current, _)) = &open {
                    return Err(MarkerError::Nested {
                        line: number,
                        id: id.to_string(),
                        open: current.clone(),
                    });
                }
                open = Some((id.to_string(), String::new()));
            }
            Some(Marker::End(id)) => match open.take() {
                Some((current, body)) if current == id => {
                    if regions.contains_key(&current) {
                        return Err(MarkerError::Duplicate { id: current });
                    }
                    regions.insert(current, body);
                }
                _ => {
                    return Err(MarkerError::UnexpectedEnd {
                        line: number,
                        id: id.to_string(),
                    })
                }
            },
            None => {
                if let Some((_, body)) = open.as_mut() {
                    body.push_str(line);
                }
            }
        }
    }

    match open {
        Some((id, _)) => Err(MarkerError::Unclosed { id }),
        None => Ok(regions),
    }
}

/// Generated text with every user region body replaced by the body of the
/// same region in `existing`. Regions missing from `existing` keep the
/// generated body; regions missing from `generated` are dropped with a
/// warning.
pub fn merge_user_regions(existing: &str, generated: &str) -> Result<String, MarkerError> {
    let preserved = user_regions(existing)?;
    let dropped = dropped_regions(&preserved, &user_regions(generated)?);
    if !dropped.is_empty() {
        tracing::warn!(
            regions = %dropped.join(", "),
            "user regions no longer generated, their content is dropped"
        );
    }

    let mut merged = String::with_capacity(generated.len());
    let mut replacing: Option<&str> = None;

    for (idx, line) in lines_with_breaks(generated).into_iter().enumerate() {
        match marker_of(line, idx + 1)? {
            Some(Marker::Begin(id)) => {
                merged.push_str(line);
                if let Some(body) = preserved.get(id) {
                    merged.push_str(body);
                    replacing = Some(id);
                }
            }
            Some(Marker::End(id)) => {
                if replacing == Some(id) {
                    replacing = None;
                }
                merged.push_str(line);
            }
            None if replacing.is_some() => {}
            None => merged.push_str(line),
        }
    }
    Ok(merged)
}

/// Ids of `existing` regions without a counterpart in `generated`, sorted.
fn dropped_regions<'a>(
    existing: &'a HashMap<String, String>,
    generated: &HashMap<String, String>,
) -> Vec<&'a str> {
    let mut dropped: Vec<&str> = existing
        .keys()
        .filter(|id| !generated.contains_key(*id))
        .map(String::as_str)
        .collect();
    dropped.sort_unstable();
    dropped
}
