//! Built-in postprocessors

use crate::domain::ports::StringProcessor;
use crate::error::GenerationError;

/// Makes non-empty content end with exactly one `\n`
#[derive(Debug, Clone, Default)]
pub struct FinalNewline;

impl StringProcessor for FinalNewline {
    fn name(&self) -> &str {
        "final-newline"
    }

    fn process(&self, input: &str) -> Result<String, GenerationError> {
        if input.is_empty() {
            return Ok(String::new());
        }
        let mut out = input.trim_end_matches(['\n', '\r']).to_string();
        out.push('\n');
        Ok(out)
    }
}

/// Strips spaces and tabs at line ends, keeping the line breaks
#[derive(Debug, Clone, Default)]
pub struct TrimTrailingWhitespace;

impl StringProcessor for TrimTrailingWhitespace {
    fn name(&self) -> &str {
        "trim-trailing-whitespace"
    }

    fn process(&self, input: &str) -> Result<String, GenerationError> {
        let mut out = String::with_capacity(input.len());
        for line in input.split_inclusive('\n') {
            let (body, ending) = split_line_ending(line);
            out.push_str(body.trim_end_matches([' ', '\t']));
            out.push_str(ending);
        }
        Ok(out)
    }
}

/// Replaces runs of blank lines with a single blank line
#[derive(Debug, Clone, Default)]
pub struct CollapseBlankLines;

impl StringProcessor for CollapseBlankLines {
    fn name(&self) -> &str {
        "collapse-blank-lines"
    }

    fn process(&self, input: &str) -> Result<String, GenerationError> {
        let mut out = String::with_capacity(input.len());
        let mut previous_blank = false;
        for line in input.split_inclusive('\n') {
            let blank = split_line_ending(line).0.trim().is_empty() && line.ends_with('\n');
            if blank && previous_blank {
                continue;
            }
            previous_blank = blank;
            out.push_str(line);
        }
        Ok(out)
    }
}

/// Literal search and replace
#[derive(Debug, Clone)]
pub struct Replace {
    from: String,
    to: String,
}

impl Replace {
    /// `None` for an empty search string
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Option<Self> {
        let from = from.into();
        if from.is_empty() {
            return None;
        }
        Some(Self { from, to: to.into() })
    }
}

impl StringProcessor for Replace {
    fn name(&self) -> &str {
        "replace"
    }

    fn process(&self, input: &str) -> Result<String, GenerationError> {
        Ok(input.replace(&self.from, &self.to))
    }
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
