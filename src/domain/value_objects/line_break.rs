//! Line break value object
//!
//! Detects the dominant line ending of existing content so regenerated
//! output can keep it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreak {
    Lf,
    Crlf,
    Cr,
}

impl LineBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineBreak::Lf => "\n",
            LineBreak::Crlf => "\r\n",
            LineBreak::Cr => "\r",
        }
    }

    /// Dominant line ending of `content`, or `None` if it has no line breaks.
    ///
    /// `\r\n` wins near-ties: it is chosen whenever its count is within one
    /// of the largest lone `\n` / lone `\r` count. Otherwise the larger of
    /// `\n` and `\r` wins, `\n` on an exact tie.
    pub fn detect(content: &str) -> Option<LineBreak> {
        let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
        for (_, ending) in LineBreak::lines(content) {
            match ending {
                Some(LineBreak::Crlf) => crlf += 1,
                Some(LineBreak::Lf) => lf += 1,
                Some(LineBreak::Cr) => cr += 1,
                None => {}
            }
        }

        let strongest_other = lf.max(cr);
        if crlf > 0 && crlf + 1 >= strongest_other {
            Some(LineBreak::Crlf)
        } else if strongest_other == 0 {
            None
        } else if lf >= cr {
            Some(LineBreak::Lf)
        } else {
            Some(LineBreak::Cr)
        }
    }

    /// Lines of `content` with their terminators; `\r\n`, `\n` and a lone
    /// `\r` each end a line.
    pub fn lines(content: &str) -> Lines<'_> {
        Lines { rest: content }
    }

    /// Rewrite every line ending in `content` to this one.
    pub fn apply(&self, content: &str) -> String {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        match self {
            LineBreak::Lf => normalized,
            other => normalized.replace('\n', other.as_str()),
        }
    }
}

/// Iterator returned by [`LineBreak::lines`]
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = (&'a str, Option<LineBreak>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let bytes = self.rest.as_bytes();
        let (end, ending) = match bytes.iter().position(|b| *b == b'\n' || *b == b'\r') {
            Some(i) if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') => {
                (i + 2, Some(LineBreak::Crlf))
            }
            Some(i) if bytes[i] == b'\r' => (i + 1, Some(LineBreak::Cr)),
            Some(i) => (i + 1, Some(LineBreak::Lf)),
            None => (bytes.len(), None),
        };
        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some((line, ending))
    }
}

/// How an output chooses its line endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreakPolicy {
    /// Write generated content unchanged
    #[default]
    Keep,
    Lf,
    Crlf,
    Cr,
    /// Match the existing target file; unchanged if there is none
    Existing,
}
