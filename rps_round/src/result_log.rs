//! Append-only log of round result lines.

use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultLog {
    entries: Vec<String>,
}

impl ResultLog {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    pub fn entries(&self)  -> &[String]        { &self.entries }
    pub fn last(&self)     -> Option<&str>     { self.entries.last().map(String::as_str) }
    pub fn len(&self)      -> usize            { self.entries.len() }
    pub fn is_empty(&self) -> bool             { self.entries.is_empty() }
    pub fn iter(&self)     -> std::slice::Iter<'_, String> { self.entries.iter() }

    /// All lines joined with newlines.
    pub fn render(&self) -> String {
        self.entries.join("\n")
    }
}

impl<'a> IntoIterator for &'a ResultLog {
    type Item     = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;
    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

impl fmt::Display for ResultLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.entries.iter().enumerate() {
            if i > 0 { writeln!(f)?; }
            f.write_str(line)?;
        }
        Ok(())
    }
}
