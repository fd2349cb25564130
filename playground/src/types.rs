use std::fmt;
use std::time::SystemTime;
use uuid::Uuid;

pub type JobId = Uuid;
pub type SourceText = String;

/// One user-initiated request to execute code on the remote service.
#[derive(Clone, Debug)]
pub struct Job {
    pub id: JobId,
    pub source: SourceText,
    pub submitted_at: SystemTime,
}

impl Job {
    pub(crate) fn new(source: SourceText) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            submitted_at: SystemTime::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Normal,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Normal => "normal",
            Severity::Success => "success",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub severity: Severity,
}

impl OutputLine {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Normal)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }
}

/// A catalog entry that can be loaded into the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Example {
    pub key: &'static str,
    pub display_name: &'static str,
    pub code: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_names_are_lowercase() {
        let names: Vec<_> = [
            Severity::Info,
            Severity::Normal,
            Severity::Success,
            Severity::Error,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(names, vec!["info", "normal", "success", "error"]);
    }
}
