use std::fmt;

use regex::Regex;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(pub String);

impl BranchName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A compiled `branch_name_regex`. The pattern must carry exactly one
/// capture group; its match against a ticket URL becomes the branch name.
#[derive(Debug, Clone)]
pub struct BranchPattern {
    regex: Regex,
}

impl BranchPattern {
    pub fn new(pattern: &str) -> AppResult<Self> {
        if pattern.trim().is_empty() {
            return Err(AppError::Configuration("empty regex".to_string()));
        }
        let regex = Regex::new(pattern).map_err(|err| {
            AppError::Configuration(format!("invalid branch_name_regex '{pattern}': {err}"))
        })?;

        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(AppError::Configuration(format!(
                "branch_name_regex '{pattern}' must have exactly one capture group, found {groups}"
            )));
        }

        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn extract(&self, ticket_url: &str) -> AppResult<BranchName> {
        self.regex
            .captures(ticket_url)
            .and_then(|caps| caps.get(1))
            .map(|group| group.as_str())
            .filter(|name| !name.is_empty())
            .map(|name| BranchName(name.to_string()))
            .ok_or_else(|| {
                AppError::Extraction(format!(
                    "the regex '{}' did not match the ticket URL: '{ticket_url}'",
                    self.as_str()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_capture_group() {
        let pattern = BranchPattern::new(r"browse/([A-Z]+-\d+)").unwrap();
        let branch = pattern
            .extract("https://company.atlassian.net/browse/TCK-42")
            .unwrap();
        assert_eq!(branch.as_str(), "TCK-42");
    }

    #[test]
    fn search_is_unanchored() {
        let pattern = BranchPattern::new(r"issues/(\d+)").unwrap();
        let branch = pattern
            .extract("https://github.com/timjstewart/flint/issues/17#comment")
            .unwrap();
        assert_eq!(branch.as_str(), "17");
    }

    #[test]
    fn fails_when_pattern_does_not_match() {
        let pattern = BranchPattern::new(r"browse/([A-Z]+-\d+)").unwrap();
        let err = pattern
            .extract("https://example.com/tickets/42")
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
        assert!(err.to_string().contains("https://example.com/tickets/42"));
    }

    #[test]
    fn fails_when_capture_group_is_empty() {
        let pattern = BranchPattern::new(r"browse/([A-Z]*)").unwrap();
        let err = pattern.extract("https://example.com/browse/42").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn rejects_patterns_without_exactly_one_group() {
        assert!(matches!(
            BranchPattern::new(r"browse/[A-Z]+"),
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            BranchPattern::new(r"(browse)/([A-Z]+)"),
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            BranchPattern::new("   "),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn non_capturing_groups_are_allowed() {
        let pattern = BranchPattern::new(r"(?:browse|issue)/(\w+-\d+)").unwrap();
        assert_eq!(
            pattern.extract("https://x/issue/AB-1").unwrap().as_str(),
            "AB-1"
        );
    }

    #[test]
    fn rejects_invalid_regex() {
        let err = BranchPattern::new(r"browse/([A-Z+").unwrap_err();
        assert!(err.to_string().contains("invalid branch_name_regex"));
    }
}
