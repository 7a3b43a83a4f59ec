//! Content Formatter — converts raw model output into styled HTML fragments.
//!
//! Lines are processed independently in input order, first matching rule
//! wins: blank line → `<br/>`, first fully-bold line → `<h1>`, later
//! fully-bold lines → `<h2>`, anything else → a `<p>` with job-title
//! highlighting and company emphasis. Total over any input string.

use once_cell::sync::Lazy;
use regex::Regex;

/// Returned verbatim for empty input.
const EMPTY_CONTENT_PLACEHOLDER: &str =
    r#"<p class="text-gray-500 italic">No AI-generated content available</p>"#;

/// A line consisting entirely of `**…**`.
static BOLD_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*(.+)\*\*$").expect("bold line regex"));

/// The closed set of job-title keywords to highlight. Longer phrases first
/// so "Backend Engineer" wins over the bare "Engineer".
static JOB_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(Frontend Engineer|Backend Engineer|Full Stack Engineer|Designer|Developer|Manager|Engineer)",
    )
    .expect("job title regex")
});

/// A capitalized word run following the literal token "at " — a simple
/// heuristic for organization names.
static COMPANY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bat ([A-Z][A-Za-z0-9& ]+)").expect("company regex"));

const JOB_TITLE_SPAN: &str =
    r#"<span class="font-semibold text-blue-600 dark:text-blue-400">$1</span>"#;

/// Formats raw AI output as a newline-joined sequence of HTML fragments.
/// Styling classes are fixed, not configurable. Never fails.
pub fn format_ai_content(text: &str) -> String {
    if text.is_empty() {
        return EMPTY_CONTENT_PLACEHOLDER.to_string();
    }

    // First-heading state is local to this call.
    let mut is_first_heading = true;

    let fragments: Vec<String> = text
        .split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return "<br/>".to_string();
            }

            if let Some(caps) = BOLD_LINE_RE.captures(trimmed) {
                let heading = &caps[1];
                if is_first_heading {
                    is_first_heading = false;
                    return format!(
                        r#"<h1 class="text-3xl font-bold mb-8 text-gray-900 dark:text-gray-100">{heading}</h1>"#
                    );
                }
                return format!(
                    r#"<h2 class="font-bold text-xl mt-6 mb-3 text-gray-900 dark:text-gray-100">{heading}</h2>"#
                );
            }

            let highlighted = JOB_TITLE_RE.replace_all(trimmed, JOB_TITLE_SPAN);
            let emphasized = COMPANY_RE.replace_all(&highlighted, "at <em>$1</em>");

            format!(
                r#"<p class="leading-relaxed text-gray-800 dark:text-gray-200 mb-4">{emphasized}</p>"#
            )
        })
        .collect();

    fragments.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_returns_placeholder_exactly() {
        assert_eq!(format_ai_content(""), EMPTY_CONTENT_PLACEHOLDER);
    }

    #[test]
    fn test_placeholder_text_mentions_no_content() {
        assert!(format_ai_content("").contains("No AI-generated content available"));
    }

    #[test]
    fn test_first_bold_line_becomes_h1_not_h2() {
        let html = format_ai_content("**Jane Doe, Engineer**\nShe works at Acme Corp.");
        assert!(html.contains("<h1"), "first bold line must be a top-level heading");
        assert!(html.contains("Jane Doe, Engineer</h1>"));
        assert!(!html.contains("<h2"));
    }

    #[test]
    fn test_paragraph_highlights_job_title_and_emphasizes_company() {
        let html = format_ai_content("**Jane Doe**\nShe works as an Engineer at Acme Corp.");
        assert!(html.contains(
            r#"<span class="font-semibold text-blue-600 dark:text-blue-400">Engineer</span>"#
        ));
        assert!(html.contains("at <em>Acme Corp"));
    }

    #[test]
    fn test_job_title_inside_heading_is_not_wrapped() {
        // Keywords in a fully-bold line stay untouched; substitutions apply
        // to paragraph lines only.
        let html = format_ai_content("**Jane Doe, Engineer**\nShe works at Acme Corp.");
        assert!(html.contains("Jane Doe, Engineer</h1>"));
        assert!(!html.contains("<span"));
        assert!(html.contains("at <em>Acme Corp"));
    }

    #[test]
    fn test_second_bold_line_becomes_subheading() {
        let html = format_ai_content("**Main Title**\n**Background & Expertise**");
        assert!(html.contains("Main Title</h1>"));
        assert!(html.contains("Background & Expertise</h2>"));
    }

    #[test]
    fn test_heading_state_resets_between_calls() {
        let first = format_ai_content("**One**");
        let second = format_ai_content("**Two**");
        assert!(first.contains("One</h1>"));
        assert!(second.contains("Two</h1>"), "first-heading state must not leak across calls");
    }

    #[test]
    fn test_blank_line_becomes_line_break() {
        let html = format_ai_content("First.\n\nSecond.");
        let fragments: Vec<&str> = html.split('\n').collect();
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[1], "<br/>");
    }

    #[test]
    fn test_job_title_match_is_case_insensitive_and_keeps_casing() {
        let html = format_ai_content("A seasoned frontend engineer.");
        assert!(html.contains(">frontend engineer</span>"));
    }

    #[test]
    fn test_longer_job_titles_win_over_bare_engineer() {
        let html = format_ai_content("A Full Stack Engineer by trade.");
        assert!(html.contains(">Full Stack Engineer</span>"));
    }

    #[test]
    fn test_lowercase_word_after_at_is_not_emphasized() {
        let html = format_ai_content("Good at listening.");
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_plain_line_becomes_paragraph() {
        let html = format_ai_content("Just a sentence.");
        assert!(html.starts_with("<p class=\"leading-relaxed"));
        assert!(html.ends_with("Just a sentence.</p>"));
    }

    #[test]
    fn test_input_order_is_preserved() {
        let html = format_ai_content("**Title**\nFirst paragraph.\nSecond paragraph.");
        let h1 = html.find("<h1").unwrap();
        let p1 = html.find("First paragraph.").unwrap();
        let p2 = html.find("Second paragraph.").unwrap();
        assert!(h1 < p1 && p1 < p2);
    }

    #[test]
    fn test_never_fails_on_arbitrary_markup() {
        let html = format_ai_content("** unbalanced\n*single*\n```code```");
        assert!(!html.is_empty());
    }
}
