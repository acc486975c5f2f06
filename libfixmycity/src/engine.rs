//! Voting and status transitions
//!
//! Pure functions over a single [`Report`]. They know nothing about the
//! store; callers apply them through [`crate::store::ReportStore::update_by_id`].
//!
//! Votes are not deduplicated: every call counts, and report upvotes may go
//! negative.

use crate::error::{FixMyCityError, Result};
use crate::types::{Comment, Report, Status};

pub fn upvote(report: &mut Report) -> i64 {
    report.upvotes += 1;
    report.upvotes
}

pub fn downvote(report: &mut Report) -> i64 {
    report.upvotes -= 1;
    report.upvotes
}

/// Move the report to the next status in the cycle, wrapping Resolved back
/// to Submitted
///
/// This does not consult [`Status::can_advance`]; the guarded entry point is
/// [`crate::service::reports::ReportService::advance_status`].
pub fn advance_status(report: &mut Report) -> Status {
    report.status = report.status.next();
    report.status
}

/// Append a comment with zero votes
///
/// # Errors
///
/// Returns `FixMyCityError::Validation` if the text is empty after trimming.
/// The report is left untouched.
pub fn add_comment(report: &mut Report, text: &str) -> Result<usize> {
    let text = require_text(text, "Comment")?;
    report.comments.push(Comment::new(text));
    Ok(report.comments.len() - 1)
}

/// # Errors
///
/// Returns `FixMyCityError::IndexOutOfRange` if `index` does not name an
/// existing comment.
pub fn upvote_comment(report: &mut Report, index: usize) -> Result<u64> {
    let comment = comment_mut(report, index)?;
    comment.upvotes += 1;
    Ok(comment.upvotes)
}

/// # Errors
///
/// Returns `FixMyCityError::IndexOutOfRange` if `index` does not name an
/// existing comment.
pub fn downvote_comment(report: &mut Report, index: usize) -> Result<u64> {
    let comment = comment_mut(report, index)?;
    comment.downvotes += 1;
    Ok(comment.downvotes)
}

fn comment_mut(report: &mut Report, index: usize) -> Result<&mut Comment> {
    let len = report.comments.len();
    report
        .comments
        .get_mut(index)
        .ok_or(FixMyCityError::IndexOutOfRange { index, len })
}

/// Trim `text` and reject it if nothing is left
pub(crate) fn require_text(text: &str, field: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FixMyCityError::Validation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IssueType, ReportId};
    use chrono::Utc;

    fn report() -> Report {
        Report::new(
            ReportId::new(1),
            IssueType::Streetlight,
            "light out on 5th".to_string(),
            None,
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_upvote_then_downvote_is_identity() {
        let mut report = report();
        report.upvotes = 7;

        for _ in 0..5 {
            upvote(&mut report);
        }
        for _ in 0..5 {
            downvote(&mut report);
        }

        assert_eq!(report.upvotes, 7);
    }

    #[test]
    fn test_downvote_goes_negative() {
        let mut report = report();
        report.upvotes = 2;

        downvote(&mut report);
        downvote(&mut report);
        assert_eq!(report.upvotes, 0);

        assert_eq!(downvote(&mut report), -1);
    }

    #[test]
    fn test_advance_status_three_times_is_identity() {
        for start in [Status::Submitted, Status::InProgress, Status::Resolved] {
            let mut report = report();
            report.status = start;

            advance_status(&mut report);
            advance_status(&mut report);
            advance_status(&mut report);

            assert_eq!(report.status, start);
        }
    }

    #[test]
    fn test_advance_status_wraps_resolved() {
        let mut report = report();
        report.status = Status::Resolved;
        assert_eq!(advance_status(&mut report), Status::Submitted);
    }

    #[test]
    fn test_add_comment_appends_with_zero_votes() {
        let mut report = report();

        let index = add_comment(&mut report, "  still broken  ").unwrap();

        assert_eq!(index, 0);
        assert_eq!(report.comments.len(), 1);
        assert_eq!(report.comments[0].text, "still broken");
        assert_eq!(report.comments[0].upvotes, 0);
        assert_eq!(report.comments[0].downvotes, 0);
    }

    #[test]
    fn test_add_comment_rejects_whitespace() {
        let mut report = report();

        let result = add_comment(&mut report, "   \n\t");

        assert!(matches!(result, Err(FixMyCityError::Validation(_))));
        assert!(report.comments.is_empty());
    }

    #[test]
    fn test_comments_keep_insertion_order() {
        let mut report = report();
        add_comment(&mut report, "first").unwrap();
        add_comment(&mut report, "second").unwrap();
        add_comment(&mut report, "third").unwrap();

        let texts: Vec<_> = report.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_comment_votes_are_independent() {
        let mut report = report();
        add_comment(&mut report, "agreed").unwrap();

        upvote_comment(&mut report, 0).unwrap();
        upvote_comment(&mut report, 0).unwrap();
        downvote_comment(&mut report, 0).unwrap();

        assert_eq!(report.comments[0].upvotes, 2);
        assert_eq!(report.comments[0].downvotes, 1);
    }

    #[test]
    fn test_comment_vote_out_of_range() {
        let mut report = report();
        add_comment(&mut report, "only one").unwrap();

        let result = upvote_comment(&mut report, 1);
        match result {
            Err(FixMyCityError::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 1);
                assert_eq!(len, 1);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }

        assert!(downvote_comment(&mut report, 9).is_err());
        assert_eq!(report.comments[0].upvotes, 0);
        assert_eq!(report.comments[0].downvotes, 0);
    }
}
