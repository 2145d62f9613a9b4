//! Guards for card operations and form fields.
//!
//! These are pure functions: given a record (and the current user), they
//! either allow the operation or return the refusal to show. Applying the
//! operation is left to the board and the forms.

use super::errors::{BoardError, CardAction};
use super::session::UserProfile;
use super::todo::TodoRecord;

/// Refuse edit/delete/move while a timer runs on the card.
pub fn ensure_unlocked(record: &TodoRecord, action: CardAction) -> Result<(), BoardError> {
    if record.active {
        return Err(BoardError::Locked {
            id: record.id,
            action,
        });
    }
    Ok(())
}

/// Decide whether `user` may start a timer on `selected`.
///
/// Checks run in order: already running, finished, someone else's todo.
pub fn check_timer_start(selected: &TodoRecord, user: &UserProfile) -> Result<(), BoardError> {
    if selected.active {
        return Err(BoardError::AlreadyRunning(selected.id));
    }
    if selected.status.is_done() {
        return Err(BoardError::AlreadyDone(selected.id));
    }
    if selected.assignee.email != user.email {
        return Err(BoardError::NotAssignee {
            id: selected.id,
            assignee: selected.assignee.email.clone(),
        });
    }
    Ok(())
}

/// A required text field must contain something other than whitespace.
pub fn require_text(field: &'static str, value: &str) -> Result<(), BoardError> {
    if value.trim().is_empty() {
        return Err(BoardError::MissingField(field));
    }
    Ok(())
}

/// Length limit counted in characters, not bytes.
pub fn limit_chars(field: &'static str, value: &str, max: usize) -> Result<(), BoardError> {
    if value.trim().chars().count() > max {
        return Err(BoardError::TooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoStatus;
    use crate::testing::{profile, todo};
    use rstest::rstest;

    #[rstest]
    #[case::edit(CardAction::Edit)]
    #[case::delete(CardAction::Delete)]
    #[case::move_(CardAction::Move)]
    fn active_card_is_locked(#[case] action: CardAction) {
        let mut card = todo(1, TodoStatus::InProgress, "kim@example.com");
        assert!(ensure_unlocked(&card, action).is_ok());

        card.active = true;
        assert!(matches!(
            ensure_unlocked(&card, action),
            Err(BoardError::Locked { action: a, .. }) if a == action
        ));
    }

    #[test]
    fn timer_start_checks_run_in_order() {
        let kim = profile("kim@example.com");

        // running wins over done and foreign
        let mut card = todo(1, TodoStatus::Done, "lee@example.com");
        card.active = true;
        assert!(matches!(check_timer_start(&card, &kim), Err(BoardError::AlreadyRunning(_))));

        card.active = false;
        assert!(matches!(check_timer_start(&card, &kim), Err(BoardError::AlreadyDone(_))));

        card.status = TodoStatus::Todo;
        assert!(matches!(check_timer_start(&card, &kim), Err(BoardError::NotAssignee { .. })));

        card.assignee.email = "kim@example.com".into();
        assert!(check_timer_start(&card, &kim).is_ok());
    }

    #[rstest]
    #[case::empty("", false)]
    #[case::blank("   \t", false)]
    #[case::text(" ok ", true)]
    fn required_text(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(require_text("title", value).is_ok(), ok);
    }

    #[test]
    fn limit_counts_characters() {
        // 15 hangul syllables are 45 bytes but still fit
        assert!(limit_chars("group name", "가나다라마바사아자차카타파하가", 15).is_ok());
        assert!(limit_chars("group name", "0123456789abcdef", 15).is_err());
    }
}
