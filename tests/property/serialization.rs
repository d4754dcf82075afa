//! Property-based tests for the wire contract.
//!
//! Uses proptest to verify:
//! 1. The completed flag normalizes from any integer or bool encoding and
//!    always re-serializes as a strict JSON bool.
//! 2. Any task with a JSON-safe title survives a serialize → deserialize
//!    round trip unchanged.
//! 3. Title validation accepts exactly the titles the data model allows.

use proptest::prelude::*;

use termtask_proto::task::{MAX_TASK_TITLE_LENGTH, Task, TaskId, TitleError, validate_title};

proptest! {
    /// Integer-encoded completed flags normalize to `n != 0`.
    #[test]
    fn integer_completed_normalizes(id in any::<i64>(), flag in any::<i64>()) {
        let json = format!(r#"{{"id":{id},"title":"t","completed":{flag}}}"#);
        let task: Task = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(task.completed, flag != 0);
    }

    /// Bool-encoded completed flags pass through unchanged.
    #[test]
    fn bool_completed_passes_through(id in any::<i64>(), flag in any::<bool>()) {
        let json = format!(r#"{{"id":{id},"title":"t","completed":{flag}}}"#);
        let task: Task = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(task.completed, flag);
    }

    /// A normalized task re-serializes with a strict JSON bool, so a second
    /// parse yields the identical value.
    #[test]
    fn reserialized_task_round_trips(
        id in any::<i64>(),
        title in "[a-zA-Z0-9 ]{1,100}",
        flag in any::<i64>(),
    ) {
        let task = Task {
            id: TaskId::new(id),
            title,
            completed: flag != 0,
        };
        let json = serde_json::to_string(&task).expect("serialize");
        let expected_bool = if task.completed { "true" } else { "false" };
        prop_assert!(json.contains(expected_bool));
        let reparsed: Task = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(task, reparsed);
    }

    /// Titles of 1..=100 code points with visible content validate.
    #[test]
    fn titles_within_limit_validate(pad in 0..MAX_TASK_TITLE_LENGTH) {
        let title: String = std::iter::once('x')
            .chain(std::iter::repeat_n('y', pad.min(MAX_TASK_TITLE_LENGTH - 1)))
            .collect();
        prop_assert_eq!(validate_title(&title), Ok(()));
    }

    /// Titles over 100 code points are rejected regardless of content.
    #[test]
    fn titles_over_limit_rejected(extra in 1usize..50) {
        let title: String = std::iter::repeat_n('z', MAX_TASK_TITLE_LENGTH + extra).collect();
        prop_assert_eq!(validate_title(&title), Err(TitleError::TooLong));
    }

    /// Whitespace-only titles are rejected as empty at any length.
    #[test]
    fn whitespace_titles_rejected(len in 0usize..100) {
        let title: String = std::iter::repeat_n(' ', len).collect();
        prop_assert_eq!(validate_title(&title), Err(TitleError::Empty));
    }
}
