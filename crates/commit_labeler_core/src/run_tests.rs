use super::*;
use crate::errors::CoreError;
use crate::event::{InlineCommit, PushEvent};
use crate::label_manager::LabelFailure;
use crate::settings::{LabelDefinition, RepositoryId};
use crate::test_support::{bot_commit, user_commit, Call, MockRepositoryClient};

fn settings(exclude_bots: bool) -> RunSettings {
    RunSettings {
        repository: RepositoryId::new("octo", "repo"),
        branch: "main".to_string(),
        label: LabelDefinition::new("released"),
        exclude_bots,
    }
}

fn push_to(git_ref: &str) -> TriggerEvent {
    TriggerEvent::Push(PushEvent {
        git_ref: git_ref.to_string(),
        before: "aaa".to_string(),
        after: "bbb".to_string(),
        commits: Vec::<InlineCommit>::new(),
    })
}

fn add_label_calls(client: &MockRepositoryClient) -> Vec<u64> {
    let mut numbers = client.labeled_targets();
    numbers.sort_unstable();
    numbers
}

#[tokio::test]
#[tracing_test::traced_test]
async fn test_non_push_event_is_skipped_with_warning() {
    let client = MockRepositoryClient::new();
    let event = TriggerEvent::Unsupported("pull_request".to_string());

    let outcome = run(&client, &settings(false), &event).await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::SkippedUnsupportedEvent("pull_request".to_string())
    );
    assert!(!outcome.is_failure());
    assert!(client.calls().is_empty());
    assert!(logs_contain("Unsupported event: pull_request"));
}

#[tokio::test]
async fn test_branch_mismatch_is_skipped() {
    let client = MockRepositoryClient::new();

    let outcome = run(&client, &settings(false), &push_to("refs/heads/dev"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::SkippedBranchMismatch {
            expected: "main".to_string(),
            actual: "dev".to_string()
        }
    );
    assert!(!outcome.is_failure());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_tag_push_is_skipped() {
    let client = MockRepositoryClient::new();

    let outcome = run(&client, &settings(false), &push_to("refs/tags/main"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::SkippedBranchMismatch {
            expected: "main".to_string(),
            actual: "refs/tags/main".to_string()
        }
    );
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_push_labels_referenced_issues_and_associated_pull_requests() {
    let client = MockRepositoryClient::new()
        .with_pages(vec![vec![
            user_commit("abc", "Fix #10"),
            user_commit("def", "unrelated"),
        ]])
        .with_pull_requests("def", &[20])
        .with_labels(&["released"]);

    let outcome = run(&client, &settings(false), &push_to("refs/heads/main"))
        .await
        .unwrap();

    assert_eq!(add_label_calls(&client), vec![10, 20]);
    match outcome {
        RunOutcome::Labeled(result) => {
            assert!(result.is_success());
            let mut labeled = result.labeled.clone();
            labeled.sort_unstable();
            assert_eq!(labeled, vec![10, 20]);
        }
        other => panic!("Expected labeled outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_resolution_makes_no_label_calls() {
    let client = MockRepositoryClient::new()
        .with_pages(vec![vec![user_commit("abc", "Refactor internals")]]);

    let outcome = run(&client, &settings(false), &push_to("refs/heads/main"))
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::NothingToLabel);
    assert!(client.calls().iter().all(|c| !matches!(
        c,
        Call::ListLabels | Call::CreateLabel { .. } | Call::AddLabel { .. }
    )));
}

#[tokio::test]
async fn test_missing_label_is_created_once_before_any_application() {
    let client = MockRepositoryClient::new()
        .with_pages(vec![vec![user_commit("abc", "fixes #1, fixes #2")]])
        .with_labels(&["bug"]);

    run(&client, &settings(false), &push_to("refs/heads/main"))
        .await
        .unwrap();

    let calls = client.calls();
    let creations: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, Call::CreateLabel { .. }))
        .map(|(i, _)| i)
        .collect();
    let first_application = calls
        .iter()
        .position(|c| matches!(c, Call::AddLabel { .. }))
        .expect("label should have been applied");

    assert_eq!(creations.len(), 1);
    assert!(creations[0] < first_application);
}

#[tokio::test]
async fn test_existing_label_is_not_created() {
    let client = MockRepositoryClient::new()
        .with_pages(vec![vec![user_commit("abc", "fixes #1")]])
        .with_labels(&["released"]);

    run(&client, &settings(false), &push_to("refs/heads/main"))
        .await
        .unwrap();

    assert!(!client
        .calls()
        .iter()
        .any(|c| matches!(c, Call::CreateLabel { .. })));
}

#[tokio::test]
async fn test_bot_reference_is_not_labeled_when_bots_excluded() {
    let client = MockRepositoryClient::new()
        .with_pages(vec![vec![
            bot_commit("bot", "fixes #5"),
            user_commit("usr", "fixes #6"),
        ]])
        .with_labels(&["released"]);

    run(&client, &settings(true), &push_to("refs/heads/main"))
        .await
        .unwrap();

    assert_eq!(add_label_calls(&client), vec![6]);
}

#[tokio::test]
async fn test_failure_on_one_target_still_labels_the_others() {
    let client = MockRepositoryClient::new()
        .with_pages(vec![vec![user_commit("abc", "fixes #7, closes #8")]])
        .with_labels(&["released"])
        .failing_on(7);

    let outcome = run(&client, &settings(false), &push_to("refs/heads/main"))
        .await
        .unwrap();

    assert!(outcome.is_failure());
    assert_eq!(add_label_calls(&client), vec![7, 8]);
    match outcome {
        RunOutcome::Labeled(result) => {
            assert_eq!(result.labeled, vec![8]);
            assert_eq!(
                result.failures,
                vec![LabelFailure {
                    number: 7,
                    label: "released".to_string(),
                    reason: "Resource not found".to_string(),
                }]
            );
        }
        other => panic!("Expected labeled outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upstream_failure_aborts_before_labeling() {
    let client = MockRepositoryClient::new().failing_compare();

    let result = run(&client, &settings(false), &push_to("refs/heads/main")).await;

    assert!(matches!(result, Err(CoreError::Upstream { .. })));
    assert!(client
        .calls()
        .iter()
        .all(|c| matches!(c, Call::Compare { .. })));
}

#[tokio::test]
async fn test_label_listing_failure_aborts_run() {
    let client = MockRepositoryClient::new()
        .with_pages(vec![vec![user_commit("abc", "fixes #1")]])
        .failing_list_labels();

    let result = run(&client, &settings(false), &push_to("refs/heads/main")).await;

    assert!(matches!(result, Err(CoreError::Upstream { .. })));
    assert_eq!(add_label_calls(&client), Vec::<u64>::new());
}

#[test]
fn test_outcome_failure_classification() {
    assert!(!RunOutcome::NothingToLabel.is_failure());
    assert!(!RunOutcome::Labeled(ApplyLabelResult::new()).is_failure());
}
