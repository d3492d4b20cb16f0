//! Behaviour of the signup form component.

use std::time::Duration;

use reform::validation::keys;
use reform::{ControlStatus, FieldValue};
use serde_json::json;
use signup_form::form::{EMAIL, GENDER, HOBBIES, USER_DATA, USERNAME};
use signup_form::{EMAIL_IS_FORBIDDEN, NAME_IS_FORBIDDEN, SignupConfig, SignupForm};

fn signup() -> SignupForm {
    SignupForm::new(&SignupConfig::default()).unwrap()
}

fn error_keys(control: &reform::FormControl) -> Vec<String> {
    control
        .errors()
        .map(|errors| errors.keys().map(str::to_string).collect())
        .unwrap_or_default()
}

// ============================================================================
// Initial state
// ============================================================================

#[test]
fn test_initial_state() {
    let form = signup();

    assert_eq!(form.gender().value(), FieldValue::from("male"));
    assert!(form.hobbies().is_empty());
    assert_eq!(error_keys(form.username()), vec![keys::REQUIRED]);
    assert_eq!(error_keys(form.email()), vec![keys::REQUIRED]);
    assert_eq!(form.form().status(), ControlStatus::Invalid);
}

#[test]
fn test_model_has_exactly_three_top_level_keys() {
    let form = signup();

    assert_eq!(
        form.form().names().collect::<Vec<_>>(),
        vec![USER_DATA, GENDER, HOBBIES]
    );
    let user_data = form.form().group(USER_DATA).unwrap();
    assert_eq!(user_data.names().collect::<Vec<_>>(), vec![USERNAME, EMAIL]);
}

#[test]
fn test_gender_choices_and_unchecked_default() {
    let form = signup();
    assert_eq!(form.genders(), ["male", "female"]);

    let config = SignupConfig::default().with_default_gender("unknown");
    let form = SignupForm::new(&config).unwrap();
    assert_eq!(form.gender().value().as_str(), Some("unknown"));
    assert!(form.gender().is_valid());
}

#[test]
fn test_paths_reach_the_same_controls() {
    let form = signup();
    let by_path = form.form().control("userData.username").unwrap();

    by_path.set_value("Max").unwrap();
    assert_eq!(form.username().value().as_str(), Some("Max"));
}

// ============================================================================
// Username
// ============================================================================

#[test]
fn test_forbidden_usernames() {
    let form = signup();

    for name in ["Chris", "Anna"] {
        form.username().set_value(name).unwrap();
        assert_eq!(error_keys(form.username()), vec![NAME_IS_FORBIDDEN], "{name}");
    }
}

#[test]
fn test_other_usernames_pass() {
    let form = signup();

    for name in ["Max", "anna", "ANNA", "Anna ", "Christopher", " "] {
        form.username().set_value(name).unwrap();
        assert!(!form.username().has_error(NAME_IS_FORBIDDEN), "{name:?}");
        assert!(form.username().is_valid(), "{name:?}");
    }
}

#[test]
fn test_blocklist_changes_apply_to_next_validation() {
    let form = signup();
    form.username().set_value("Max").unwrap();
    assert!(form.username().is_valid());

    form.forbidden_usernames()
        .update(|names| names.push("Max".to_string()));
    form.username().update_value_and_validity().unwrap();

    assert!(form.username().has_error(NAME_IS_FORBIDDEN));
}

#[test]
fn test_blocklist_is_per_instance() {
    let default_form = signup();
    let config = SignupConfig::default().with_forbidden_usernames(["root"]);
    let custom = SignupForm::new(&config).unwrap();

    custom.username().set_value("Anna").unwrap();
    default_form.username().set_value("root").unwrap();

    assert!(custom.username().is_valid());
    assert!(default_form.username().is_valid());
}

// ============================================================================
// Email
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_malformed_email_fails_without_async_check() {
    let form = signup();

    form.email().set_value("not an email").unwrap();

    assert_eq!(error_keys(form.email()), vec![keys::EMAIL]);
    assert!(!form.email().is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_unconventional_emails_never_reach_the_blocklist() {
    let form = signup();

    for address in [
        "Test <test@test.com>",
        "\"test\"@test.com",
        "test@[127.0.0.1]",
        " test@test.com",
        "test.test.com",
    ] {
        form.email().set_value(address).unwrap();
        assert_eq!(error_keys(form.email()), vec![keys::EMAIL], "{address:?}");
        assert!(!form.email().is_pending(), "{address:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_forbidden_email_after_delay() {
    let form = signup();

    form.email().set_value("test@test.com").unwrap();
    assert!(form.email().is_pending());
    assert!(form.form().is_invalid(), "username is still missing");

    tokio::time::sleep(Duration::from_millis(1400)).await;
    assert!(form.email().is_pending());

    assert_eq!(form.email().settled().await, ControlStatus::Invalid);
    assert_eq!(error_keys(form.email()), vec![EMAIL_IS_FORBIDDEN]);
}

#[tokio::test(start_paused = true)]
async fn test_allowed_email_becomes_valid() {
    let form = signup();

    form.email().set_value("max@example.com").unwrap();
    assert_eq!(form.email().settled().await, ControlStatus::Valid);
    assert!(form.email().errors().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_stale_forbidden_result_is_not_applied() {
    let form = signup();

    form.email().set_value("test@test.com").unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    form.email().set_value("max@example.com").unwrap();

    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert!(!form.email().has_error(EMAIL_IS_FORBIDDEN));

    assert_eq!(form.email().settled().await, ControlStatus::Valid);
}

#[tokio::test(start_paused = true)]
async fn test_configured_email_delay() {
    let config = SignupConfig::default().with_email_check_delay(Duration::from_millis(10));
    let form = SignupForm::new(&config).unwrap();

    let start = tokio::time::Instant::now();
    form.email().set_value("test@test.com").unwrap();
    form.email().settled().await;

    assert!(start.elapsed() >= Duration::from_millis(10));
    assert!(start.elapsed() < Duration::from_millis(1500));
    assert!(form.email().has_error(EMAIL_IS_FORBIDDEN));
}

// ============================================================================
// Hobbies
// ============================================================================

#[test]
fn test_append_hobby_adds_blank_required_entries() {
    let form = signup();

    for expected_len in 1..=5 {
        form.append_hobby().unwrap();
        assert_eq!(form.hobbies().len(), expected_len);
    }

    for hobby in form.hobbies() {
        assert!(hobby.value().is_null());
        assert_eq!(error_keys(&hobby), vec![keys::REQUIRED]);
    }
}

#[test]
fn test_hobbies_keep_insertion_order() {
    let form = signup();

    let first = form.append_hobby().unwrap();
    let second = form.append_hobby().unwrap();
    first.set_value("chess").unwrap();
    second.set_value("climbing").unwrap();

    let hobbies = form.hobbies();
    assert_eq!(hobbies.len(), 2);
    assert_eq!(hobbies[0].id(), first.id());
    assert_eq!(hobbies[1].id(), second.id());
    assert_eq!(form.form().value()["hobbies"], json!(["chess", "climbing"]));
}

#[test]
fn test_hobby_becomes_valid_once_filled() {
    let form = signup();
    let hobby = form.append_hobby().unwrap();

    hobby.set_value("chess").unwrap();
    assert!(hobby.is_valid());

    hobby.set_value("").unwrap();
    assert!(hobby.has_error(keys::REQUIRED));
}

#[test]
fn test_reading_hobbies_has_no_side_effects() {
    let form = signup();
    form.append_hobby().unwrap();
    form.append_hobby().unwrap().set_value("chess").unwrap();

    let first: Vec<_> = form.hobbies().iter().map(|h| (h.id(), h.value())).collect();
    let second: Vec<_> = form.hobbies().iter().map(|h| (h.id(), h.value())).collect();

    assert_eq!(first, second);
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submit_returns_snapshot_even_when_invalid() {
    let form = signup();
    form.append_hobby().unwrap();

    let snapshot = form.submit();

    assert_eq!(snapshot.status, ControlStatus::Invalid);
    assert_eq!(
        snapshot.value,
        json!({
            "userData": { "username": null, "email": null },
            "gender": "male",
            "hobbies": [null],
        })
    );
    assert_eq!(
        snapshot.errors.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["hobbies.0", "userData.email", "userData.username"]
    );
}

#[test]
fn test_submit_does_not_mutate_model() {
    let form = signup();
    form.username().set_value("Anna").unwrap();

    let first = form.submit();
    let second = form.submit();

    assert_eq!(first, second);
    assert_eq!(form.submit_count(), 2);
    assert_eq!(form.username().value().as_str(), Some("Anna"));
    assert!(form.username().is_untouched());
}

#[tokio::test(start_paused = true)]
async fn test_submit_valid_form() {
    let form = signup();
    form.username().set_value("Max").unwrap();
    form.email().set_value("max@example.com").unwrap();
    form.gender().set_value("female").unwrap();
    form.append_hobby().unwrap().set_value("chess").unwrap();

    let pending = form.submit();
    assert_eq!(pending.status, ControlStatus::Pending);

    assert_eq!(form.form().settled().await, ControlStatus::Valid);
    let snapshot = form.submit();
    assert!(snapshot.is_valid());
    assert!(snapshot.errors.is_empty());
    assert_eq!(snapshot.value["userData"]["email"], json!("max@example.com"));
}
