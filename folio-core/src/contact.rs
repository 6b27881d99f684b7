use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{FormMessages, FormSettings};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const NAME_MESSAGE: &str = "Name should only contain letters and spaces.";
pub const MESSAGE_LENGTH_MESSAGE: &str = "Message should be at least 10 characters long.";
pub const GENERAL_ERROR_MESSAGE: &str = "Please fill in all required fields correctly.";

const MESSAGE_MIN_LEN: usize = 10;
/// Fake round-trip time while no endpoint is configured.
const SIMULATED_DELAY: Duration = Duration::from_millis(2000);
/// How long the status banner stays up, success or failure.
pub const STATUS_HIDE_AFTER: Duration = Duration::from_millis(5000);

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Subject)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// The entered form values. Kept around unchanged on failure so the
/// visitor can resubmit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl Submission {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }
}

/// Checks one field. Rules run in precedence order and the first
/// failure wins.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    let fail = |message| Err(FieldError { field, message });

    if field.is_required() && value.is_empty() {
        return fail(REQUIRED_MESSAGE);
    }
    if field == Field::Email && !value.is_empty() && !EMAIL_RE.is_match(value) {
        return fail(EMAIL_MESSAGE);
    }
    if field == Field::Name && !value.is_empty() && !NAME_RE.is_match(value) {
        return fail(NAME_MESSAGE);
    }
    if field == Field::Message && !value.is_empty() && value.chars().count() < MESSAGE_MIN_LEN {
        return fail(MESSAGE_LENGTH_MESSAGE);
    }

    Ok(())
}

pub fn validate_submission(submission: &Submission) -> Vec<FieldError> {
    Field::ALL
        .iter()
        .filter_map(|f| validate_field(*f, submission.value(*f)).err())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    Failure,
    /// Validation failed; no network call was made.
    Invalid,
}

/// What the page should do after a submit attempt.
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    pub message: String,
    /// Success clears the fields; failure keeps them for resubmission.
    pub clear_fields: bool,
    /// The status banner auto-hides after this.
    pub hide_after: Duration,
}

/// Runs the contact form: re-validate everything, then either POST the
/// fields form-encoded to the configured endpoint or simulate a
/// delivery while the endpoint is still the placeholder.
#[derive(Clone)]
pub struct ContactForm {
    endpoint: Option<String>,
    messages: FormMessages,
    client: reqwest::Client,
}

impl ContactForm {
    pub fn new(settings: &FormSettings, messages: FormMessages) -> Self {
        Self {
            endpoint: settings.configured_endpoint().map(str::to_string),
            messages,
            client: reqwest::Client::new(),
        }
    }

    pub fn sending_message(&self) -> &str {
        &self.messages.sending
    }

    pub async fn submit(&self, submission: &Submission) -> SubmitReport {
        if !validate_submission(submission).is_empty() {
            return SubmitReport {
                outcome: SubmitOutcome::Invalid,
                message: GENERAL_ERROR_MESSAGE.to_string(),
                clear_fields: false,
                hide_after: STATUS_HIDE_AFTER,
            };
        }

        let delivered = match &self.endpoint {
            Some(endpoint) => self.post(endpoint, submission).await,
            None => {
                // Stub behavior: nothing is delivered anywhere.
                tokio::time::sleep(SIMULATED_DELAY).await;
                true
            }
        };

        if delivered {
            SubmitReport {
                outcome: SubmitOutcome::Success,
                message: self.messages.success.clone(),
                clear_fields: true,
                hide_after: STATUS_HIDE_AFTER,
            }
        } else {
            SubmitReport {
                outcome: SubmitOutcome::Failure,
                message: self.messages.error.clone(),
                clear_fields: false,
                hide_after: STATUS_HIDE_AFTER,
            }
        }
    }

    /// Transport errors and non-OK statuses both land on the failure
    /// path.
    async fn post(&self, endpoint: &str, submission: &Submission) -> bool {
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(submission)
            .send()
            .await;

        match response {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn filled() -> Submission {
        Submission {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "this is long enough".into(),
        }
    }

    #[test]
    fn empty_required_field_fails_first() {
        let err = validate_field(Field::Email, "").unwrap_err();
        assert_eq!(err.message, REQUIRED_MESSAGE);
        // Optional fields may stay empty.
        assert!(validate_field(Field::Subject, "").is_ok());
    }

    #[test]
    fn email_pattern_is_enforced() {
        assert_eq!(
            validate_field(Field::Email, "not-an-email").unwrap_err().message,
            EMAIL_MESSAGE
        );
        assert!(validate_field(Field::Email, "a@b.co").is_ok());
    }

    #[test]
    fn name_allows_letters_and_spaces_only() {
        assert_eq!(
            validate_field(Field::Name, "John123").unwrap_err().message,
            NAME_MESSAGE
        );
        assert!(validate_field(Field::Name, "John Ronald Reuel").is_ok());
    }

    #[test]
    fn message_has_a_minimum_length() {
        assert_eq!(
            validate_field(Field::Message, "short").unwrap_err().message,
            MESSAGE_LENGTH_MESSAGE
        );
        assert!(validate_field(Field::Message, "this is long enough").is_ok());
    }

    #[test]
    fn submission_collects_every_field_error() {
        let errors = validate_submission(&Submission::default());
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.message == REQUIRED_MESSAGE));
    }

    #[tokio::test]
    async fn invalid_submission_makes_no_network_call() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200);
        });

        let form = ContactForm::new(
            &FormSettings {
                endpoint: server.url("/contact"),
                enable_recaptcha: false,
            },
            FormMessages::default(),
        );

        let report = form.submit(&Submission::default()).await;
        assert_eq!(report.outcome, SubmitOutcome::Invalid);
        assert_eq!(report.message, GENERAL_ERROR_MESSAGE);
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn configured_endpoint_posts_form_encoded() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/contact")
                .header("accept", "application/json")
                .body_contains("name=Ada+Lovelace");
            then.status(200);
        });

        let form = ContactForm::new(
            &FormSettings {
                endpoint: server.url("/contact"),
                enable_recaptcha: false,
            },
            FormMessages::default(),
        );

        let report = form.submit(&filled()).await;
        mock.assert();
        assert_eq!(report.outcome, SubmitOutcome::Success);
        assert!(report.clear_fields);
        assert_eq!(report.hide_after, STATUS_HIDE_AFTER);
    }

    #[tokio::test]
    async fn non_ok_response_keeps_the_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(500);
        });

        let form = ContactForm::new(
            &FormSettings {
                endpoint: server.url("/contact"),
                enable_recaptcha: false,
            },
            FormMessages::default(),
        );

        let report = form.submit(&filled()).await;
        assert_eq!(report.outcome, SubmitOutcome::Failure);
        assert_eq!(report.message, FormMessages::default().error);
        assert!(!report.clear_fields);
    }

    #[tokio::test(start_paused = true)]
    async fn placeholder_endpoint_simulates_success_after_the_fixed_delay() {
        let form = ContactForm::new(&FormSettings::default(), FormMessages::default());

        let started = tokio::time::Instant::now();
        let report = form.submit(&filled()).await;
        assert!(started.elapsed() >= SIMULATED_DELAY);
        assert_eq!(report.outcome, SubmitOutcome::Success);
        assert!(report.clear_fields);
    }
}
