//! Waitlist signup flow: call-to-action, email capture, confirmation.
//!
//! The flow only reaches [`Stage::Submitted`] once the form intake has
//! acknowledged the submission. Until then the user stays in
//! [`Stage::CollectingEmail`], however long that takes.

use log::{info, warn};
use std::fmt;

use crate::config::SiteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    CollectingEmail,
    Submitted,
}

/// Payload handed to the form intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistSubmission {
    pub attempt: u32,
    pub form_name: String,
    pub email: String,
}

impl WaitlistSubmission {
    /// `application/x-www-form-urlencoded` body in the shape Netlify Forms expects.
    pub fn form_body(&self) -> String {
        format!(
            "form-name={}&email={}",
            urlencoding::encode(&self.form_name),
            urlencoding::encode(&self.email)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitlistError {
    NotCollecting,
    EmptyEmail,
    AlreadyPending,
}

impl fmt::Display for WaitlistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitlistError::NotCollecting => write!(f, "The email form is not open"),
            WaitlistError::EmptyEmail => write!(f, "Enter an email address first"),
            WaitlistError::AlreadyPending => write!(f, "Still waiting on the last submission"),
        }
    }
}

impl std::error::Error for WaitlistError {}

/// Why the intake did not acknowledge a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    Network(String),
    Status(u16),
    Encode(String),
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::Network(msg) => write!(f, "Could not reach the signup form: {}", msg),
            IntakeError::Status(code) => write!(f, "Signup form answered with status {}", code),
            IntakeError::Encode(msg) => write!(f, "Could not build the signup request: {}", msg),
        }
    }
}

impl std::error::Error for IntakeError {}

pub type Settled = Box<dyn FnOnce(Result<(), IntakeError>)>;

/// External form intake. `on_settled` runs once, after the intake has either
/// acknowledged receipt or failed.
pub trait FormIntake {
    fn send(&self, submission: WaitlistSubmission, on_settled: Settled);
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaitlistFlow {
    form_name: String,
    stage: Stage,
    email: String,
    pending: Option<WaitlistSubmission>,
    attempts: u32,
    last_error: Option<String>,
}

impl WaitlistFlow {
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            ..Self::default()
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn pending(&self) -> Option<&WaitlistSubmission> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Show the email form. Only meaningful from `Idle`.
    pub fn open(&mut self) {
        if self.stage == Stage::Idle {
            self.stage = Stage::CollectingEmail;
        }
    }

    /// Returns `false` if the email is currently read-only.
    pub fn set_email(&mut self, email: impl Into<String>) -> bool {
        if self.stage != Stage::CollectingEmail || self.pending.is_some() {
            return false;
        }
        self.email = email.into();
        true
    }

    /// Queue the current email for the intake.
    pub fn begin_submit(&mut self) -> Result<WaitlistSubmission, WaitlistError> {
        if self.stage != Stage::CollectingEmail {
            return Err(WaitlistError::NotCollecting);
        }
        if self.pending.is_some() {
            return Err(WaitlistError::AlreadyPending);
        }
        let email = self.email.trim();
        if email.is_empty() {
            warn!("Rejected waitlist submission with an empty email");
            self.last_error = Some(WaitlistError::EmptyEmail.to_string());
            return Err(WaitlistError::EmptyEmail);
        }

        self.attempts += 1;
        let submission = WaitlistSubmission {
            attempt: self.attempts,
            form_name: self.form_name.clone(),
            email: email.to_string(),
        };
        self.last_error = None;
        self.pending = Some(submission.clone());
        Ok(submission)
    }

    /// Apply the intake's answer for `attempt`. Answers for anything other
    /// than the pending attempt are ignored. Returns whether the state changed.
    pub fn settle(&mut self, attempt: u32, outcome: Result<(), IntakeError>) -> bool {
        match &self.pending {
            Some(pending) if pending.attempt == attempt => {}
            _ => {
                warn!("Ignoring settlement for stale waitlist attempt {}", attempt);
                return false;
            }
        }
        self.pending = None;
        match outcome {
            Ok(()) => {
                info!("Waitlist submission {} acknowledged", attempt);
                self.stage = Stage::Submitted;
                self.last_error = None;
            }
            Err(err) => {
                warn!("Waitlist submission {} failed: {}", attempt, err);
                self.last_error = Some(err.to_string());
            }
        }
        true
    }
}

/// Share link shown after signing up.
pub fn share_intent_url(config: &SiteConfig) -> String {
    format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        urlencoding::encode(&config.share_text),
        urlencoding::encode(&config.share_url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Holds on to every submission and its callback so the test decides
    /// when (and whether) the acknowledgment arrives.
    #[derive(Default, Clone)]
    struct RecordingIntake {
        sent: Rc<RefCell<Vec<(WaitlistSubmission, Option<Settled>)>>>,
    }

    impl RecordingIntake {
        fn count(&self) -> usize {
            self.sent.borrow().len()
        }

        fn answer(&self, index: usize, outcome: Result<(), IntakeError>) {
            let callback = self.sent.borrow_mut()[index].1.take().expect("already answered");
            callback(outcome);
        }
    }

    impl FormIntake for RecordingIntake {
        fn send(&self, submission: WaitlistSubmission, on_settled: Settled) {
            self.sent.borrow_mut().push((submission, Some(on_settled)));
        }
    }

    /// Mirrors the hook: submit, then hand the pending submission to the
    /// intake with a callback that settles back into the shared flow.
    fn submit(flow: &Rc<RefCell<WaitlistFlow>>, intake: &RecordingIntake) -> Result<(), WaitlistError> {
        let submission = flow.borrow_mut().begin_submit()?;
        let attempt = submission.attempt;
        let flow = flow.clone();
        intake.send(
            submission,
            Box::new(move |outcome| {
                flow.borrow_mut().settle(attempt, outcome);
            }),
        );
        Ok(())
    }

    fn collecting(email: &str) -> WaitlistFlow {
        let mut flow = WaitlistFlow::new("waitlist");
        flow.open();
        flow.set_email(email);
        flow
    }

    #[test]
    fn starts_idle_and_opens_once() {
        let mut flow = WaitlistFlow::new("waitlist");
        assert_eq!(flow.stage(), Stage::Idle);
        assert!(!flow.set_email("a@b.co"), "email is read-only while idle");
        flow.open();
        assert_eq!(flow.stage(), Stage::CollectingEmail);
        flow.open();
        assert_eq!(flow.stage(), Stage::CollectingEmail);
    }

    #[test]
    fn empty_email_never_reaches_the_intake() {
        let flow = Rc::new(RefCell::new(collecting("")));
        let intake = RecordingIntake::default();
        assert_eq!(submit(&flow, &intake), Err(WaitlistError::EmptyEmail));

        flow.borrow_mut().set_email("   ");
        assert_eq!(submit(&flow, &intake), Err(WaitlistError::EmptyEmail));

        assert_eq!(intake.count(), 0);
        assert_eq!(flow.borrow().stage(), Stage::CollectingEmail);
        assert!(flow.borrow().pending().is_none());
        assert!(flow.borrow().last_error().is_some());
    }

    #[test]
    fn submitted_only_after_acknowledgment() {
        let flow = Rc::new(RefCell::new(collecting("ada@example.com")));
        let intake = RecordingIntake::default();
        submit(&flow, &intake).unwrap();

        assert_eq!(intake.count(), 1);
        assert_eq!(flow.borrow().stage(), Stage::CollectingEmail);
        assert!(flow.borrow().is_pending());
        assert!(!flow.borrow_mut().set_email("other@example.com"));

        intake.answer(0, Ok(()));
        assert_eq!(flow.borrow().stage(), Stage::Submitted);
        assert!(!flow.borrow().is_pending());
        assert_eq!(flow.borrow().email(), "ada@example.com");
    }

    #[test]
    fn lost_acknowledgment_leaves_user_collecting() {
        let flow = Rc::new(RefCell::new(collecting("ada@example.com")));
        let intake = RecordingIntake::default();
        submit(&flow, &intake).unwrap();
        assert_eq!(submit(&flow, &intake), Err(WaitlistError::AlreadyPending));
        assert_eq!(intake.count(), 1);
        assert_eq!(flow.borrow().stage(), Stage::CollectingEmail);
    }

    #[test]
    fn failed_intake_allows_manual_resubmit() {
        let flow = Rc::new(RefCell::new(collecting("ada@example.com")));
        let intake = RecordingIntake::default();
        submit(&flow, &intake).unwrap();
        intake.answer(0, Err(IntakeError::Status(500)));

        assert_eq!(flow.borrow().stage(), Stage::CollectingEmail);
        assert_eq!(
            flow.borrow().last_error(),
            Some("Signup form answered with status 500")
        );
        assert!(flow.borrow_mut().set_email("ada@example.org"));

        submit(&flow, &intake).unwrap();
        assert_eq!(intake.sent.borrow()[1].0.attempt, 2);
        assert_eq!(intake.sent.borrow()[1].0.email, "ada@example.org");
        intake.answer(1, Ok(()));
        assert_eq!(flow.borrow().stage(), Stage::Submitted);
        assert_eq!(flow.borrow().last_error(), None);
    }

    #[test]
    fn stale_settlement_is_ignored() {
        let mut flow = collecting("ada@example.com");
        let first = flow.begin_submit().unwrap();
        assert!(flow.settle(first.attempt, Err(IntakeError::Network("offline".into()))));
        let second = flow.begin_submit().unwrap();

        assert!(!flow.settle(first.attempt, Ok(())));
        assert_eq!(flow.stage(), Stage::CollectingEmail);
        assert!(flow.settle(second.attempt, Ok(())));
        assert_eq!(flow.stage(), Stage::Submitted);
    }

    #[test]
    fn submitted_is_terminal() {
        let mut flow = collecting("ada@example.com");
        let sub = flow.begin_submit().unwrap();
        flow.settle(sub.attempt, Ok(()));
        flow.open();
        assert!(!flow.set_email("x@y.z"));
        assert_eq!(flow.begin_submit(), Err(WaitlistError::NotCollecting));
        assert_eq!(flow.stage(), Stage::Submitted);
    }

    #[test]
    fn submit_from_idle_is_rejected() {
        let mut flow = WaitlistFlow::new("waitlist");
        assert_eq!(flow.begin_submit(), Err(WaitlistError::NotCollecting));
    }

    #[test]
    fn submission_trims_and_encodes_email() {
        let mut flow = collecting("  ada+drops@example.com ");
        let sub = flow.begin_submit().unwrap();
        assert_eq!(sub.email, "ada+drops@example.com");
        assert_eq!(
            sub.form_body(),
            "form-name=waitlist&email=ada%2Bdrops%40example.com"
        );
    }

    #[test]
    fn share_url_is_percent_encoded() {
        let config = SiteConfig {
            share_text: "I'm in & waiting".to_string(),
            share_url: "https://thirdspacer.com/?ref=w".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(
            share_intent_url(&config),
            "https://twitter.com/intent/tweet?text=I%27m%20in%20%26%20waiting&url=https%3A%2F%2Fthirdspacer.com%2F%3Fref%3Dw"
        );
    }
}
