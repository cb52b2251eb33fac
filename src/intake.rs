//! Form intake backed by Netlify Forms.
//!
//! Submissions are posted as urlencoded form data to the site's own origin;
//! a 2xx response is the acknowledgment that moves the user to the
//! confirmation screen.

use gloo_net::http::Request;
use log::debug;
use third_spacer::waitlist::{IntakeError, Settled};
use third_spacer::{FormIntake, WaitlistSubmission};

pub struct NetlifyIntake {
    endpoint: String,
}

impl NetlifyIntake {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl FormIntake for NetlifyIntake {
    fn send(&self, submission: WaitlistSubmission, on_settled: Settled) {
        let endpoint = self.endpoint.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = post_form(&endpoint, &submission).await;
            on_settled(outcome);
        });
    }
}

async fn post_form(endpoint: &str, submission: &WaitlistSubmission) -> Result<(), IntakeError> {
    debug!("POST {} (form {})", endpoint, submission.form_name);
    let response = Request::post(endpoint)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(submission.form_body())
        .map_err(|e| IntakeError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| IntakeError::Network(e.to_string()))?;

    if response.ok() {
        Ok(())
    } else {
        Err(IntakeError::Status(response.status()))
    }
}
