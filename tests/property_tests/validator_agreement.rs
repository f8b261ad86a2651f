//! The form controller and the relay accept exactly the same submissions

use contact_relay::domain::{ClientId, ContactRequest, ContactSubmission};
use contact_relay::providers::{EmailProvider, OutboxProvider};
use contact_relay::relay::{RateLimiter, RelayConfig, RelayService};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const EMAIL: &str = "jean@example.com";
const MESSAGE: &str = "Bonjour, je suis intéressé par votre profil.";

fn relay() -> RelayService {
    let provider: Arc<dyn EmailProvider> = Arc::new(OutboxProvider::new());
    RelayService::new(
        RelayConfig::default(),
        Arc::new(RateLimiter::new(u32::MAX, Duration::from_secs(60))),
        Some(provider),
    )
}

/// What the controller would put on the wire for these fields
fn client_request(name: &str, email: &str, message: &str) -> (bool, ContactRequest) {
    match ContactSubmission::parse(name, email, message) {
        Ok(submission) => {
            let sanitized = submission.sanitized();
            (
                true,
                ContactRequest::new(sanitized.name, sanitized.email, sanitized.message),
            )
        }
        Err(_) => (false, ContactRequest::new(name, email, message)),
    }
}

fn server_accepts(request: ContactRequest) -> bool {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime
        .block_on(relay().process(request, &ClientId::unknown(), "proptest"))
        .is_ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn names_matching_the_rule_pass_both_sides(name in "[A-Za-zÀ-ÿ '\\-]{2,50}") {
        prop_assume!(name.trim().chars().count() >= 2);

        let (client_ok, request) = client_request(&name, EMAIL, MESSAGE);
        prop_assert!(client_ok);
        prop_assert!(server_accepts(request));
    }

    #[test]
    fn client_and_server_agree_on_names(name in "[A-Za-zÀ-ÿ '\\-0-9@<>_.]{0,60}") {
        let (client_ok, request) = client_request(&name, EMAIL, MESSAGE);
        prop_assert_eq!(client_ok, server_accepts(request));
    }

    #[test]
    fn client_and_server_agree_on_emails(email in "[a-z0-9._%+\\-@ ]{0,20}(\\.[a-z]{0,3})?") {
        let (client_ok, request) = client_request("Jean Dupont", &email, MESSAGE);
        prop_assert_eq!(client_ok, server_accepts(request));
    }

    #[test]
    fn client_and_server_agree_on_messages(message in "[a-zA-Zé ,.!?'\\-]{0,1010}") {
        let (client_ok, request) = client_request("Jean Dupont", EMAIL, &message);
        prop_assert_eq!(client_ok, server_accepts(request));
    }
}
