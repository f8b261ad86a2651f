//! Form controller talking to a live relay over HTTP

use contact_relay::client::{
    ContactForm, FormPhase, HttpTransport, Language, NotificationKind, SubmitOutcome,
};
use contact_relay::config::Settings;
use contact_relay::domain::Field;
use contact_relay::Application;
use mockito::{Mock, Server, ServerGuard};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct LiveRelay {
    address: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    server: tokio::task::JoinHandle<contact_relay::Result<()>>,
}

impl LiveRelay {
    async fn start(resend: &ServerGuard) -> Self {
        let base_url = resend.url();
        let mut settings = Settings::with_overrides(&[
            ("email.provider", "resend"),
            ("email.api_base_url", base_url.as_str()),
        ])
        .unwrap();
        settings.email.api_key = Some("re_test_key".to_string());

        let app = Application::from_settings(settings).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        let server = tokio::spawn(app.serve(listener, async move {
            rx.await.ok();
        }));

        Self {
            address,
            shutdown: Some(tx),
            server,
        }
    }

    fn transport(&self) -> HttpTransport {
        HttpTransport::new(
            format!("http://{}/api/send-email", self.address),
            HttpTransport::DEFAULT_TIMEOUT,
        )
        .unwrap()
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
        self.server.await.unwrap().unwrap();
    }
}

async fn mock_resend(server: &mut ServerGuard, expected_calls: usize) -> Mock {
    server
        .mock("POST", "/emails")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"msg_123"}"#)
        .expect(expected_calls)
        .create_async()
        .await
}

fn fill(form: &ContactForm<HttpTransport>) {
    form.set_field(Field::Name, "Jeanne D'Arc");
    form.set_field(Field::Email, "jeanne@example.com");
    form.set_field(Field::Message, "Bonjour, j'aimerais discuter d'un projet.");
}

#[tokio::test]
async fn submission_round_trip() {
    let mut resend = Server::new_async().await;
    let mock = mock_resend(&mut resend, 1).await;
    let relay = LiveRelay::start(&resend).await;

    let form = ContactForm::new(relay.transport()).with_language(Language::En);
    fill(&form);

    let SubmitOutcome::Completed(result) = form.submit().await else {
        panic!("expected the request to reach the relay");
    };

    assert!(result.success);
    assert_eq!(result.provider_message_id.as_deref(), Some("msg_123"));
    assert_eq!(form.phase(), FormPhase::Succeeded);
    assert!(form.field(Field::Name).value.is_empty());
    assert_eq!(form.notification().unwrap().kind, NotificationKind::Success);

    mock.assert_async().await;
    relay.stop().await;
}

#[tokio::test]
async fn rapid_double_submit_reaches_the_relay_once() {
    let mut resend = Server::new_async().await;
    let mock = mock_resend(&mut resend, 1).await;
    let relay = LiveRelay::start(&resend).await;

    let form = ContactForm::new(relay.transport());
    fill(&form);

    let (first, second) = tokio::join!(form.submit(), form.submit());

    assert!(matches!(first, SubmitOutcome::Completed(ref r) if r.success));
    assert_eq!(second, SubmitOutcome::Ignored);
    assert!(!form.is_submitting());

    mock.assert_async().await;
    relay.stop().await;
}

#[tokio::test]
async fn relay_error_message_reaches_the_form() {
    let mut resend = Server::new_async().await;
    let mock = resend
        .mock("POST", "/emails")
        .with_status(500)
        .with_body(r#"{"message":"internal"}"#)
        .create_async()
        .await;
    let relay = LiveRelay::start(&resend).await;

    let form = ContactForm::new(relay.transport());
    fill(&form);

    let SubmitOutcome::Completed(result) = form.submit().await else {
        panic!("expected the request to reach the relay");
    };

    assert!(!result.success);
    assert_eq!(result.user_message, "Failed to send email");
    assert_eq!(form.phase(), FormPhase::Failed);
    assert_eq!(form.field(Field::Email).value, "jeanne@example.com");

    mock.assert_async().await;
    relay.stop().await;
}
