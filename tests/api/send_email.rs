use crate::helpers::{alice, greeting, spawn_failing_mailer, spawn_mailer};
use claim::{assert_err, assert_ok};
use smtp_mailer::domain::SendRequest;
use smtp_mailer::email::Email;
use smtp_mailer::error::ErrorCode;
use std::sync::Arc;

#[tokio::test]
async fn a_successful_send_transmits_exactly_once() {
    // arrange
    let mailer = spawn_mailer();

    // act
    let result = mailer.send(&greeting()).await;

    // assert
    assert_ok!(result);
    assert_eq!(mailer.transport().attempts(), 1);
    let emails = mailer.transport().sent_emails.lock().unwrap();
    assert_eq!(
        emails.len(),
        1,
        "Expected 1 email, {} were sent",
        emails.len()
    );
    assert_eq!(emails[0].headers().get_raw("Subject"), Some("Hello"));
}

#[tokio::test]
async fn transport_errors_surface_as_send_email_failed() {
    // arrange
    let mailer = spawn_failing_mailer("454 4.7.0 relay temporarily unavailable");

    // act
    let error = mailer.send(&greeting()).await.unwrap_err();

    // assert
    assert_eq!(error.code(), ErrorCode::SendEmailFailed);
    assert!(
        error
            .to_string()
            .contains("454 4.7.0 relay temporarily unavailable"),
        "Unexpected message: {}",
        error
    );
    assert_eq!(mailer.transport().attempts(), 1);
    assert!(mailer.transport().sent_emails.lock().unwrap().is_empty());
}

#[tokio::test]
async fn a_missing_attachment_fails_without_transmitting() {
    // arrange
    let mailer = spawn_mailer();
    let request = SendRequest::builder(alice())
        .to("bob@example.com")
        .subject("Report")
        .attachment("/no/such/dir/report.pdf")
        .build();

    // act
    let error = mailer.send(&request).await.unwrap_err();

    // assert
    assert_eq!(error.code(), ErrorCode::SendEmailFailed);
    assert!(error.to_string().contains("/no/such/dir/report.pdf"));
    assert_eq!(mailer.transport().attempts(), 0);
}

#[tokio::test]
async fn a_request_without_recipients_is_never_transmitted() {
    // arrange
    let mailer = spawn_mailer();
    let request = SendRequest::builder(alice()).subject("Nobody").build();

    // act
    let result = mailer.send(&request).await;

    // assert
    assert_err!(result);
    assert_eq!(mailer.transport().attempts(), 0);
}

#[tokio::test]
async fn extra_headers_reach_the_transport() {
    // arrange
    let mailer = spawn_mailer();
    let mut request = greeting();
    request
        .headers
        .insert("X-Priority".to_string(), "1".to_string());
    request
        .headers
        .insert("Subject".to_string(), "Overridden".to_string());

    // act
    assert_ok!(mailer.send(&request).await);

    // assert
    let emails = mailer.transport().sent_emails.lock().unwrap();
    let headers = emails[0].headers();
    assert_eq!(headers.get_raw("X-Priority"), Some("1"));
    assert_eq!(headers.get_raw("Subject"), Some("Overridden"));
}

#[tokio::test]
async fn concurrent_sends_do_not_mix_content() {
    // arrange
    let mailer = Arc::new(spawn_mailer());
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let mailer = mailer.clone();
            tokio::spawn(async move {
                let request = SendRequest::builder(alice())
                    .to(format!("user{}@example.com", i))
                    .subject(format!("Message {}", i))
                    .text(format!("Body {}", i))
                    .build();
                mailer.send(&request).await
            })
        })
        .collect();

    // act
    for handle in handles {
        assert_ok!(handle.await.unwrap());
    }

    // assert
    let emails = mailer.transport().sent_emails.lock().unwrap();
    assert_eq!(emails.len(), 16);
    for email in emails.iter() {
        let subject = email.headers().get_raw("Subject").unwrap();
        let i = subject.trim_start_matches("Message ");
        let recipients = email.envelope().to();
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].to_string(), format!("user{}@example.com", i));
        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains(&format!("Body {}", i)));
    }
}

#[tokio::test]
async fn the_mailer_can_be_injected_as_a_trait_object() {
    // arrange
    let email_client: Arc<dyn Email> = Arc::new(spawn_mailer());

    // act
    let result = email_client.send_email(&greeting()).await;

    // assert
    assert_ok!(result);
}
