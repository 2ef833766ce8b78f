use std::path::Path;

use monarkfx_api::email::backend::{EmailBackend, EmailEntry, FileBackend, OutboundEmail};
use monarkfx_api::server::config::MonarkConfigEmailFile;

fn parse_email_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<EmailEntry>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let mut emails = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if !line.is_empty() {
            emails.push(serde_json::from_str(line)?);
        }
    }

    Ok(emails)
}

fn outbound(to: &str, subject: &str) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: subject.to_string(),
        text: "Dear Asha,\nThank you for reaching out to Monark FX!".to_string(),
        html: "<html><body>Thank you</body></html>".to_string(),
    }
}

#[actix_web::test]
async fn file_backend_appends_parseable_entries() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    let backend = FileBackend::new(MonarkConfigEmailFile {
        path: temp_file.path().to_string_lossy().to_string(),
    });

    let first_id = backend
        .send(
            "\"Monark FX\" <noreply@monarkfx.com>",
            &outbound("service@monarkfx.com", "New Contact Form Inquiry from Asha - Monark FX"),
        )
        .await
        .unwrap();
    assert!(first_id.starts_with("file-"));

    backend
        .send(
            "\"Monark FX\" <noreply@monarkfx.com>",
            &outbound(
                "asha@example.com",
                "Thank You for Contacting Monark FX - We Received Your Message",
            ),
        )
        .await
        .unwrap();

    let emails = parse_email_file(temp_file.path()).unwrap();
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[0].from, "\"Monark FX\" <noreply@monarkfx.com>");
    assert_eq!(emails[0].to, "service@monarkfx.com");
    assert_eq!(emails[1].to, "asha@example.com");
    assert_eq!(
        emails[1].subject,
        "Thank You for Contacting Monark FX - We Received Your Message"
    );
    assert_eq!(
        emails[0].text,
        vec![
            "Dear Asha,".to_string(),
            "Thank you for reaching out to Monark FX!".to_string(),
        ]
    );
    assert!(emails[0].html.contains("Thank you"));
}
