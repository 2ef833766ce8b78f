use chrono::{DateTime, Datelike, Utc};

use crate::http::structs::{ContactSubmission, CourseSelection, RegistrationSubmission};
use crate::templating::TemplateString;

const NOT_PROVIDED: &str = "Not provided";
const NOT_SELECTED: &str = "Not selected";

/// Which form a thank-you acknowledgment responds to; the two share a layout
/// but differ in copy.
#[derive(Clone, Copy, Debug)]
pub enum AcknowledgmentKind {
    Contact,
    Registration,
}

impl AcknowledgmentKind {
    fn lead_in(&self) -> &'static str {
        match self {
            AcknowledgmentKind::Contact => {
                "Thank you for reaching out to <strong style=\"color: #ffffff;\">Monark FX</strong>! \
                 We have successfully received your message and our team will review it shortly."
            }
            AcknowledgmentKind::Registration => {
                "Thank you for registering with <strong style=\"color: #ffffff;\">Monark FX</strong>! \
                 We have successfully received your registration and our team will review it shortly."
            }
        }
    }

    fn follow_up(&self) -> &'static str {
        match self {
            AcknowledgmentKind::Contact => {
                "We understand the importance of your inquiry and will get back to you as soon \
                 as possible, typically within <strong style=\"color: #dc2626;\">24-48 hours</strong>."
            }
            AcknowledgmentKind::Registration => {
                "We will get back to you as soon as possible, typically within \
                 <strong style=\"color: #dc2626;\">24-48 hours</strong>."
            }
        }
    }
}

// Shared dark-theme document for the admin notifications. The site's email
// clients only get inline styles, hence no stylesheet.
const ADMIN_DOCUMENT_TMPL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; background-color: #0a0a0a; color: #ffffff;">
    <table role="presentation" style="width: 100%; border-collapse: collapse; background-color: #0a0a0a;">
        <tr>
            <td style="padding: 40px 20px;">
                <table role="presentation" style="max-width: 600px; margin: 0 auto; background-color: #1a1a1a; border-radius: 12px; border: 1px solid #dc2626; overflow: hidden;">
                    <tr>
                        <td style="background: linear-gradient(135deg, #dc2626 0%, #991b1b 100%); padding: 30px; text-align: center;">
                            <div style="margin-bottom: 15px; text-align: center;">
                                <img src="{logo_url}" alt="Monark FX Logo" width="60" height="60" style="width: 60px; height: 60px; max-width: 60px; display: block; margin: 0 auto; object-fit: contain;" />
                            </div>
                            <h1 style="margin: 0; color: #ffffff; font-size: 28px; font-weight: bold;">{title}</h1>
                            <p style="margin: 10px 0 0 0; color: #ffffff; opacity: 0.9; font-size: 14px;">Monark FX - Trading Education Platform</p>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 40px 30px;">
                            <p style="margin: 0 0 20px 0; color: #e5e5e5; font-size: 16px; line-height: 1.6;">
                                {intro}
                            </p>
                            <div style="background-color: #262626; border-left: 4px solid #dc2626; padding: 20px; border-radius: 8px; margin: 25px 0;">
                                <table role="presentation" style="width: 100%; border-collapse: collapse;">
{rows}
                                </table>
                            </div>
                            <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #404040;">
                                <p style="margin: 0; color: #a3a3a3; font-size: 12px; text-align: center;">
                                    Submitted on {timestamp}
                                </p>
                            </div>
                        </td>
                    </tr>
                    <tr>
                        <td style="background-color: #0f0f0f; padding: 20px 30px; text-align: center; border-top: 1px solid #404040;">
                            <p style="margin: 0; color: #737373; font-size: 12px;">
                                This is an automated email from <a href="https://monarkfx.com" style="color: #dc2626; text-decoration: none;">monarkfx.com</a>
                            </p>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>
"#;

const DETAIL_ROW_TMPL: &str = r#"                                    <tr>
                                        <td style="padding: 8px 0; color: #a3a3a3; font-size: 14px; width: 140px; vertical-align: top;"><strong>{label}:</strong></td>
                                        <td style="padding: 8px 0; color: #ffffff; font-size: 14px; line-height: 1.6;">{value}</td>
                                    </tr>"#;

const THANK_YOU_DOCUMENT_TMPL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Thank You - Monark FX</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; background-color: #0a0a0a; color: #ffffff;">
    <table role="presentation" style="width: 100%; border-collapse: collapse; background-color: #0a0a0a;">
        <tr>
            <td style="padding: 40px 20px;">
                <table role="presentation" style="max-width: 600px; margin: 0 auto; background-color: #1a1a1a; border-radius: 12px; border: 1px solid #dc2626; overflow: hidden;">
                    <tr>
                        <td style="background: linear-gradient(135deg, #dc2626 0%, #991b1b 100%); padding: 40px 30px; text-align: center;">
                            <div style="margin-bottom: 20px; text-align: center;">
                                <img src="{logo_url}" alt="Monark FX Logo" width="80" height="80" style="width: 80px; height: 80px; max-width: 80px; display: block; margin: 0 auto; object-fit: contain;" />
                            </div>
                            <h1 style="margin: 0; color: #ffffff; font-size: 32px; font-weight: bold;">Thank You!</h1>
                            <p style="margin: 15px 0 0 0; color: #ffffff; opacity: 0.9; font-size: 18px;">Monark FX</p>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 40px 30px;">
                            <p style="margin: 0 0 20px 0; color: #e5e5e5; font-size: 18px; line-height: 1.6;">
                                Dear <strong style="color: #dc2626;">{name}</strong>,
                            </p>
                            <p style="margin: 0 0 20px 0; color: #e5e5e5; font-size: 16px; line-height: 1.8;">
                                {lead_in}
                            </p>
                            <div style="background-color: #262626; border-left: 4px solid #dc2626; padding: 20px; border-radius: 8px; margin: 25px 0;">
                                <p style="margin: 0; color: #ffffff; font-size: 15px; line-height: 1.8;">
                                    {follow_up}
                                </p>
                            </div>
                            <p style="margin: 25px 0 0 0; color: #e5e5e5; font-size: 16px; line-height: 1.8;">
                                In the meantime, feel free to explore our trading education resources and join our community of disciplined traders.
                            </p>
                            <div style="margin: 30px 0; text-align: center;">
                                <a href="https://monarkfx.com" style="display: inline-block; background: linear-gradient(135deg, #dc2626 0%, #991b1b 100%); color: #ffffff; text-decoration: none; padding: 14px 32px; border-radius: 8px; font-weight: 600; font-size: 16px;">
                                    Visit Our Website
                                </a>
                            </div>
                        </td>
                    </tr>
                    <tr>
                        <td style="background-color: #0f0f0f; padding: 30px; text-align: center; border-top: 1px solid #404040;">
                            <div style="margin-bottom: 15px; text-align: center;">
                                <img src="{logo_url}" alt="Monark FX Logo" width="50" height="50" style="width: 50px; height: 50px; max-width: 50px; display: block; margin: 0 auto; object-fit: contain;" />
                            </div>
                            <p style="margin: 0 0 10px 0; color: #ffffff; font-size: 16px; font-weight: 600;">Monark FX</p>
                            <p style="margin: 0 0 15px 0; color: #a3a3a3; font-size: 14px; line-height: 1.6;">
                                Professional Trading Education Platform<br>
                                Master the Markets with Discipline &amp; Strategy
                            </p>
                            <div style="margin: 20px 0 0 0; padding-top: 20px; border-top: 1px solid #404040;">
                                <p style="margin: 0 0 8px 0; color: #737373; font-size: 12px;">
                                    <strong>Contact Us:</strong><br>
                                    <a href="mailto:service@monarkfx.com" style="color: #dc2626; text-decoration: none;">service@monarkfx.com</a><br>
                                    <a href="tel:+918750475852" style="color: #dc2626; text-decoration: none;">+91 87504 75852</a> /
                                    <a href="tel:+919220797499" style="color: #dc2626; text-decoration: none;">+91 9220797499</a>
                                </p>
                                <p style="margin: 15px 0 0 0; color: #737373; font-size: 11px;">
                                    &copy; {year} Monark FX. All rights reserved.
                                </p>
                            </div>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>
"#;

fn logo_image_url(site_url: &str) -> String {
    format!("{}/logo.png", site_url.trim_end_matches('/'))
}

fn format_submission_timestamp(submitted_at: DateTime<Utc>) -> String {
    submitted_at
        .format("%A, %B %-d, %Y at %I:%M %p UTC")
        .to_string()
}

fn mailto_link(email: &str) -> String {
    format!(
        "<a href=\"mailto:{email}\" style=\"color: #dc2626; text-decoration: none;\">{email}</a>"
    )
}

fn tel_link(phone: &str) -> String {
    format!("<a href=\"tel:{phone}\" style=\"color: #dc2626; text-decoration: none;\">{phone}</a>")
}

fn detail_rows(rows: &[(&str, Option<String>)], placeholder: &str) -> String {
    let row_tmpl = TemplateString::from(DETAIL_ROW_TMPL);
    rows.iter()
        .map(|(label, value)| {
            row_tmpl.execute(vec![
                ("label", label),
                ("value", value.as_deref().unwrap_or(placeholder)),
            ])
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn render_admin_document(
    title: &str,
    intro: &str,
    rows: &str,
    site_url: &str,
    submitted_at: DateTime<Utc>,
) -> String {
    TemplateString::from(ADMIN_DOCUMENT_TMPL).execute(vec![
        ("title", title),
        ("intro", intro),
        ("rows", rows),
        ("timestamp", &format_submission_timestamp(submitted_at)),
        ("logo_url", &logo_image_url(site_url)),
    ])
}

pub fn render_contact_admin_html(
    submission: &ContactSubmission,
    site_url: &str,
    submitted_at: DateTime<Utc>,
) -> String {
    let mut rows: Vec<(&str, Option<String>)> = vec![
        ("Name", Some(submission.name.clone())),
        ("Email", Some(mailto_link(&submission.email))),
    ];
    if !submission.phone.trim().is_empty() {
        rows.push(("Phone", Some(tel_link(&submission.phone))));
    }
    if let Some(message) = &submission.message {
        rows.push(("Message", Some(message.replace('\n', "<br>"))));
    }

    render_admin_document(
        "New Contact Form Inquiry",
        "You have received a new contact form submission from your website.",
        &detail_rows(&rows, NOT_PROVIDED),
        site_url,
        submitted_at,
    )
}

pub fn render_contact_admin_text(submission: &ContactSubmission) -> String {
    format!(
        "New Contact Form Submission\n\nName: {}\nEmail: {}\nPhone: {}\n\nMessage:\n{}",
        submission.name,
        submission.email,
        if submission.phone.trim().is_empty() {
            NOT_PROVIDED
        } else {
            submission.phone.as_str()
        },
        submission.message.as_deref().unwrap_or("No message provided"),
    )
}

pub fn render_registration_admin_html(
    submission: &RegistrationSubmission,
    site_url: &str,
    submitted_at: DateTime<Utc>,
) -> String {
    let course_value =
        |course: &Option<CourseSelection>| course.map(|c| c.to_str().to_string());

    let detail_fields: Vec<(&str, Option<String>)> = vec![
        ("Full Name", Some(submission.full_name.clone())),
        ("Father's Name", submission.fathers_name.clone()),
        ("Email", Some(mailto_link(&submission.email))),
        ("Mobile Number", Some(tel_link(&submission.mob_number))),
        (
            "Alternate Phone",
            submission.alternate_phone.as_deref().map(tel_link),
        ),
        (
            "Date of Birth",
            submission
                .date_of_birth
                .as_ref()
                .and_then(|dob| dob.formatted()),
        ),
        (
            "Gender",
            submission.gender.map(|g| g.to_str().to_string()),
        ),
        ("Marital Status", submission.marital_status.clone()),
        ("Occupation", submission.occupation.clone()),
        ("Education", submission.education.clone()),
        ("Address", submission.address.clone()),
        ("City", submission.city.clone()),
        ("Zip Code", submission.zip_code.clone()),
        ("Trading Experience", submission.experience.clone()),
        (
            "Years of Experience",
            submission.years_of_experience.clone(),
        ),
        ("Reference", submission.reference.clone()),
    ];
    let course_fields: Vec<(&str, Option<String>)> = vec![
        ("Course IAT", course_value(&submission.course_iat)),
        ("Course ACT", course_value(&submission.course_act)),
    ];

    let rows = format!(
        "{}\n{}",
        detail_rows(&detail_fields, NOT_PROVIDED),
        detail_rows(&course_fields, NOT_SELECTED),
    );

    render_admin_document(
        "New Registration Form Submission",
        "You have received a new registration from your website.",
        &rows,
        site_url,
        submitted_at,
    )
}

pub fn render_registration_admin_text(submission: &RegistrationSubmission) -> String {
    format!(
        "New Registration Form Submission\n\nName: {}\nEmail: {}\nPhone: {}\n\nSee full details in HTML email.",
        submission.full_name, submission.email, submission.mob_number,
    )
}

pub fn render_thank_you_html(
    name: &str,
    site_url: &str,
    submitted_at: DateTime<Utc>,
    kind: AcknowledgmentKind,
) -> String {
    TemplateString::from(THANK_YOU_DOCUMENT_TMPL).execute(vec![
        ("name", name),
        ("lead_in", kind.lead_in()),
        ("follow_up", kind.follow_up()),
        ("logo_url", &logo_image_url(site_url)),
        ("year", &submitted_at.year().to_string()),
    ])
}

pub fn render_thank_you_text(name: &str, kind: AcknowledgmentKind) -> String {
    match kind {
        AcknowledgmentKind::Contact => format!(
            "Dear {name},\n\nThank you for reaching out to Monark FX! We have successfully \
             received your message and our team will review it shortly.\n\nWe understand the \
             importance of your inquiry and will get back to you as soon as possible, typically \
             within 24-48 hours.\n\nBest regards,\nMonark FX Team"
        ),
        AcknowledgmentKind::Registration => format!(
            "Dear {name},\n\nThank you for registering with Monark FX! We have successfully \
             received your registration and our team will review it shortly.\n\nWe will get back \
             to you as soon as possible, typically within 24-48 hours.\n\nBest regards,\n\
             Monark FX Team"
        ),
    }
}
