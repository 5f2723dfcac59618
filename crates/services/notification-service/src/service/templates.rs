//! HTML email templates.
//!
//! Every caller-supplied value goes through [`escape_html`] before it is
//! placed in markup.

use chrono::{DateTime, Utc};

const DEFAULT_STATUS_COLOR: &str = "#6c757d";

/// Escape text for an HTML body or a double-quoted attribute.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped text with line breaks kept.
fn escape_multiline(raw: &str) -> String {
    escape_html(raw).replace("\r\n", "\n").replace('\n', "<br>")
}

/// Badge colour for a demande status code.
pub fn status_color(status: &str) -> &'static str {
    match status.trim().to_ascii_uppercase().as_str() {
        "APPROVED" => "#28a745",
        "REJECTED" => "#dc3545",
        "IN_REVIEW" => "#ffc107",
        _ => DEFAULT_STATUS_COLOR,
    }
}

/// Only absolute http(s) links are placed in emails.
pub fn is_web_link(link: &str) -> bool {
    let link = link.trim().to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| link.len() > scheme.len() && link.starts_with(scheme))
}

fn link_button(link: Option<&str>, label: &str, color: &str) -> String {
    match link.map(str::trim).filter(|l| is_web_link(l)) {
        Some(href) => format!(
            r#"<p><a href="{}" style="background-color: {}; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px;">{}</a></p>"#,
            escape_html(href),
            color,
            label
        ),
        None => String::new(),
    }
}

pub fn contact_email(full_name: &str, email: &str, subject: &str, message: &str) -> String {
    format!(
        r#"<html>
<body>
    <h2>New Contact Form Submission</h2>
    <p><strong>From:</strong> {} ({})</p>
    <p><strong>Subject:</strong> {}</p>
    <p><strong>Message:</strong></p>
    <div style="background-color: #f5f5f5; padding: 15px; border-left: 4px solid #007bff;">
        {}
    </div>
    <p><em>This email was sent from the foundation contact form.</em></p>
</body>
</html>"#,
        escape_html(full_name),
        escape_html(email),
        escape_html(subject),
        escape_multiline(message)
    )
}

pub fn demande_status_email(
    user_name: &str,
    demande_id: i64,
    prestation_title: &str,
    status: &str,
    admin_comment: Option<&str>,
) -> String {
    let comment = admin_comment
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("<p><strong>Comment:</strong> {}</p>", escape_multiline(c)))
        .unwrap_or_default();

    format!(
        r#"<html>
<body>
    <h2>Your demande status has been updated</h2>
    <p>Hello {},</p>
    <p><strong>Demande:</strong> #{}</p>
    <p><strong>Prestation:</strong> {}</p>
    <p><strong>New Status:</strong> <span style="background-color: {}; color: white; padding: 3px 8px; border-radius: 4px; font-weight: bold;">{}</span></p>
    {}
    <p>You can view the details of your demande in your account dashboard.</p>
    <p><em>Thank you for using our services.</em></p>
</body>
</html>"#,
        escape_html(user_name),
        demande_id,
        escape_html(prestation_title),
        status_color(status),
        escape_html(status),
        comment
    )
}

pub fn news_published_email(title: &str, summary: Option<&str>, link: Option<&str>) -> String {
    let summary = summary
        .map(|s| format!("<p>{}</p>", escape_multiline(s)))
        .unwrap_or_default();

    format!(
        r#"<html>
<body>
    <h2>New Article Published</h2>
    <p>A new article has been published on our website:</p>
    <h3>{}</h3>
    {}
    {}
    <p><em>Stay updated with our latest news and announcements.</em></p>
</body>
</html>"#,
        escape_html(title),
        summary,
        link_button(link, "Read Article", "#007bff")
    )
}

pub fn event_published_email(
    title: &str,
    start_date: DateTime<Utc>,
    location: Option<&str>,
    link: Option<&str>,
) -> String {
    let location = location
        .map(|l| format!("<p><strong>Location:</strong> {}</p>", escape_html(l)))
        .unwrap_or_default();

    format!(
        r#"<html>
<body>
    <h2>New Event Announced</h2>
    <p>A new event has been announced:</p>
    <h3>{}</h3>
    <p><strong>Date:</strong> {}</p>
    {}
    {}
    <p><em>Don't miss out on this event!</em></p>
</body>
</html>"#,
        escape_html(title),
        start_date.format("%Y-%m-%d %H:%M UTC"),
        location,
        link_button(link, "View Event Details", "#28a745")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color("APPROVED"), "#28a745");
        assert_eq!(status_color("rejected"), "#dc3545");
        assert_eq!(status_color("IN_REVIEW"), "#ffc107");
        assert_eq!(status_color("PAID"), "#6c757d");
    }

    #[test]
    fn test_contact_email_escapes_message() {
        let html = contact_email("Jean <b>", "jean@example.com", "Hi", "line 1\n<i>line 2</i>");
        assert!(html.contains("Jean &lt;b&gt; (jean@example.com)"));
        assert!(html.contains("line 1<br>&lt;i&gt;line 2&lt;/i&gt;"));
        assert!(!html.contains("<i>"));
    }

    #[test]
    fn test_demande_status_email_omits_blank_comment() {
        let html = demande_status_email("Awa", 12, "Aide", "APPROVED", Some("  "));
        assert!(html.contains("#28a745"));
        assert!(html.contains("#12"));
        assert!(!html.contains("Comment:"));
    }

    #[test]
    fn test_event_email_without_link() {
        let start = Utc.with_ymd_and_hms(2025, 6, 14, 9, 30, 0).unwrap();
        let html = event_published_email("Gala", start, Some("Dakar"), None);
        assert!(html.contains("2025-06-14 09:30 UTC"));
        assert!(html.contains("Dakar"));
        assert!(!html.contains("<a href"));
    }

    #[test]
    fn test_link_is_escaped_in_attribute() {
        let html = news_published_email("Title", None, Some(r#"https://x.org/?a=1&b="2""#));
        assert!(html.contains(r#"href="https://x.org/?a=1&amp;b=&quot;2&quot;""#));
    }

    #[test]
    fn test_non_web_links_are_dropped() {
        let unsafe_links = [
            "javascript:alert(1)",
            " JavaScript:alert(1)",
            "data:text/html,x",
            "//evil.org",
            "https://",
        ];
        for link in unsafe_links {
            let html = news_published_email("Title", None, Some(link));
            assert!(!html.contains("<a href"), "{} was linked", link);
        }
        assert!(is_web_link("HTTPS://foundation.org/news/1"));
        assert!(is_web_link("http://foundation.org"));
    }
}
