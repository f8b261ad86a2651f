//! HTML body of the relayed e-mail

use crate::domain::SanitizedSubmission;
use chrono::{DateTime, Utc};

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f5f5f5; }
.container { max-width: 600px; margin: 20px auto; background: white; border-radius: 12px; overflow: hidden; }
.header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px 20px; text-align: center; }
.header h1 { margin: 0; font-size: 24px; }
.content { padding: 30px 20px; }
.field { margin-bottom: 20px; }
.label { font-weight: 600; color: #555; margin-bottom: 8px; display: block; }
.value { background: #f8f9fa; padding: 15px; border-left: 4px solid #667eea; border-radius: 4px; word-wrap: break-word; }
.message { white-space: pre-wrap; }
.footer { text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; color: #666; font-size: 14px; }";

/// Render the notification e-mail
///
/// Every interpolated value must already be sanitized; the template adds no
/// escaping of its own.
pub fn render_email(submission: &SanitizedSubmission, received_at: DateTime<Utc>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Nouveau message de contact</title>
<style>
{STYLE}
</style>
</head>
<body>
<div class="container">
<div class="header"><h1>Nouveau message de contact</h1></div>
<div class="content">
<div class="field"><span class="label">Nom :</span><div class="value">{name}</div></div>
<div class="field"><span class="label">Email :</span><div class="value">{email}</div></div>
<div class="field"><span class="label">Message :</span><div class="value message">{message}</div></div>
<div class="footer">
<p>Envoyé depuis le formulaire de contact du portfolio</p>
<p>Date : {date}</p>
</div>
</div>
</div>
</body>
</html>
"#,
        name = submission.name,
        email = submission.email,
        message = submission.message,
        date = received_at.format("%d/%m/%Y %H:%M:%S UTC"),
    )
}
