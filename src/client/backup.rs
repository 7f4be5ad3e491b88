use serde::Serialize;

use super::fetch::Fetch;
use crate::error::AccountError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupEmailRequest<'a> {
    email: &'a str,
    encrypted_portal_key: &'a str,
}

/// Ask the backup service to email the encrypted keychain
pub async fn send_backup_email<F: Fetch + ?Sized>(
    fetch: &F,
    url: &str,
    email: &str,
    encrypted_portal_key: &str,
) -> Result<(), AccountError> {
    let body = serde_json::to_value(BackupEmailRequest {
        email,
        encrypted_portal_key,
    })?;
    fetch.post_json(url, None, &body).await?.error_for_status()?;
    Ok(())
}
