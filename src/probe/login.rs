use crate::config::{Credentials, FormSelectors};
use crate::{Error, Result};
use eoka::Page;
use tracing::{debug, info};

/// How long to wait for each form control to appear before concluding the
/// site markup changed.
const ELEMENT_WAIT_MS: u64 = 5_000;

/// Fill the username and password fields and trigger submission.
///
/// A missing control maps to [`Error::ElementNotFound`]: the form never had a
/// chance to be evaluated, which is a different failure from a slow login and
/// is reported as such.
pub async fn submit(page: &Page, form: &FormSelectors, credentials: &Credentials) -> Result<()> {
    for selector in [
        &form.username_field,
        &form.password_field,
        &form.submit_button,
    ] {
        debug!("Waiting for form control: {}", selector);
        page.wait_for(selector, ELEMENT_WAIT_MS)
            .await
            .map_err(|_| Error::ElementNotFound(selector.clone()))?;
    }

    page.fill(&form.username_field, &credentials.username)
        .await?;
    page.fill(&form.password_field, &credentials.password)
        .await?;
    info!("Submitting login form");
    page.click(&form.submit_button).await?;
    Ok(())
}
