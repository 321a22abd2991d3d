//! URL shape and liveness validators
//!
//! `status_code_check` issues a blocking HEAD request. Validators run inside
//! blocking tasks on the engine's fan-out pool, so a synchronous HTTP client
//! is legal here; the per-request timeout keeps a dead host from stalling a
//! whole validation call.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use url::Url;

use crate::schema::Attributes;

const DEFAULT_TIMEOUT_SECS: f64 = 5.0;
const DEFAULT_STATUS_CODE: u16 = 200;

pub fn is_url(value: &Value, _attributes: &Attributes) -> Result<()> {
    let Some(candidate) = value.as_str() else {
        bail!("value is not a string");
    };
    match Url::parse(candidate) {
        Ok(_) => Ok(()),
        Err(_) => bail!("this is not a valid url"),
    }
}

pub fn status_code_check(value: &Value, attributes: &Attributes) -> Result<()> {
    let Some(candidate) = value.as_str() else {
        bail!("value is not a string");
    };
    let target = Url::parse(candidate).map_err(|_| anyhow::anyhow!("this is not a valid url"))?;

    let timeout = attributes
        .get("timeout")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let expected = attributes
        .get("status_code")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .unwrap_or(DEFAULT_STATUS_CODE);

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs_f64(timeout))
        .build()
        .context("failed to build http client")?;
    let response = client
        .head(target)
        .send()
        .with_context(|| format!("request to {candidate} failed"))?;

    let status = response.status().as_u16();
    if status != expected {
        bail!("expected status code {expected} but got {status}");
    }
    Ok(())
}
