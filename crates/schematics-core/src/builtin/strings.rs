//! String shape validators

use anyhow::{bail, Result};
use serde_json::Value;

use crate::schema::Attributes;

pub fn is_string(value: &Value, _attributes: &Attributes) -> Result<()> {
    if value.is_string() {
        Ok(())
    } else {
        bail!("value is not a string")
    }
}
