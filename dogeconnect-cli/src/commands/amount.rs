//! Amount command - parse and format DOGE amounts

use anyhow::{Context, Result};
use dogeconnect_lib::{parse_koinu, Koinu};

use crate::ui;

pub fn run(value: &str, from_koinu: bool) -> Result<()> {
    let amount = if from_koinu {
        let raw: i64 = value
            .trim()
            .parse()
            .with_context(|| format!("'{value}' is not a Koinu count"))?;
        Koinu::from_koinu(raw)?
    } else {
        parse_koinu(value).with_context(|| format!("Invalid amount '{value}'"))?
    };

    ui::key_value("DOGE", &amount.to_string());
    ui::key_value("Koinu", &amount.as_koinu().to_string());
    Ok(())
}
