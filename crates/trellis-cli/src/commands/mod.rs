pub mod describe;
pub mod import;
pub mod query;
pub mod serve;

use std::io::Write;

use serde_json::Value;

pub(crate) fn write_json(out: &mut impl Write, value: &Value, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        value.to_string()
    };
    writeln!(out, "{text}")?;
    Ok(())
}
