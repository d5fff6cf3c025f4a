use std::io::Write;

use crate::exit::CliExitCode;

pub fn run(out: &mut impl Write) -> anyhow::Result<CliExitCode> {
    super::write_json(out, &trellis_tool::descriptor(), true)?;
    Ok(CliExitCode::Success)
}
