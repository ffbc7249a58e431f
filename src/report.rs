// src/report.rs

//! Report emitter.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::errors::Result;
use crate::types::Report;

/// Write the report as a JSON array indented by four spaces, plus a trailing
/// newline.
pub fn emit_report<W: Write>(mut writer: W, report: &Report) -> Result<()> {
    {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut writer, formatter);
        report.serialize(&mut ser)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Order the report by profile name.
pub fn sort_report(report: &mut Report) {
    report.sort_by(|a, b| a.target.cmp(&b.target));
}
