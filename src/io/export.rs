//! Export computed responses to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one long-format table with a `series` column.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::ResponseSet;
use crate::error::{AppError, ErrorKind};

/// Write all four response series to a CSV file.
pub fn write_responses_csv(path: &Path, responses: &ResponseSet) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;
    let mut out = BufWriter::new(file);
    write_rows(&mut out, responses)
        .and_then(|()| out.flush())
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to write export CSV: {e}")))
}

fn write_rows(out: &mut impl Write, responses: &ResponseSet) -> std::io::Result<()> {
    writeln!(out, "series,x,y")?;
    for &(t, y) in &responses.impulse {
        writeln!(out, "impulse,{t:.10},{y:.10}")?;
    }
    for &(t, y) in &responses.step {
        writeln!(out, "step,{t:.10},{y:.10}")?;
    }
    for p in &responses.frequency {
        writeln!(out, "magnitude_db,{:.10},{:.10}", p.omega, p.magnitude_db)?;
    }
    for p in &responses.frequency {
        writeln!(out, "phase_deg,{:.10},{:.10}", p.omega, p.phase_deg)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FrequencyPoint;

    #[test]
    fn long_format_rows() {
        let responses = ResponseSet {
            impulse: vec![(0.0, 1.0), (1.0, 0.5)],
            step: vec![(0.0, 0.0), (1.0, 0.5)],
            frequency: vec![FrequencyPoint {
                omega: 0.01,
                magnitude_db: -3.0,
                phase_deg: -45.0,
            }],
        };
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("responses.csv");
        write_responses_csv(&path, &responses).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 2 + 2 + 1 + 1);
        assert_eq!(lines[0], "series,x,y");
        assert_eq!(lines[1], "impulse,0.0000000000,1.0000000000");
        assert!(lines[5].starts_with("magnitude_db,0.0100000000,-3.0000000000"));
        assert!(lines[6].starts_with("phase_deg,"));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope").join("responses.csv");
        let err = write_responses_csv(&path, &ResponseSet {
            impulse: vec![],
            step: vec![],
            frequency: vec![],
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
