//! SOFiSTiK SOFILOAD (Teddy) output for settlement load cases
//!
//! Each load case becomes one `.dat` block of type `SL` with a
//! `POIN NODE ... TYPE WZZ` directive per node. Undefined values are written
//! as comment lines so no NaN ever reaches the structural model.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::loadcase::LoadCaseSpec;
use crate::points::NodeId;

/// Write the SOFILOAD block of one load case
pub fn write_teddy<W: Write>(
    writer: &mut W,
    spec: &LoadCaseSpec,
    values: &[(NodeId, Option<f64>)],
) -> Result<()> {
    let id = spec.id();
    let title = spec.title();

    writeln!(writer, "+PROG SOFILOAD  $ settlement LC{id}")?;
    writeln!(writer, "HEAD Settlement interpolation for LC{id} - {title}")?;
    writeln!(writer, "UNIT TYPE 5")?;
    writeln!(writer)?;
    writeln!(writer, "LC {id} type 'SL' fact 1.0 facd 0.0 titl '{title}'")?;

    for (node, value) in values {
        match value {
            Some(v) => writeln!(writer, "  POIN NODE {node} WIDE 0 TYPE WZZ {v}")?,
            None => writeln!(writer, "$ POIN NODE {node} undefined (outside known region)")?,
        }
    }
    writeln!(writer, "END")?;
    Ok(())
}

/// File name used for a load case: `settlement_LC{id}.dat`
pub fn teddy_file_name(spec: &LoadCaseSpec) -> String {
    format!("settlement_LC{}.dat", spec.id())
}

/// Write `settlement_LC{id}.dat` into `dir` and return its path
pub fn write_teddy_file<P: AsRef<Path>>(
    dir: P,
    spec: &LoadCaseSpec,
    values: &[(NodeId, Option<f64>)],
) -> Result<PathBuf> {
    let path = dir.as_ref().join(teddy_file_name(spec));
    let mut writer = BufWriter::new(File::create(&path)?);
    write_teddy(&mut writer, spec, values)?;
    writer.flush()?;
    Ok(path)
}
