//! Rank box-frame conventions against independently surveyed
//! exterior orientations.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::error;

use oriconv_pipeline::{run_one_sided, write_one_sided_report, OneSidedConfig, PipelineError};

/// Recover the parameter convention of a black-box payload by
/// reconciling its exported six-value parameter groups with externally
/// measured sensor orientations.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Parameter-group file exported by the payload (box frame).
    box_parm_file: PathBuf,

    /// Independent exterior-orientation file (Convention/Distances/Angles
    /// records per sensor).
    ind_eo_file: PathBuf,

    /// Output report file.
    out_file: PathBuf,

    /// Ranked rows to write.
    #[arg(long, default_value_t = 1000)]
    max_rows: usize,
}

fn try_main(args: &Args) -> anyhow::Result<()> {
    let run = run_one_sided(&args.box_parm_file, &args.ind_eo_file)?;

    let out = File::create(&args.out_file)
        .with_context(|| format!("cannot create '{}'", args.out_file.display()))?;
    let config = OneSidedConfig {
        max_rows: args.max_rows,
    };
    let mut writer = BufWriter::new(out);
    write_one_sided_report(&mut writer, &run, &config)
        .with_context(|| format!("cannot write '{}'", args.out_file.display()))?;
    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::TooFewSensors { .. }) => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // covers --help/--version as well as bad invocations
            let _ = err.print();
            return match err.use_stderr() {
                true => ExitCode::from(1),
                false => ExitCode::SUCCESS,
            };
        }
    };

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn too_few_sensors_maps_to_exit_two() {
        let mut box_file = NamedTempFile::new().unwrap();
        writeln!(box_file, "Distances: S1 1. 2. 3.").unwrap();
        writeln!(box_file, "Angles: S1 .1 .2 .3").unwrap();
        box_file.flush().unwrap();

        let mut eo_file = NamedTempFile::new().unwrap();
        writeln!(eo_file, "Convention: S1 +++ 012 +++ 012 012 0").unwrap();
        writeln!(eo_file, "Distances: S1 1. 2. 3.").unwrap();
        writeln!(eo_file, "Angles: S1 .1 .2 .3").unwrap();
        eo_file.flush().unwrap();

        let out = NamedTempFile::new().unwrap();
        let args = Args {
            box_parm_file: box_file.path().to_path_buf(),
            ind_eo_file: eo_file.path().to_path_buf(),
            out_file: out.path().to_path_buf(),
            max_rows: 10,
        };
        let err = try_main(&args).unwrap_err();
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn missing_file_maps_to_exit_one() {
        let out = NamedTempFile::new().unwrap();
        let args = Args {
            box_parm_file: PathBuf::from("/nonexistent/box.txt"),
            ind_eo_file: PathBuf::from("/nonexistent/eo.txt"),
            out_file: out.path().to_path_buf(),
            max_rows: 10,
        };
        let err = try_main(&args).unwrap_err();
        assert_eq!(exit_code_for(&err), 1);
    }
}
