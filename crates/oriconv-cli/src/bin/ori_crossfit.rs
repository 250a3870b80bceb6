//! Search the full box-by-independent convention cross product over
//! two parameter-group files.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use oriconv_pipeline::{run_cross, write_cross_report, CrossConfig, PipelineError};

/// Find the pair of parameter conventions (payload side and
/// independent side) that makes both six-value exports describe the
/// same sensor geometry.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Parameter-group file exported by the payload (box frame).
    box_parm_file: PathBuf,

    /// Parameter-group file of the independent survey.
    ind_parm_file: PathBuf,

    /// Output report file.
    out_file: PathBuf,

    /// Search all 48 independent offset conventions. The result vector
    /// grows by the same factor; expect tens of GiB.
    #[arg(long)]
    full_ind_offsets: bool,

    /// Ranked rows to write.
    #[arg(long, default_value_t = 1000)]
    max_rows: usize,
}

fn try_main(args: &Args) -> anyhow::Result<()> {
    let config = CrossConfig {
        full_ind_offsets: args.full_ind_offsets,
        max_rows: args.max_rows,
    };
    let run = run_cross(&args.box_parm_file, &args.ind_parm_file, &config)?;
    info!(
        "scored {} pairings over {} sensors in {:.3} s",
        run.scores.len(),
        run.sensor_count,
        run.elapsed.as_secs_f64()
    );

    let out = File::create(&args.out_file)
        .with_context(|| format!("cannot create '{}'", args.out_file.display()))?;
    let mut writer = BufWriter::new(out);
    write_cross_report(&mut writer, &run, &config)
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
