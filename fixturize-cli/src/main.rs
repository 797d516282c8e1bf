use std::io::Write;

use clap::Parser;
use fixturize::pipeline::{convert_files, run};
use fixturize::{SerializeOptions, validate_namespace};
use miette::{IntoDiagnostic, WrapErr};

mod cli;
mod logging;

use cli::{Cli, Command, ConvertArgs, RunArgs};

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.into_command() {
        Command::Run(args) => run_dir(args),
        Command::Convert(args) => convert(args),
    }
}

fn run_dir(args: RunArgs) -> miette::Result<()> {
    let config = args.into_config();
    tracing::debug!(?config, "starting run");

    let report = run(&config)?;
    tracing::info!(
        written = report.written.len(),
        skipped = report.unpaired.len(),
        "fixtures written to {}",
        config.output_dir()
    );
    Ok(())
}

fn convert(args: ConvertArgs) -> miette::Result<()> {
    validate_namespace(&args.format.namespace)?;

    let options = SerializeOptions::new();
    let options = if args.format.pretty {
        options.pretty()
    } else {
        options
    };
    let bytes = convert_files(&args.schema, &args.data, &args.format.namespace, &options)?;

    match args.output {
        Some(path) => {
            fs_err::write(path.as_std_path(), &bytes).into_diagnostic()?;
            tracing::info!("done converting {} into {path}", args.data);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|()| stdout.write_all(b"\n"))
                .and_then(|()| stdout.flush())
                .into_diagnostic()
                .wrap_err("failed to write fixture to stdout")?;
        }
    }
    Ok(())
}
