//! Command-line arguments.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use fixturize::{Config, DEFAULT_NAMESPACE, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR};

#[derive(Parser, Debug)]
#[command(name = "fixturize", version, about = "Convert table exports into Django XML fixtures")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Arguments for the implicit `run` when no subcommand is given.
    #[command(flatten)]
    pub run: RunArgs,

    /// More log output (-v debug, -vv trace). `RUST_LOG` overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// The subcommand to execute, falling back to `run`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Run(self.run))
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Convert every `<table>.csv` / `<table>.xml` pair in a directory.
    Run(RunArgs),

    /// Convert a single schema file and data file.
    Convert(ConvertArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Directory holding the table pairs.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub source: Utf8PathBuf,

    /// Directory to write fixtures to; created if missing.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: Utf8PathBuf,

    #[command(flatten)]
    pub format: FormatArgs,
}

impl RunArgs {
    pub fn into_config(self) -> Config {
        Config::default()
            .with_source_dir(self.source)
            .with_output_dir(self.output)
            .with_namespace(self.format.namespace)
            .with_pretty(self.format.pretty)
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConvertArgs {
    /// CSV schema descriptor.
    #[arg(value_name = "SCHEMA")]
    pub schema: Utf8PathBuf,

    /// XML data export.
    #[arg(value_name = "DATA")]
    pub data: Utf8PathBuf,

    /// Write the fixture here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub format: FormatArgs,
}

/// Options shared by both subcommands.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct FormatArgs {
    /// Django app label prefixed to every model name.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Indent the generated XML.
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fixturize").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_runs_with_defaults() {
        let Command::Run(args) = parse(&[]).into_command() else {
            panic!("expected run");
        };
        let config = args.into_config();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn top_level_flags_feed_the_implicit_run() {
        let cli = parse(&["--source", "in", "--namespace", "qa", "--pretty", "-vv"]);
        assert_eq!(cli.verbose, 2);

        let Command::Run(args) = cli.into_command() else {
            panic!("expected run");
        };
        assert_eq!(args.source.as_str(), "in");
        assert_eq!(args.output.as_str(), DEFAULT_OUTPUT_DIR);
        assert_eq!(args.format.namespace, "qa");
        assert!(args.format.pretty);
    }

    #[test]
    fn explicit_run_subcommand() {
        let cli = parse(&["run", "--output", "fixtures"]);
        let Command::Run(args) = cli.into_command() else {
            panic!("expected run");
        };
        assert_eq!(args.output.as_str(), "fixtures");
    }

    #[test]
    fn convert_takes_two_positionals() {
        let cli = parse(&["convert", "-v", "Tags.csv", "Tags.xml", "-o", "out.xml"]);
        assert_eq!(cli.verbose, 1);

        let Command::Convert(args) = cli.into_command() else {
            panic!("expected convert");
        };
        assert_eq!(args.schema.as_str(), "Tags.csv");
        assert_eq!(args.data.as_str(), "Tags.xml");
        assert_eq!(args.output.as_ref().map(|p| p.as_str()), Some("out.xml"));
        assert_eq!(args.format.namespace, DEFAULT_NAMESPACE);
    }

    #[test]
    fn convert_requires_the_data_file() {
        let err = Cli::try_parse_from(["fixturize", "convert", "Tags.csv"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
