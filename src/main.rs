use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use gcl::{Arrays, Channel, Channels, Program, Variables};
use log::LevelFilter;

/// gcl runs Guarded Command Language programs and builds their control-flow
/// graphs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Raises the log level; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a program and prints the final memory.
    Run(RunArgs),
    /// Prints the control-flow graph of a program.
    Cfg(CfgArgs),
}

#[derive(Args, Debug)]
struct Source {
    /// Tells gcl to look at a file instead of a program.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    source: Source,

    /// Initial variable, as `NAME=INT`.
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, i64)>,

    /// Initial array, as `NAME=INT,INT,...`.
    #[arg(long = "array", value_parser = parse_array)]
    arrays: Vec<(String, Vec<i64>)>,

    /// Contents of the input channel.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    input: Vec<i64>,
}

#[derive(Args, Debug)]
struct CfgArgs {
    #[command(flatten)]
    source: Source,

    /// Prints the graph in Graphviz DOT format instead of an edge list.
    #[arg(long)]
    dot: bool,
}

fn parse_var(s: &str) -> Result<(String, i64), String> {
    let (name, value) = s.split_once('=')
                         .ok_or_else(|| format!("expected NAME=INT, found '{s}'"))?;
    let value = value.trim()
                     .parse()
                     .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn parse_array(s: &str) -> Result<(String, Vec<i64>), String> {
    let (name, values) = s.split_once('=')
                          .ok_or_else(|| format!("expected NAME=INT,INT,..., found '{s}'"))?;
    let values = values.split(',')
                       .map(str::trim)
                       .filter(|v| !v.is_empty())
                       .map(|v| v.parse().map_err(|e| format!("invalid element '{v}' in '{name}': {e}")))
                       .collect::<Result<Vec<i64>, String>>()?;
    Ok((name.trim().to_string(), values))
}

impl Source {
    fn load(self) -> Result<Program, String> {
        if self.file {
            Program::read_file(&self.contents).map_err(|e| {
                                                  format!("Failed to read the input file '{}': {e}",
                                                          self.contents)
                                              })
        } else {
            Ok(Program::new(self.contents))
        }
    }
}

fn run(args: RunArgs) -> Result<(), String> {
    let program = args.source.load()?;
    let vars: Variables = args.vars.into_iter().collect();
    let arrays: Arrays = args.arrays.into_iter().collect();
    let channels = Channels::from([(Channel::In, args.input)]);

    let memory = program.run(vars, arrays, channels)
                        .map_err(|e| e.to_string())?;
    print!("{memory}");
    Ok(())
}

fn cfg(args: CfgArgs) -> Result<(), String> {
    let program = args.source.load()?;
    let graph = program.build_cfg().map_err(|e| e.to_string())?;

    if args.dot {
        println!("{}", graph.to_dot());
    } else {
        for (from, to, label) in graph.edges() {
            println!("{from} -> {to}: {label}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::builder().filter_module("gcl", level)
                                 .parse_default_env()
                                 .try_init();

    let result = match cli.command {
        Commands::Run(args) => run(args),
        Commands::Cfg(args) => cfg(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
