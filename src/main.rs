use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use bst_calc::{CalcError, Repl, ReplOptions};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about = "Set calculator over three integer sets X, Y and Z")]
struct Args {
    /// Read commands from this file instead of standard input.
    #[arg(short, long, value_name = "PATH")]
    script: Option<PathBuf>,
    /// Do not print the command menu on startup.
    #[arg(long)]
    no_menu: bool,
    /// Echo each command line before its output.
    #[arg(short, long)]
    echo: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    log::debug!("{args:?}");

    let mut repl = Repl::new(ReplOptions {
        show_menu: !args.no_menu,
        echo: args.echo,
    });
    let mut out = io::stdout().lock();

    let result = match args.script {
        Some(path) => match File::open(&path) {
            Ok(file) => repl.run(BufReader::new(file), &mut out),
            Err(source) => Err(CalcError::Open { path, source }),
        },
        None => repl.run(io::stdin().lock(), &mut out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("set-calc: {err}");
            ExitCode::FAILURE
        }
    }
}
