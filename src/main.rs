use geo_flatten::{check_stream, flatten_stream, unflatten_stream, Format};
use log::LevelFilter;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "geo_flatten")]
/// Flattens GeoJSON feature geometries into token sequences and back
struct Opt {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[structopt(short, long, parse(from_occurrences), global = true)]
    verbose: u8,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Flatten the geometries of GeoJSON features
    Flatten {
        /// GeoJSON input, stdin if omitted
        #[structopt(parse(from_os_str))]
        input: Option<PathBuf>,
        /// Write one feature per line instead of a FeatureCollection
        #[structopt(long)]
        json_lines: bool,
    },
    /// Restore flattened features to GeoJSON
    Unflatten {
        /// Flattened input, stdin if omitted
        #[structopt(parse(from_os_str))]
        input: Option<PathBuf>,
        /// Write one feature per line instead of a FeatureCollection
        #[structopt(long)]
        json_lines: bool,
    },
    /// Check that every feature survives a flatten/unflatten round trip
    Check {
        /// GeoJSON input, stdin if omitted
        #[structopt(parse(from_os_str))]
        input: Option<PathBuf>,
    },
}

fn open(input: &Option<PathBuf>) -> io::Result<Box<dyn Read>> {
    match input {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(io::stdin())),
    }
}

fn format(json_lines: bool) -> Format {
    if json_lines {
        Format::JsonLines
    } else {
        Format::GeoJson
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    init_logger(opt.verbose);

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match opt.cmd {
        Command::Flatten { input, json_lines } => {
            flatten_stream(open(&input)?, &mut writer, format(json_lines))?
        }
        Command::Unflatten { input, json_lines } => {
            unflatten_stream(open(&input)?, &mut writer, format(json_lines))?
        }
        Command::Check { input } => {
            if !check_stream(open(&input)?, &mut writer)? {
                process::exit(1);
            }
        }
    }
    Ok(())
}
