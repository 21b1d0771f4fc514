use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use huffpack::file::{analyze_file, compress_file, decompress_file, Direction, Report};
use huffpack::{Config, FsStore};

const USAGE: &str = "usage:
  huffpack compress <source> <destination> [--tree <path>]
  huffpack decompress <source> <destination> [--tree <path>]
  huffpack codes <source>";

enum Command {
    Compress(Config),
    Decompress(Config),
    Codes(PathBuf),
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some((cmd, rest)) = args.split_first() else {
        bail!("missing command");
    };

    let mut positional = Vec::new();
    let mut tree = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tree" => {
                let path = iter.next().context("--tree requires a path")?;
                tree = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let config = |positional: Vec<PathBuf>| -> Result<Config> {
        let [source, destination]: [PathBuf; 2] = positional
            .try_into()
            .map_err(|_| anyhow::anyhow!("{cmd} takes <source> <destination>"))?;
        let config = Config::new(source, destination);
        Ok(match tree.clone() {
            Some(tree) => config.with_tree(tree),
            None => config,
        })
    };

    match cmd.as_str() {
        "compress" => Ok(Command::Compress(config(positional)?)),
        "decompress" => Ok(Command::Decompress(config(positional)?)),
        "codes" => {
            if tree.is_some() {
                bail!("codes does not take --tree");
            }
            let [source]: [PathBuf; 1] = positional
                .try_into()
                .map_err(|_| anyhow::anyhow!("codes takes <source>"))?;
            Ok(Command::Codes(source))
        }
        other => bail!("unknown command {other}"),
    }
}

fn print_report(config: &Config, report: &Report) {
    let verb = match report.direction {
        Direction::Compress => "compressed",
        Direction::Decompress => "decompressed",
    };
    println!(
        "{verb} {} ({} bytes) -> {} ({} bytes, tree {} bytes)",
        config.source.display(),
        report.input_bytes,
        config.destination.display(),
        report.output_bytes,
        report.tree_bytes,
    );
    if let Some(ratio) = report.ratio() {
        println!("compressed size: {:.1}% of original", ratio * 100.0);
    }
}

fn print_codes(source: &Path) -> Result<()> {
    let analysis = analyze_file(&FsStore, source)
        .with_context(|| format!("analyzing {}", source.display()))?;

    let mut rows: Vec<_> = analysis.frequencies.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (symbol, count) in rows {
        let code = analysis
            .codes
            .get(symbol)
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("0x{symbol:02x} {count:>10} {code}");
    }
    println!("{} bits total", analysis.encoded_bits);
    Ok(())
}

fn run(command: Command) -> Result<()> {
    let mut store = FsStore;
    match command {
        Command::Compress(config) => {
            let report = compress_file(&mut store, &config).context("compression failed")?;
            print_report(&config, &report);
        }
        Command::Decompress(config) => {
            let report = decompress_file(&mut store, &config).context("decompression failed")?;
            print_report(&config, &report);
        }
        Command::Codes(source) => print_codes(&source)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_compress_with_tree() {
        let command = parse_args(&args(&["compress", "a", "b", "--tree", "t"])).unwrap();
        match command {
            Command::Compress(config) => {
                assert_eq!(config, Config::new("a", "b").with_tree("t"));
            }
            _ => panic!("expected compress"),
        }
    }

    #[test]
    fn test_codes_rejects_tree() {
        let err = parse_args(&args(&["codes", "a", "--tree", "t"])).err().unwrap();
        assert!(err.to_string().contains("--tree"));
        assert!(matches!(parse_args(&args(&["codes", "a"])), Ok(Command::Codes(_))));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["compress", "a"])).is_err());
        assert!(parse_args(&args(&["squash", "a", "b"])).is_err());
        assert!(parse_args(&args(&["decompress", "a", "b", "--fast"])).is_err());
    }
}
