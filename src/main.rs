use std::{
    env::{self, VarError},
    process,
};

use anyhow::{Context, bail};
use log::info;

use uart_advisor::{AdvisorConfig, ObservationStore};

const CONFIG_VAR: &str = "ADVISOR_CONFIG";

/// What the user asked a recommendation for.
enum Query {
    Length(f64),
    Baudrate(u32),
}

fn parse_query(flag: &str, value: &str) -> anyhow::Result<Query> {
    match flag {
        "--length" => Ok(Query::Length(
            value
                .parse()
                .with_context(|| format!("invalid length {value:?}"))?,
        )),
        "--baudrate" => Ok(Query::Baudrate(
            value
                .parse()
                .with_context(|| format!("invalid baud rate {value:?}"))?,
        )),
        other => bail!("unknown option {other:?}, expected --length or --baudrate"),
    }
}

/// Loads the config named by `ADVISOR_CONFIG`, or the defaults if it's unset.
fn load_config(var: Result<String, VarError>) -> anyhow::Result<AdvisorConfig> {
    match var {
        Ok(path) => AdvisorConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {path}")),
        Err(VarError::NotPresent) => Ok(AdvisorConfig::default()),
        Err(e) => Err(e).with_context(|| format!("reading {CONFIG_VAR}")),
    }
}

fn run(log_path: &str, query: Query) -> anyhow::Result<()> {
    let config = load_config(env::var(CONFIG_VAR))?;

    let store = ObservationStore::open(log_path)
        .with_context(|| format!("reading transmission log {log_path}"))?;
    let counts = store.counts();
    info!("observations: {} OK, {} ERR", counts.ok, counts.err);

    let trainer = config.trainer()?;
    let training = trainer.fit_split(&store.training_set(), &config.split)?;

    let (length, baudrate) = match query {
        Query::Length(length) => (Some(length), None),
        Query::Baudrate(baudrate) => (None, Some(baudrate)),
    };

    let recommendation = config
        .advisor()
        .recommend(&training.model, length, baudrate)?;

    println!("{}", serde_json::to_string_pretty(&recommendation)?);
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!(
            "Usage: {} <transmission_log.csv> (--length <meters> | --baudrate <bps>)",
            args.first().map_or("uart-advisor", String::as_str)
        );
        process::exit(1);
    }

    let query = match parse_query(&args[2], &args[3]) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&args[1], query) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    #[test]
    fn unset_config_falls_back_to_defaults() {
        let config = load_config(Err(VarError::NotPresent)).unwrap();
        assert_eq!(config, AdvisorConfig::default());
    }

    #[test]
    fn non_unicode_config_path_is_an_error() {
        let raw = OsString::from("advisor.json");
        assert!(load_config(Err(VarError::NotUnicode(raw))).is_err());
    }

    #[test]
    fn query_flags_are_strict() {
        assert!(matches!(parse_query("--length", "2.5"), Ok(Query::Length(l)) if l == 2.5));
        assert!(matches!(parse_query("--baudrate", "9600"), Ok(Query::Baudrate(9600))));
        assert!(parse_query("--baudrate", "fast").is_err());
        assert!(parse_query("--speed", "9600").is_err());
    }
}
