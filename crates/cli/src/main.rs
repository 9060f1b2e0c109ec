//! Corate demo CLI
//!
//! `corate SEED USER` — seeds the per-invocation RNG from SEED, replays the
//! demo interaction fixture around USER against an in-memory store, and
//! prints the reranked recommendation list as alternating token / score
//! lines. `--json` emits the same flat sequence as a JSON array.
//!
//! The host-store deployment embeds the library next to the real store;
//! this binary exists to exercise the full request path end to end.

use std::process;
use std::sync::Arc;

use clap::{Arg, ArgAction, Command};

use corate::{Error, EventKind, MemoryStore, Recommender, RecommenderConfig};

fn build_cli() -> Command {
    Command::new("corate")
        .about("Item-based collaborative filtering demo")
        .arg(
            Arg::new("seed")
                .value_name("SEED")
                .help("Decimal RNG seed for the dithering reranker")
                .required(true),
        )
        .arg(
            Arg::new("user")
                .value_name("USER")
                .help("User token to recommend for")
                .required(true),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .value_name("N")
                .help("Maximum list length")
                .default_value("10"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit the flat token/score sequence as JSON")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err)
            if err.kind() == clap::error::ErrorKind::DisplayHelp
                || err.kind() == clap::error::ErrorKind::DisplayVersion =>
        {
            let _ = err.print();
            return;
        }
        Err(_) => {
            eprintln!("{}", Error::InvalidArguments);
            process::exit(2);
        }
    };

    let seed: u64 = match matches.get_one::<String>("seed").unwrap().parse() {
        Ok(seed) => seed,
        Err(_) => {
            eprintln!("{}", Error::InvalidArguments);
            process::exit(2);
        }
    };
    let user = matches.get_one::<String>("user").unwrap();
    let limit: usize = match matches.get_one::<String>("limit").unwrap().parse() {
        Ok(limit) => limit,
        Err(_) => {
            eprintln!("{}", Error::InvalidArguments);
            process::exit(2);
        }
    };

    match run(seed, user, limit, matches.get_flag("json")) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn run(seed: u64, user: &str, limit: usize, json: bool) -> corate::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let recommender = Recommender::new(RecommenderConfig::default(), store)?;
    seed_demo(&recommender, user)?;

    let pairs = recommender.recommend(user, limit, seed)?;
    if json {
        let flat: Vec<String> = pairs
            .iter()
            .flat_map(|(token, score)| [token.clone(), score.to_string()])
            .collect();
        println!("{}", serde_json::to_string(&flat).unwrap_or_default());
    } else {
        for (token, score) in &pairs {
            println!("{token}");
            println!("{score}");
        }
    }
    Ok(())
}

/// Fixture interactions: the requested user browses two titles and buys
/// one; two fixture users supply the co-occurrence that links the catalog.
fn seed_demo(recommender: &Recommender, user: &str) -> corate::Result<()> {
    let events: [(&str, &str, EventKind); 9] = [
        (user, "solaris", EventKind::Click),
        (user, "dune", EventKind::Click),
        (user, "dune", EventKind::Purchase),
        ("casey", "solaris", EventKind::Click),
        ("casey", "hyperion", EventKind::Click),
        ("casey", "dune", EventKind::Click),
        ("morgan", "hyperion", EventKind::Click),
        ("morgan", "neuromancer", EventKind::Click),
        ("morgan", "solaris", EventKind::AddToCart),
    ];
    for (who, item, kind) in events {
        recommender.record(who, item, kind, None)?;
    }
    // The user has already seen everything once.
    for item in ["solaris", "dune", "hyperion", "neuromancer"] {
        recommender.record(user, item, EventKind::Impression, None)?;
    }
    Ok(())
}
