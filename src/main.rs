mod accounts;
mod campaigns;
mod cli;
mod config;
mod error;
mod journal;
mod model;
mod session;
mod store;
mod validation;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crowdfund", about = "Console manager for crowdfunding campaigns")]
pub struct Args {
    #[arg(long, env = "CROWDFUND_DB", help = "Data file (overrides config)")]
    pub db: Option<PathBuf>,

    #[arg(long, help = "Config file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Session journals directory")]
    pub journal_dir: Option<PathBuf>,

    #[arg(long, help = "Do not write a session journal")]
    pub no_journal: bool,

    #[arg(long, help = "Debug output (print resolved settings)")]
    pub debug: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut cfg = if let Some(config_path) = &args.config {
        config::Config::load_from(config_path)?
    } else {
        config::Config::load()?
    };

    // CLI flags win over every config layer
    if let Some(db) = &args.db {
        cfg.storage.path = Some(db.clone());
    }
    if let Some(dir) = &args.journal_dir {
        cfg.journal.dir = Some(dir.clone());
    }
    if args.no_journal {
        cfg.journal.enabled = Some(false);
    }

    if let Err(errors) = cfg.validate() {
        for err in &errors {
            eprintln!("Config error {}", err);
        }
        return Err(anyhow::anyhow!(
            "Invalid configuration ({} error(s))",
            errors.len()
        ));
    }

    let db_path = cfg.db_path();
    let (store, outcome) = store::Store::load(&db_path)?;

    if args.debug {
        eprintln!("[DEBUG] Data file: {} ({:?})", store.path().display(), outcome);
        eprintln!(
            "[DEBUG] Loaded {} user(s), {} project(s)",
            store.users().len(),
            store.projects().len()
        );
        eprintln!(
            "[DEBUG] Journal: {}",
            if cfg.journal_enabled() {
                cfg.journal_dir().display().to_string()
            } else {
                "off".to_string()
            }
        );
        eprintln!("[DEBUG] Currency: {}", cfg.currency());
    }

    let journal = if cfg.journal_enabled() {
        let session_id = uuid::Uuid::new_v4().to_string();
        let path = cfg.journal_dir().join(format!("{}.jsonl", session_id));
        match journal::Journal::new(&path, &session_id) {
            Ok(mut journal) => {
                let mut written =
                    journal.session_start(&db_path, store.users().len(), store.projects().len());
                let recovery = match &outcome {
                    store::LoadOutcome::Recovered(aside) => {
                        Some(format!("unreadable data file moved to {}", aside.display()))
                    }
                    store::LoadOutcome::Unmovable => {
                        Some("unreadable data file left in place".to_string())
                    }
                    _ => None,
                };
                if let Some(msg) = recovery {
                    written = written.and_then(|_| journal.store_error("load", &msg));
                }
                if let Err(e) = written {
                    eprintln!("Warning: failed to write journal: {}", e);
                }
                Some(journal)
            }
            Err(e) => {
                eprintln!("Warning: journal disabled ({}): {}", path.display(), e);
                None
            }
        }
    } else {
        None
    };

    let ctx = cli::Context {
        store,
        session: session::Session::default(),
        journal,
        currency: cfg.currency().to_string(),
    };

    cli::run_repl(ctx)
}
