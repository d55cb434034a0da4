//! unistore-demo - a counter and todo list driven by stdin
//!
//! Every line is a command (`inc`, `dec`, `reset`, `add <text>`,
//! `toggle <n>`, `clear`, `state`, `mute`, `unmute`, `quit`). Commands
//! dispatch actions into one store; a subscribed printer writes the new
//! state as JSON after each dispatch.
//!
//! An optional first argument names a config file to use instead of
//! `.unistore.toml`.

use std::io::{self, BufRead};
use std::path::Path;

use anyhow::Result;
use unistore::{apply_middleware, create_store, Middleware, Store, StoreConfig, StoreOptions, Unsubscribe};

mod actions;
mod commands;
mod logger;
mod middleware;
mod reducers;

use actions::Action;
use commands::{Commands, Outcome};
use middleware::ValidationMiddleware;
use reducers::AppState;

fn main() -> Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting unistore-demo");

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::load_from(Path::new(&path))?,
        None => StoreConfig::load(),
    };

    // The logging middleware (if enabled) wraps validation
    let validation: Box<dyn Middleware<AppState, Action>> = Box::new(ValidationMiddleware);
    let options = StoreOptions::from_config(config).enhancer(apply_middleware(vec![validation]));
    let store = create_store(reducers::root(), options)?;

    let commands = Commands::bind(&store.dispatcher());
    let mut printer = Some(subscribe_printer(&store));
    print_state(&store.get_state());

    for line in io::stdin().lock().lines() {
        let line = line?;
        match commands.run(&line) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Print) => print_state(&store.get_state()),
            Ok(Outcome::Mute) => {
                if let Some(printer) = printer.take() {
                    printer.unsubscribe();
                }
            }
            Ok(Outcome::Unmute) => {
                if printer.is_none() {
                    printer = Some(subscribe_printer(&store));
                }
            }
            Ok(Outcome::Quit) => break,
            Err(e) => {
                log::warn!("Command '{}' failed: {:#}", line.trim(), e);
                eprintln!("error: {:#}", e);
            }
        }
    }

    log::info!("Exiting unistore-demo");
    eprintln!("log written to {}", log_file.display());
    Ok(())
}

fn subscribe_printer(store: &Store<AppState, Action>) -> Unsubscribe {
    let reader = store.clone();
    store.subscribe(move || print_state(&reader.get_state()))
}

fn print_state(state: &AppState) {
    match serde_json::to_string(state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize state: {}", e),
    }
}
