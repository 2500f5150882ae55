use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use nnviz_catalog::TemplateRegistry;
use nnviz_engine::{Tick, TrainingSimulator};
use nnviz_model::NetworkConfigPatch;
use nnviz_store::{Action, NetworkStore, StoreSettings};

use crate::cli::{ApplyArgs, ArchArgs, SimulateArgs};
use nnviz_cli::summary::{print_summary, templates_table, training_table, view_line};

/// Outcome of replaying a script.
pub struct ApplyResult {
    pub store: NetworkStore,
    pub applied: usize,
    pub rejected: usize,
}

pub fn run_templates() -> Result<()> {
    let registry = TemplateRegistry::builtin();
    println!("{}", templates_table(&registry));
    Ok(())
}

pub fn run_code(config: Option<&Path>, args: &ArchArgs) -> Result<()> {
    let store = open_store(config, args)?;
    print!("{}", store.generated_code());
    Ok(())
}

pub fn run_params(config: Option<&Path>, args: &ArchArgs) -> Result<()> {
    let store = open_store(config, args)?;
    print_summary(&store);
    Ok(())
}

pub fn run_snapshot(config: Option<&Path>, args: &ArchArgs) -> Result<()> {
    let store = open_store(config, args)?;
    println!("{}", store.snapshot_json().context("serialize snapshot")?);
    Ok(())
}

pub fn run_simulate(config: Option<&Path>, args: &SimulateArgs) -> Result<()> {
    let mut store = open_store(config, &args.arch)?;
    if let Some(epochs) = args.epochs {
        store.update_config(&NetworkConfigPatch {
            epochs: Some(epochs),
            ..NetworkConfigPatch::default()
        });
    }
    let seed = args.seed.or(store.settings().seed);
    let mut simulator = TrainingSimulator::new(store.settings().simulator.clone(), seed);

    let span = info_span!("simulate", architecture = %store.state().current_architecture);
    let _guard = span.enter();
    store.reset_training();
    store.start_training();
    info!(epochs = store.state().training.total_epochs, "simulation started");
    while let Tick::Progress(_) = store.advance_training(&mut simulator) {}
    let training = &store.state().training;
    info!(
        epoch = training.current_epoch,
        loss = training.loss,
        accuracy = training.accuracy,
        "simulation finished"
    );

    println!("{}", training_table(training));
    print_summary(&store);
    Ok(())
}

/// Replays the script against a fresh store. Rejected actions are logged
/// and skipped; the state they would have touched stays as it was.
pub fn run_apply(config: Option<&Path>, args: &ApplyArgs) -> Result<ApplyResult> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script {}", args.script.display()))?;
    let actions = Action::parse_script(&text)
        .with_context(|| format!("parse script {}", args.script.display()))?;
    let mut store = NetworkStore::new(load_settings(config)?, TemplateRegistry::builtin())
        .context("create store")?;

    let mut applied = 0usize;
    let mut rejected = 0usize;
    for (index, action) in actions.into_iter().enumerate() {
        let span = info_span!("action", index, name = action.name());
        let _guard = span.enter();
        match store.dispatch(action) {
            Ok(()) => applied += 1,
            Err(error) => {
                warn!(%error, "action rejected");
                eprintln!("action {index}: {error}");
                rejected += 1;
            }
        }
    }
    info!(applied, rejected, "script applied");
    Ok(ApplyResult {
        store,
        applied,
        rejected,
    })
}

pub fn print_apply(result: &ApplyResult, with_snapshot: bool) -> Result<()> {
    println!(
        "Applied {} action(s), rejected {}",
        result.applied, result.rejected
    );
    print_summary(&result.store);
    println!("{}", view_line(result.store.state()));
    if with_snapshot {
        println!(
            "{}",
            result
                .store
                .snapshot_json()
                .context("serialize snapshot")?
        );
    }
    Ok(())
}

fn open_store(config: Option<&Path>, args: &ArchArgs) -> Result<NetworkStore> {
    let mut settings = load_settings(config)?;
    if let Some(kind) = args.arch {
        settings.initial_architecture = kind;
    }
    let kind = settings.initial_architecture;
    NetworkStore::new(settings, TemplateRegistry::builtin())
        .with_context(|| format!("load architecture {kind}"))
}

fn load_settings(config: Option<&Path>) -> Result<StoreSettings> {
    match config {
        Some(path) => StoreSettings::load(path).context("load store settings"),
        None => Ok(StoreSettings::default()),
    }
}
