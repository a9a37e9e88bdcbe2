use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::analyze;
use crate::app_state::AppState;
use crate::chart::render_chart;
use crate::error::{Error, Result};
use crate::reader::{read_log_files, resolve_path};
use crate::report::Series;
use tokio::sync::RwLock;

pub async fn load_files(paths: &[String], state: Arc<RwLock<AppState>>) -> Result<()> {
    let timer = Instant::now();
    let resolved: Vec<PathBuf> = {
        let s = state.read().await;
        paths
            .iter()
            .map(|p| resolve_path(&s.config.log_directory, p))
            .collect()
    };

    let inputs = read_log_files(&resolved)?;
    let bytes: usize = inputs.iter().map(|i| i.text.len()).sum();

    let mut s = state.write().await;
    s.add_inputs(inputs);
    println!(
        "loaded {} files ({} bytes) in {}ms, {} in batch",
        resolved.len(),
        bytes,
        timer.elapsed().as_millis(),
        s.inputs.len()
    );
    Ok(())
}

pub async fn clear(state: Arc<RwLock<AppState>>) {
    state.write().await.clear_inputs();
    println!("cleared loaded files");
}

pub async fn set_names(list: &str, state: Arc<RwLock<AppState>>) {
    let mut s = state.write().await;
    s.names = Some(list.to_string()).filter(|n| !n.trim().is_empty());
    s.last_analysis = None;
    match &s.names {
        Some(names) => println!("allowlist: {names}"),
        None => println!("allowlist cleared"),
    }
}

pub async fn set_use_allowlist(enabled: bool, state: Arc<RwLock<AppState>>) {
    let mut s = state.write().await;
    s.use_allowlist = enabled;
    s.last_analysis = None;
    println!("allowlist filtering {}", if enabled { "on" } else { "off" });
}

pub async fn report(state: Arc<RwLock<AppState>>) {
    let timer = Instant::now();
    let mut s = state.write().await;
    if s.inputs.is_empty() {
        println!("no log files loaded");
        return;
    }

    let analysis = analyze(&s.inputs, &s.options());
    for warning in &analysis.warnings {
        println!("{warning}");
    }
    println!("{}", analysis.report_text());
    tracing::debug!(
        elapsed_ms = timer.elapsed().as_millis() as u64,
        characters = analysis.ledgers.len(),
        "report generated"
    );
    s.last_analysis = Some(analysis);
}

pub async fn chart(state: Arc<RwLock<AppState>>) -> Result<()> {
    let s = state.read().await;
    let analysis = s.last_analysis.as_ref().ok_or(Error::NoReport)?;
    let width = s.config.chart_width;

    println!("### Graphs");
    println!("{}", render_chart(&analysis.rows, Series::Inflicted, width));
    println!("{}", render_chart(&analysis.rows, Series::Received, width));
    Ok(())
}

pub async fn export_rows(path: &str, state: Arc<RwLock<AppState>>) -> Result<()> {
    let s = state.read().await;
    let analysis = s.last_analysis.as_ref().ok_or(Error::NoReport)?;

    let json = serde_json::to_string_pretty(&analysis.rows)?;
    std::fs::write(path, json).map_err(|source| Error::WriteFile {
        path: PathBuf::from(path),
        source,
    })?;
    println!("wrote {} chart rows to {path}", analysis.rows.len());
    Ok(())
}

pub async fn show_settings(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    println!("log directory: {}", s.config.log_directory);
    println!("chart width:   {}", s.config.chart_width);
    println!("allowlist:     {}", s.names.as_deref().unwrap_or("(none)"));
    println!("use allowlist: {}", s.use_allowlist);
    println!("loaded files:  {}", s.inputs.len());
    for input in &s.inputs {
        println!("  {:<40} {} bytes", input.name, input.text.len());
    }
}

pub fn exit() {
    // Nothing useful to do if stdout is already gone.
    let _ = write!(std::io::stdout(), "quitting...");
    let _ = std::io::stdout().flush();
}
