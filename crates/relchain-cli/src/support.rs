use crate::config::RelationFile;
use relchain_core::{BindValue, Relation};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RELCHAIN_LOG";

/// Install the stderr log subscriber. `RELCHAIN_LOG` takes an env-filter
/// directive; the default only shows warnings.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn load_relation_or_exit(path: &str) -> (RelationFile, Relation) {
    let file = RelationFile::load(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    let relation = file.build().unwrap_or_else(|e| {
        eprintln!("error: {path}: {e}");
        std::process::exit(1);
    });
    tracing::debug!(path, nodes = relation.len(), "loaded relation");
    (file, relation)
}

fn render_json(payload: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

pub fn print_json(payload: &Value) {
    let rendered = render_json(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render json: {err}");
        std::process::exit(1);
    });
    println!("{rendered}");
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}

pub fn format_values(values: Option<&[BindValue]>) -> String {
    match values {
        Some(values) => {
            let items: Vec<String> = values.iter().map(ToString::to_string).collect();
            format!("[{}]", items.join(", "))
        }
        None => "-".to_string(),
    }
}
