use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use restock_cli::providers::DocumentProvider;
use restock_cli::report::{ConsoleOrderSink, JsonOrderSink};
use restock_orchestrator::{Orchestrator, OrderSink};

fn main() -> ExitCode {
    restock_observability::init();

    let mut json = false;
    let mut path: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ if path.is_none() => path = Some(arg),
            _ => return usage(),
        }
    }
    let Some(path) = path else {
        return usage();
    };

    match run(Path::new(&path), json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "optimization run failed");
            ExitCode::FAILURE
        }
    }
}

fn usage() -> ExitCode {
    eprintln!("usage: restock [--json] <snapshot.json>");
    ExitCode::from(2)
}

fn run(path: &Path, json: bool) -> anyhow::Result<()> {
    let provider = Arc::new(DocumentProvider::from_path(path)?);
    let sink: Arc<dyn OrderSink> = if json {
        Arc::new(JsonOrderSink)
    } else {
        Arc::new(ConsoleOrderSink)
    };

    let orchestrator = Orchestrator::new(provider.clone(), provider, sink);
    orchestrator.run()?;
    Ok(())
}
