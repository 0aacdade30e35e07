use anyhow::Context;
use callguard_application::ports::CallFilterResultCallback;
use callguard_domain::{Call, CallDisposition, CallerAddress, CliOverrides, Verdict};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "callguard")]
#[command(version)]
#[command(about = "Callguard - incoming call filtering")]
struct Cli {
    /// Caller addresses to filter, e.g. tel:+15551234567. A bare number is
    /// treated as tel:. All calls arrive at the same time.
    #[arg(required = true, value_name = "ADDRESS")]
    callers: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Filtering budget per call, in milliseconds
    #[arg(short = 't', long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Calls already ringing when the first caller arrives
    #[arg(long, default_value_t = 0)]
    ringing: usize,

    /// Outgoing calls already being dialed
    #[arg(long, default_value_t = 0)]
    dialing: usize,
}

#[derive(Serialize)]
struct CallReport {
    call_id: u64,
    caller: String,
    verdict: Verdict,
    disposition: CallDisposition,
}

struct LogResultCallback;

impl CallFilterResultCallback for LogResultCallback {
    fn on_call_filtering_complete(&self, call: &Call, verdict: Verdict) {
        info!(call_id = %call.id, %verdict, "Filtering result delivered");
    }
}

fn parse_caller(raw: &str) -> anyhow::Result<CallerAddress> {
    if raw.contains(':') {
        raw.parse::<CallerAddress>()
            .with_context(|| format!("invalid caller address '{}'", raw))
    } else {
        Ok(CallerAddress::tel(raw))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        timeout_ms: cli.timeout_ms,
        log_level: cli.log_level.clone(),
        json_logs: cli.json_logs,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting callguard v{}", env!("CARGO_PKG_VERSION"));

    let callers = cli
        .callers
        .iter()
        .map(|raw| parse_caller(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let adapters = di::Adapters::new(&config);
    for _ in 0..cli.ringing {
        adapters.call_counter.ringing_started();
    }
    for _ in 0..cli.dialing {
        adapters.call_counter.dialing_started();
    }
    let use_cases = di::UseCases::new(&config, &adapters);
    let callback: Arc<dyn CallFilterResultCallback> = Arc::new(LogResultCallback);

    let runs: Vec<_> = callers
        .into_iter()
        .enumerate()
        .map(|(i, handle)| {
            let call = Call::new(i as u64 + 1, handle);
            let handle = use_cases
                .filter_incoming_call
                .execute(call.clone(), callback.clone());
            (call, handle)
        })
        .collect();

    let mut reports = Vec::with_capacity(runs.len());
    for (call, run) in runs {
        let verdict = match run.completion().await {
            Some(verdict) => verdict,
            None => {
                warn!(call_id = %call.id, "Filtering run ended without a verdict");
                continue;
            }
        };

        let disposition = use_cases.apply_filter_result.execute(&call, verdict);
        if disposition == CallDisposition::Ring {
            adapters.call_counter.ringing_started();
        }

        reports.push(CallReport {
            call_id: call.id.0,
            caller: call.handle.to_string(),
            verdict,
            disposition,
        });
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!(
                "{:<6} {:<28} {} -> {}",
                format!("#{}", report.call_id),
                report.caller,
                report.verdict,
                report.disposition.as_str()
            );
        }
    }

    Ok(())
}
