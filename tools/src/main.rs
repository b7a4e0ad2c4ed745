//! dashboard-runner: headless driver for the churn analytics dashboard core.
//!
//! Usage:
//!   dashboard-runner --seed 12345
//!   dashboard-runner --data-dir ./data --config dashboard.json
//!   dashboard-runner --seed 12345 --ipc-mode
//!
//! `--seed` overrides the seed in `--config` when both are given.

use anyhow::Result;
use churnscope_core::{
    command::DashboardCommand,
    config::DashboardConfig,
    session::DashboardSession,
    store::RecordStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcMessage {
    GetState,
    Command { command: DashboardCommand },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed: Option<u64> = string_arg(&args, "--seed").and_then(|s| s.parse().ok());
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = string_arg(&args, "--data-dir");
    let config_path = string_arg(&args, "--config");

    let config = resolve_config(config_path, seed)?;

    let store = match data_dir {
        Some(dir) => RecordStore::load(dir)?,
        None => RecordStore::reference(),
    };

    if !ipc_mode {
        println!("Churn analytics dashboard-runner");
        println!("  seed:      {}", config.seed);
        println!("  data_dir:  {}", data_dir.unwrap_or("(reference dataset)"));
        println!("  customers: {}", store.len());
        println!();
    }

    let mut session = DashboardSession::start(store, config);

    if ipc_mode {
        log::info!("ipc: ready, seed={}", session.config.seed);
        run_ipc_loop(&mut session, io::stdin().lock(), &mut io::stdout().lock())?;
    } else {
        print_summary(&session);
    }

    Ok(())
}

/// One JSON message per input line, one JSON reply per output line.
/// Rejected commands reply with the error and the unchanged state.
fn run_ipc_loop<R: BufRead, W: Write>(
    session: &mut DashboardSession,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let msg: IpcMessage = match serde_json::from_str(&buffer) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("ipc: malformed message: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(out, "{}", err_json)?;
                out.flush()?;
                continue;
            }
        };

        match msg {
            IpcMessage::Quit => break,
            IpcMessage::GetState => {
                writeln!(out, "{}", serde_json::to_string(&session.snapshot())?)?;
            }
            IpcMessage::Command { command } => {
                let reply = match session.apply(command) {
                    Ok(events) => serde_json::json!({
                        "events": events,
                        "state":  session.snapshot(),
                    }),
                    Err(e) if e.is_recoverable() => serde_json::json!({
                        "error": e.to_string(),
                        "state": session.snapshot(),
                    }),
                    Err(e) => return Err(e.into()),
                };
                writeln!(out, "{}", reply)?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn print_summary(session: &DashboardSession) {
    let snap = session.snapshot();

    println!("=== OVERVIEW ===");
    println!("  total customers:  {}", snap.stats.total_customers);
    println!("  churn rate:       {:.1}%", snap.stats.churn_rate);
    println!("  high risk:        {}", snap.stats.high_risk_customers);
    println!("  revenue at risk:  ${:.0}K", snap.stats.revenue_at_risk / 1000.0);
    println!("  avg churn prob:   {:.1}%", snap.stats.avg_churn_probability * 100.0);
    println!(
        "  loaded records:   {} ({} high, {} medium)",
        snap.kpis.total_customers, snap.kpis.high_risk_customers, snap.kpis.medium_risk_customers,
    );

    println!();
    println!("=== REGIONS ===");
    for r in &snap.regions {
        println!(
            "  {:<6} | customers: {:>3} | churn: {:>5.1}% | revenue: ${:.0}",
            r.region, r.customers, r.churn_rate, r.revenue
        );
    }

    println!();
    println!("=== PLANS ===");
    for p in &snap.plans {
        println!(
            "  {:<10} | customers: {:>3} | churn: {:>5.1}% | avg revenue: ${:.2}",
            p.plan_type, p.customers, p.churn_rate, p.avg_revenue
        );
    }

    println!();
    println!("=== RISK ALERTS ===");
    if snap.alerts.is_empty() {
        println!("  (No at-risk customers)");
    } else {
        for a in &snap.alerts {
            println!(
                "  [{:?}] {} | {} | at risk: ${:.2}",
                a.priority,
                a.display_time(),
                a.message,
                a.revenue_at_risk
            );
        }
        println!(
            "  total exposure: ${:.0}K",
            (snap.alert_summary.revenue_at_risk / 1000.0).round()
        );
    }

    println!();
    println!("=== MODEL ===");
    for card in &snap.model.cards {
        let mark = if card.meets_benchmark { "ok" } else { "below" };
        println!(
            "  {:<9} {:.2} (benchmark {:.2}, {mark})",
            card.title, card.value, card.benchmark
        );
    }
}

/// A `--seed` on the command line wins over the seed in `--config`.
fn resolve_config(config_path: Option<&str>, seed: Option<u64>) -> Result<DashboardConfig> {
    Ok(match (config_path, seed) {
        (Some(path), Some(seed)) => DashboardConfig { seed, ..DashboardConfig::load(path)? },
        (Some(path), None)       => DashboardConfig::load(path)?,
        (None, seed)             => DashboardConfig::with_seed(seed.unwrap_or(42)),
    })
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn run(lines: &[&str]) -> Vec<Value> {
        let mut session = DashboardSession::reference_test();
        let input = lines.join("\n");
        let mut out = Vec::new();
        run_ipc_loop(&mut session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn malformed_line_replies_error_and_continues() {
        let replies = run(&["this is not json", r#"{"type":"get_state"}"#]);
        assert_eq!(replies.len(), 2);
        assert!(replies[0]["error"].is_string());
        assert!(replies[0].get("state").is_none());
        assert_eq!(replies[1]["seed"], 42);
    }

    #[test]
    fn rejected_command_replies_error_with_unchanged_state() {
        let replies = run(&[r#"{"type":"command","command":{"cmd":"set_region","region":"Atlantis"}}"#]);
        assert_eq!(replies.len(), 1);
        let err = replies[0]["error"].as_str().unwrap();
        assert!(err.contains("Atlantis"), "got {err}");
        assert_eq!(replies[0]["state"]["query"]["region"], "All");
        assert_eq!(replies[0]["state"]["customers"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn accepted_command_replies_events_and_state() {
        let replies = run(&[r#"{"type":"command","command":{"cmd":"select","customer_id":"CUST002"}}"#]);
        assert_eq!(replies[0]["events"][0]["type"], "customer_selected");
        assert_eq!(replies[0]["state"]["selected"]["record"]["id"], "CUST002");
    }

    #[test]
    fn get_state_replies_full_snapshot() {
        let replies = run(&[r#"{"type":"get_state"}"#]);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0]["customers"].as_array().unwrap().len(), 6);
        assert_eq!(replies[0]["alerts"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn quit_stops_the_loop() {
        let replies = run(&[
            r#"{"type":"get_state"}"#,
            r#"{"type":"quit"}"#,
            r#"{"type":"get_state"}"#,
        ]);
        assert_eq!(replies.len(), 1);
    }

    #[test]
    fn cli_seed_overrides_config_seed() {
        let path = std::env::temp_dir().join(format!("dashboard-runner-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "seed": 7, "alert_policy": { "high_revenue_months": 12.0,
            "medium_revenue_months": 6.0, "high_window_days": 7, "medium_window_days": 3,
            "medium_cap": 1 } }"#)
        .unwrap();
        let path_str = path.to_str().unwrap();

        let from_file = resolve_config(Some(path_str), None).unwrap();
        assert_eq!(from_file.seed, 7);

        let overridden = resolve_config(Some(path_str), Some(99)).unwrap();
        assert_eq!(overridden.seed, 99);
        assert_eq!(overridden.alert_policy.medium_cap, 1);

        assert_eq!(resolve_config(None, None).unwrap().seed, 42);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn blank_lines_are_skipped() {
        let replies = run(&["", "   ", r#"{"type":"get_state"}"#]);
        assert_eq!(replies.len(), 1);
    }
}
