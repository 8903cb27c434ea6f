//! `subconv history list|show|clear`.

use anyhow::{bail, Result};
use chrono::Local;
use subconv_core::history::{History, HistoryEntry};
use subconv_core::store::KeyValueStore;

use super::{truncate_for_display, Session};
use crate::cli::HistoryAction;

fn local_time(e: &HistoryEntry) -> String {
    e.timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub fn run_history<S: KeyValueStore>(session: &mut Session<S>, action: HistoryAction) -> Result<()> {
    let mut history = History::new(&mut session.store);
    match action {
        HistoryAction::List => {
            let entries = history.list()?;
            if entries.is_empty() {
                println!("No history.");
            } else {
                println!("{:<4} {:<16} {}", "IDX", "TIME", "URL");
                for (i, e) in entries.iter().enumerate() {
                    println!(
                        "{:<4} {:<16} {}",
                        i,
                        local_time(e),
                        truncate_for_display(&e.url, 50)
                    );
                }
            }
        }
        HistoryAction::Show { index } => {
            let Some(e) = history.get(index)? else {
                bail!("no history entry at index {index}");
            };
            println!("url:       {}", e.url);
            println!("converted: {}", e.converted_url);
            println!("time:      {}", e.timestamp.to_rfc3339());
        }
        HistoryAction::Clear => {
            history.clear()?;
            println!("History cleared.");
        }
    }
    Ok(())
}
