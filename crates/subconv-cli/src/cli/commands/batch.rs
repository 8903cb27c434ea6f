//! `subconv batch [file]` – convert a list of URLs.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use subconv_core::batch::{BatchJob, BatchReport};
use subconv_core::history::History;
use subconv_core::store::KeyValueStore;

use super::{truncate_for_display, Session};
use crate::cli::args::{FlagArgs, TemplateArgs};

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("read batch input: {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read batch input from stdin")?;
            Ok(buf)
        }
    }
}

pub async fn run_batch<S: KeyValueStore>(
    session: &mut Session<S>,
    input: Option<&Path>,
    template: &TemplateArgs,
    flags: &FlagArgs,
    delay_ms: Option<u64>,
    record_history: bool,
) -> Result<BatchReport> {
    let text = read_input(input)?;
    run_batch_text(session, &text, template, flags, delay_ms, record_history).await
}

/// Batch over already-read input text.
pub async fn run_batch_text<S: KeyValueStore>(
    session: &mut Session<S>,
    text: &str,
    template: &TemplateArgs,
    flags: &FlagArgs,
    delay_ms: Option<u64>,
    record_history: bool,
) -> Result<BatchReport> {
    let sel = session.selection(template)?;
    let job = BatchJob {
        composer: session.composer(),
        template: sel.template,
        custom_template_url: sel.custom_url().map(str::to_string),
        flags: flags.to_flags(),
        delay: delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| session.cfg.batch_delay()),
    };

    let mut history = History::new(&mut session.store);
    let history = record_history.then_some(&mut history);

    let report = job
        .run(text, history, |i, total, item| match &item.outcome {
            Ok(c) => {
                eprintln!("[{}/{}] ok     {}", i + 1, total, truncate_for_display(&item.source_url, 60));
                println!("{}", c.url);
            }
            Err(e) => {
                eprintln!(
                    "[{}/{}] failed {}: {}",
                    i + 1,
                    total,
                    truncate_for_display(&item.source_url, 60),
                    e
                );
            }
        })
        .await?;

    eprintln!(
        "batch finished: {} succeeded, {} failed, {} skipped",
        report.succeeded, report.failed, report.skipped
    );
    Ok(report)
}
