//! Live polling view of one week.
//!
//! Re-fetches the viewed week and the roster on a timer and replaces the
//! local snapshot wholesale. Every fetch is tagged with the generation of
//! the view that asked for it; a response arriving after the view moved on
//! is discarded, so a slow fetch can never overwrite the wrong week.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use weekmeet_core::config::WeekmeetConfig;
use weekmeet_core::profile::Profile;
use weekmeet_core::slot::SlotTable;
use weekmeet_core::week;

use crate::client::Client;
use crate::commands::{drag, resolve_week_start};
use crate::render;
use crate::session;

enum WatchCommand {
    NextWeek,
    PrevWeek,
    Today,
    Drag { from: String, to: String },
    Refresh,
    Quit,
}

fn parse_command(line: &str) -> Option<WatchCommand> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        // Bare enter re-fetches
        return Some(WatchCommand::Refresh);
    };

    match head {
        "n" | "next" => Some(WatchCommand::NextWeek),
        "p" | "prev" => Some(WatchCommand::PrevWeek),
        "t" | "today" => Some(WatchCommand::Today),
        "r" | "refresh" => Some(WatchCommand::Refresh),
        "q" | "quit" => Some(WatchCommand::Quit),
        "d" | "drag" => {
            let from = words.next()?.to_string();
            let to = words.next().map(str::to_string).unwrap_or_else(|| from.clone());
            Some(WatchCommand::Drag { from, to })
        }
        _ => None,
    }
}

struct Snapshot {
    table: SlotTable,
    roster: Vec<Profile>,
}

async fn fetch_snapshot(client: &Client, week_key: &str) -> Result<Snapshot> {
    let table = client.week_table(week_key).await?;
    let roster = client.list_users().await?;

    Ok(Snapshot { table, roster })
}

fn spawn_fetch(
    results: &mpsc::UnboundedSender<(u64, Result<Snapshot>)>,
    client: &Client,
    week_start: NaiveDate,
    generation: u64,
) {
    let results = results.clone();
    let client = client.clone();
    let week_key = week::week_key(week_start);
    tokio::spawn(async move {
        let snapshot = fetch_snapshot(&client, &week_key).await;
        let _ = results.send((generation, snapshot));
    });
}

fn redraw(week_start: NaiveDate, snapshot: Option<&Snapshot>, me: &Profile) {
    // Clear the screen and park the cursor at the top
    print!("\x1b[2J\x1b[1;1H");

    match snapshot {
        Some(snap) => {
            print!("{}", render::render_week(week_start, &snap.table));
            println!();
            print!("{}", render::render_legend(&snap.roster));
        }
        None => println!(
            "{}",
            format!("Fetching {}", week::week_key(week_start)).dimmed()
        ),
    }

    println!();
    println!(
        "{} {}",
        format!("Watching as {}", me.name).bold(),
        "n(ext) p(rev) t(oday) d(rag) FROM [TO] r(efresh) q(uit)".dimmed()
    );
}

pub async fn run(week_arg: Option<&str>) -> Result<()> {
    let profile = session::require()?;
    let config = WeekmeetConfig::load()?;
    let client = Client::from_config(&config);

    let mut week_start = resolve_week_start(week_arg)?;
    let mut generation: u64 = 0;
    let mut snapshot: Option<Snapshot> = None;

    let (results_tx, mut results_rx) = mpsc::unbounded_channel();
    spawn_fetch(&results_tx, &client, week_start, generation);

    let mut poll = tokio::time::interval(config.poll_interval());
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    redraw(week_start, snapshot.as_ref(), &profile);

    loop {
        tokio::select! {
            _ = poll.tick() => {
                spawn_fetch(&results_tx, &client, week_start, generation);
            }

            Some((fetched_generation, result)) = results_rx.recv() => {
                // A response for a view we already left
                if fetched_generation != generation {
                    continue;
                }

                match result {
                    Ok(fresh) => {
                        snapshot = Some(fresh);
                        redraw(week_start, snapshot.as_ref(), &profile);
                    }
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match parse_command(&line) {
                    Some(WatchCommand::Quit) => break,
                    Some(WatchCommand::NextWeek) => {
                        week_start = week::add_weeks(week_start, 1);
                        generation += 1;
                        snapshot = None;
                        redraw(week_start, snapshot.as_ref(), &profile);
                        spawn_fetch(&results_tx, &client, week_start, generation);
                    }
                    Some(WatchCommand::PrevWeek) => {
                        week_start = week::add_weeks(week_start, -1);
                        generation += 1;
                        snapshot = None;
                        redraw(week_start, snapshot.as_ref(), &profile);
                        spawn_fetch(&results_tx, &client, week_start, generation);
                    }
                    Some(WatchCommand::Today) => {
                        week_start = week::week_start_of(Local::now().date_naive());
                        generation += 1;
                        snapshot = None;
                        redraw(week_start, snapshot.as_ref(), &profile);
                        spawn_fetch(&results_tx, &client, week_start, generation);
                    }
                    Some(WatchCommand::Refresh) => {
                        spawn_fetch(&results_tx, &client, week_start, generation);
                    }
                    Some(WatchCommand::Drag { from, to }) => {
                        let week_key = week::week_key(week_start);
                        match drag::run_gesture(&client, &profile, &week_key, &from, Some(to.as_str())).await
                        {
                            Ok(outcome) => {
                                let summary = outcome.summary();
                                if let Some(snap) = snapshot.as_mut() {
                                    snap.table = outcome.table;
                                }
                                redraw(week_start, snapshot.as_ref(), &profile);
                                println!("{summary}");

                                // Anything still in flight predates the gesture
                                generation += 1;
                                spawn_fetch(&results_tx, &client, week_start, generation);
                            }
                            Err(e) => eprintln!("{}", e.to_string().red()),
                        }
                    }
                    None => println!(
                        "{}",
                        "Commands: n(ext), p(rev), t(oday), d(rag) FROM [TO], r(efresh), q(uit)"
                            .dimmed()
                    ),
                }
            }
        }
    }

    Ok(())
}
