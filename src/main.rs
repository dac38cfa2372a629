use crate::flight::{FlightRecord, FlightRequest, PendingRow};
use crate::history::History;
use crate::report::DelayReport;
use crate::runway::RunwayPool;
use crate::scenario::Scenario;
use crate::schedule::SchedulingService;
use crate::time::Time;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::Tabled;
use tabled::settings::{Alignment, Style};
use tracing_subscriber::EnvFilter;

mod error;
mod flight;
mod history;
mod report;
mod runway;
mod scenario;
mod schedule;
mod time;

#[derive(Parser)]
struct Args {
    /// JSON file with flights to queue at startup
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Runway count used when `schedule` is given none
    #[arg(short, long, default_value_t = 1)]
    runways: usize,

    /// Where scheduled flights are recorded
    #[arg(long, value_name = "FILE", default_value = "data/history.json")]
    history: PathBuf,

    /// Minute the live runways open for `admit`, HH:MM
    #[arg(long, value_name = "HH:MM", default_value = "00:00", value_parser = Time::parse)]
    open_at: Time,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match pager {
        Ok(pager) => pager,
        Err(_) => {
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn print_table<T: Tabled>(rows: impl IntoIterator<Item = T>, len: usize) {
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    if len > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn parse_request(args: &[&str]) -> Result<FlightRequest, String> {
    match args {
        [id, time, minutes] => {
            let id = id.parse().map_err(|_| format!("Invalid flight id '{}'", id))?;
            let minutes = minutes
                .parse()
                .map_err(|_| format!("Invalid duration '{}'", minutes))?;
            FlightRequest::new(id, time, minutes).map_err(|e| e.to_string())
        }
        _ => Err("expected <id> <HH:MM> <minutes>".to_string()),
    }
}

struct Tower {
    pending: Vec<FlightRequest>,
    history: History,
    live: SchedulingService,
    default_runways: usize,
}

impl Tower {
    fn add(&mut self, args: &[&str]) {
        match parse_request(args) {
            Ok(request) => {
                println!("{} flight {} at {}", "Queued".green(), request.id, request.scheduled_time);
                self.pending.push(request);
            }
            Err(e) => println!("{} {}\nUsage: add <id> <HH:MM> <minutes>", "Error:".red(), e),
        }
    }

    fn list(&self, sub: &str) {
        match sub {
            "p" | "pending" => {
                if self.pending.is_empty() {
                    println!("No pending flights.");
                } else {
                    print_table(self.pending.iter().map(PendingRow::from), self.pending.len());
                }
            }
            _ => {
                if self.history.is_empty() {
                    println!("No flights recorded.");
                } else {
                    print_table(self.history.records(), self.history.len());
                }
            }
        }
    }

    fn schedule(&mut self, runways: Option<&str>) {
        #[derive(Clone, Copy)]
        enum Target {
            Fresh(usize),
            Live,
        }
        let target = match runways {
            None => Target::Fresh(self.default_runways),
            Some("live") => Target::Live,
            Some(n) => match n.parse::<usize>() {
                Ok(n) => Target::Fresh(n),
                Err(_) => {
                    println!("Usage: schedule [runways|live]");
                    return;
                }
            },
        };
        if self.pending.is_empty() {
            println!("{} No flights added.", "Error:".red());
            return;
        }

        let result = match target {
            Target::Fresh(runway_count) => RunwayPool::new(runway_count)
                .and_then(|mut pool| schedule::schedule(self.pending.clone(), &mut pool)),
            Target::Live => self.live.admit_batch(self.pending.clone()),
        };
        let records = match result {
            Ok(flights) => flights.iter().map(|f| f.record()).collect::<Vec<FlightRecord>>(),
            Err(e) => {
                println!("{} {}", "Error:".red(), e);
                return;
            }
        };

        print_table(&records, records.len());
        match self.history.append(records) {
            Ok(()) => self.pending.clear(),
            // Live runways are already committed, so those flights cannot be queued again.
            Err(e) if matches!(target, Target::Live) => {
                self.pending.clear();
                println!("{} could not save history: {}", "Error:".red(), e);
            }
            Err(e) => println!(
                "{} could not save history: {}. Pending flights kept.",
                "Error:".red(),
                e
            ),
        }
    }

    fn report(&self) {
        let report = DelayReport::from_records(self.history.records());
        if report.rows().len() > 20 {
            paginate(report.to_string());
        } else {
            println!("{}", report);
        }
    }

    fn admit(&mut self, args: &[&str]) {
        let request = match parse_request(args) {
            Ok(request) => request,
            Err(e) => {
                println!("{} {}\nUsage: admit <id> <HH:MM> <minutes>", "Error:".red(), e);
                return;
            }
        };
        match self.live.admit(request) {
            Ok(flight) => {
                let record = flight.record();
                println!(
                    "{} flight {} on runway {} at {} (delay {} min)",
                    "Admitted".green(),
                    record.id,
                    record.runway,
                    record.start_time,
                    record.delay
                );
                if let Err(e) = self.history.append([record]) {
                    println!("{} could not save history: {}", "Error:".red(), e);
                }
            }
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }

    fn runways(&self) {
        #[derive(Tabled)]
        struct RunwayRow {
            #[tabled(rename = "Runway")]
            runway: String,
            #[tabled(rename = "Free at")]
            free_at: String,
        }
        let rows = self
            .live
            .free_times()
            .into_iter()
            .map(|slot| RunwayRow {
                runway: slot.runway.to_string(),
                free_at: slot.free_at.to_string(),
            })
            .collect::<Vec<_>>();
        print_table(&rows, rows.len());
    }

    fn clear(&mut self) {
        match self.history.clear() {
            Ok(()) => println!("{}", "Flight history cleared.".green()),
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut default_runways = args.runways;
    let mut pending = vec![];
    if let Some(path) = &args.scenario {
        let scenario = Scenario::load_from_file(&path.to_string_lossy())?;
        default_runways = scenario.runways.unwrap_or(default_runways);
        pending = scenario.flights;
        println!("Loaded {} flights from {}", pending.len(), path.display());
    }

    let mut tower = Tower {
        pending,
        history: History::open(&args.history)?,
        live: SchedulingService::open_at(default_runways, args.open_at)?,
        default_runways,
    };
    println!(
        "Tower online. {} runways, {} flights on record.",
        tower.live.runway_count(),
        tower.history.len()
    );

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["add", "ls", "schedule", "admit", "runways", "report", "clear", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "add" => tower.add(&parts[1..]),
                    "ls" => tower.list(parts.get(1).copied().unwrap_or("h")),
                    "schedule" => tower.schedule(parts.get(1).copied()),
                    "admit" => tower.admit(&parts[1..]),
                    "runways" => tower.runways(),
                    "report" => tower.report(),
                    "clear" => tower.clear(),
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  add <id> <HH:MM> <m>   - Queue flight <id> scheduled at <HH:MM> occupying a runway for <m> minutes");
                        println!("  ls [p|h]               - List pending flights (p) or the flight history (h, default)");
                        println!("  schedule [n|live]      - Schedule all pending flights on <n> fresh runways (or the live ones) and record them");
                        println!("  admit <id> <HH:MM> <m> - Admit one flight onto the live runways");
                        println!("  runways                - Show when each live runway is free");
                        println!("  report                 - Delay versus schedule over the flight history");
                        println!("  clear                  - Clear the flight history");
                        println!("  help / ?               - Show this help menu");
                        println!("  exit / quit            - Exit the tower\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
