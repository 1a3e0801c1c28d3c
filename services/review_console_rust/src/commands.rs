//! Line-command surface of the operator console.
//!
//! Parsing is deliberately forgiving: unknown commands print usage, bad
//! indices report and continue. Nothing here terminates the session.

use review_core::clients::PredictionSource;
use review_core::models::{DailyEvent, EventStatus};
use review_core::{GenerateOutcome, PickField, ReviewSession};

/// One parsed operator command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Refresh,
    Select(String),
    Show,
    Edit {
        index: usize,
        field: PickField,
        value: String,
    },
    Remove(usize),
    Comments(String),
    Reset,
    Save,
    Publish,
    Result {
        status: EventStatus,
        details: Option<String>,
    },
    Generate,
    Help,
    Quit,
}

/// Whether the event loop should keep running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let verb = parts.next().unwrap_or("").to_ascii_lowercase();
        let rest = parts.next().unwrap_or("").trim();

        match verb.as_str() {
            "" | "help" | "?" => Ok(Command::Help),
            "list" | "ls" => Ok(Command::List),
            "refresh" => Ok(Command::Refresh),
            "show" => Ok(Command::Show),
            "select" | "open" => {
                if rest.is_empty() {
                    Err("usage: select <event-id | #index>".to_string())
                } else {
                    Ok(Command::Select(rest.to_string()))
                }
            }
            "edit" => {
                let mut args = rest.splitn(3, char::is_whitespace);
                let index = parse_index(args.next())?;
                let field_name = args.next().ok_or("usage: edit <n> <field> <value>")?;
                let field = PickField::parse(field_name)
                    .ok_or_else(|| format!("unknown field '{field_name}' (prediction, odds, market, reasoning)"))?;
                let value = args.next().unwrap_or("").to_string();
                Ok(Command::Edit {
                    index,
                    field,
                    value,
                })
            }
            "rm" | "remove" => Ok(Command::Remove(parse_index(Some(rest))?)),
            "comments" => Ok(Command::Comments(rest.to_string())),
            "reset" => Ok(Command::Reset),
            "save" => Ok(Command::Save),
            "publish" | "approve" => Ok(Command::Publish),
            "result" => {
                let mut args = rest.splitn(2, char::is_whitespace);
                let status = match args.next().unwrap_or("").to_ascii_uppercase().as_str() {
                    "WON" => EventStatus::Won,
                    "LOST" => EventStatus::Lost,
                    "VOID" => EventStatus::Void,
                    other => return Err(format!("unknown result '{other}' (WON, LOST, VOID)")),
                };
                let details = args.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
                Ok(Command::Result { status, details })
            }
            "generate" => Ok(Command::Generate),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command '{other}' (try 'help')")),
        }
    }
}

/// 1-based pick index as typed by the operator.
fn parse_index(arg: Option<&str>) -> Result<usize, String> {
    let raw = arg.map(str::trim).filter(|s| !s.is_empty()).ok_or("missing pick index")?;
    let n: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a pick index"))?;
    if n == 0 {
        return Err("pick indices start at 1".to_string());
    }
    Ok(n - 1)
}

/// Execute one command against the session.
pub async fn execute(
    session: &mut ReviewSession,
    picks_source: &dyn PredictionSource,
    command: Command,
) -> Flow {
    match command {
        Command::Help => print_help(),
        Command::Quit => return Flow::Quit,
        Command::List => print_queue(session),
        Command::Refresh => {
            session.refresh().await;
            print_queue(session);
        }
        Command::Select(selector) => {
            let id = resolve_selector(session, &selector);
            match id {
                Some(id) if session.select(&id) => print_draft(session),
                _ => println!("no reviewable event matches '{selector}'"),
            }
        }
        Command::Show => print_draft(session),
        Command::Edit {
            index,
            field,
            value,
        } => {
            if session.update_field(index, field, &value) {
                print_draft(session);
            } else {
                println!("edit ignored (bad index or unparseable odds)");
            }
        }
        Command::Remove(index) => {
            if session.remove_pick(index) {
                print_draft(session);
            } else {
                println!("cannot remove: at least one pick required");
            }
        }
        Command::Comments(text) => {
            session.set_comments(&text);
        }
        Command::Reset => {
            if session.reset_to_ai_selection() {
                print_draft(session);
            } else {
                println!("nothing selected");
            }
        }
        Command::Save => match session.save(false).await {
            Ok(()) => println!("review saved"),
            Err(e) => println!("save failed: {e}"),
        },
        Command::Publish => match session.save(true).await {
            Ok(()) => println!("approved and published"),
            Err(e) => println!("publish failed: {e}"),
        },
        Command::Result { status, details } => {
            match session.set_event_result(status, details.as_deref()).await {
                Ok(()) => println!("result recorded: {}", status.as_str()),
                Err(e) => println!("result update failed: {e}"),
            }
        }
        Command::Generate => match session.generate_daily_picks(picks_source).await {
            Ok(GenerateOutcome::Saved(ack)) => println!(
                "daily picks generated: {} match(es), event {}",
                ack.match_count, ack.event_id
            ),
            Ok(GenerateOutcome::NoPicks { reason }) => println!(
                "no picks found for today ({})",
                reason.as_deref().unwrap_or("no reason given")
            ),
            Err(e) => println!("generation failed: {e}"),
        },
    }
    Flow::Continue
}

/// `select` accepts either a raw event id or `#n` into the printed queue.
fn resolve_selector(session: &ReviewSession, selector: &str) -> Option<String> {
    if let Some(raw) = selector.strip_prefix('#') {
        let n: usize = raw.parse().ok()?;
        let all: Vec<&DailyEvent> = session
            .pending()
            .iter()
            .chain(session.published().iter())
            .collect();
        return all.get(n.checked_sub(1)?).map(|e| e.id.clone());
    }
    Some(selector.to_string())
}

fn print_queue(session: &ReviewSession) {
    println!("pending review ({}):", session.pending().len());
    let mut n = 1;
    for event in session.pending() {
        println!(
            "  #{n} {} {} {} | {} pick(s), total {:.4}x",
            event.id,
            event.date,
            event.sport,
            event.current_picks().len(),
            event.current_total_odds(),
        );
        n += 1;
    }
    println!("published ({}):", session.published().len());
    for event in session.published() {
        println!(
            "  #{n} {} {} {} | {} pick(s), total {:.4}x",
            event.id,
            event.date,
            event.sport,
            event.matches.len(),
            event.current_total_odds(),
        );
        n += 1;
    }
}

fn print_draft(session: &ReviewSession) {
    let Some(event) = session.selected() else {
        println!("nothing selected");
        return;
    };
    println!(
        "draft for {} ({}, status {}):",
        event.id,
        event.date,
        event.status.as_str()
    );
    for (i, pick) in session.draft_picks().iter().enumerate() {
        println!(
            "  {}. {} vs {} | {} @ {:.4} | {}",
            i + 1,
            pick.home_team.as_deref().unwrap_or("?"),
            pick.away_team.as_deref().unwrap_or("?"),
            pick.prediction.as_deref().unwrap_or("-"),
            pick.effective_odds(),
            pick.bookmaker_market.as_deref().unwrap_or("-"),
        );
    }
    println!("  total odds: {:.4}x", session.draft_total_odds());
    if !session.comments().is_empty() {
        println!("  comments: {}", session.comments());
    }
}

fn print_help() {
    println!(
        "commands:\n  \
         list | refresh          show / re-fetch the review queue\n  \
         select <id | #n>        open an event for review\n  \
         show                    print the current draft\n  \
         edit <n> <field> <v>    edit a pick (prediction, odds, market, reasoning)\n  \
         rm <n>                  remove a pick from the draft\n  \
         comments <text>         set admin comments\n  \
         reset                   discard edits, reload the saved draft / AI picks\n  \
         save | publish          save the review / approve and publish\n  \
         result WON|LOST|VOID [details]\n  \
         generate                fetch today's AI picks and store them\n  \
         quit"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edit_with_one_based_index() {
        let cmd = Command::parse("edit 1 odds 1.25").expect("parses");
        assert_eq!(
            cmd,
            Command::Edit {
                index: 0,
                field: PickField::Odds,
                value: "1.25".to_string(),
            }
        );
    }

    #[test]
    fn parses_result_with_details() {
        let cmd = Command::parse("result won match finished 2-1").expect("parses");
        assert_eq!(
            cmd,
            Command::Result {
                status: EventStatus::Won,
                details: Some("match finished 2-1".to_string()),
            }
        );
    }

    #[test]
    fn rejects_zero_index() {
        assert!(Command::parse("rm 0").is_err());
    }

    #[test]
    fn rejects_unknown_field() {
        assert!(Command::parse("edit 1 tournament Serie A").is_err());
    }

    #[test]
    fn blank_line_is_help() {
        assert_eq!(Command::parse("   ").unwrap(), Command::Help);
    }
}
