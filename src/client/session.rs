use std::time::Duration;

use anyhow::{Result, anyhow};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use super::api::JobApiClient;
use super::render::render;
use super::state::{Action, Effect, FilterField, LoadStatus, SearchState};
use crate::api::jobs::{JobSearchParams, RawSearchQuery};
use crate::cli::SearchArgs;

const HELP: &str = "commands: n (next), p (previous), <number> (go to page), s <keyword> [| <location>] (search), q (quit)";

/// What a line typed in interactive mode asks for
#[derive(Debug, PartialEq)]
pub enum Command {
    Dispatch(Vec<Action>),
    Quit,
    Unknown,
}

pub fn parse_command(line: &str, state: &SearchState) -> Command {
    let line = line.trim();
    match line {
        "q" | "quit" | "exit" => return Command::Quit,
        "n" | "next" => {
            return Command::Dispatch(vec![Action::ChangePage(state.current_page.saturating_add(1))]);
        }
        "p" | "prev" | "previous" => {
            return Command::Dispatch(vec![Action::ChangePage(state.current_page.saturating_sub(1))]);
        }
        _ => {}
    }

    if let Ok(page) = line.parse::<u32>() {
        return Command::Dispatch(vec![Action::ChangePage(page)]);
    }

    if let Some(query) = line.strip_prefix("s ") {
        let mut actions = Vec::with_capacity(3);
        let (was, wo) = match query.split_once('|') {
            Some((was, wo)) => (was, Some(wo)),
            None => (query, None),
        };
        actions.push(Action::EditFilter {
            field: FilterField::Keyword,
            value: was.trim().to_string(),
        });
        if let Some(wo) = wo {
            actions.push(Action::EditFilter {
                field: FilterField::Location,
                value: wo.trim().to_string(),
            });
        }
        actions.push(Action::SubmitSearch);
        return Command::Dispatch(actions);
    }

    Command::Unknown
}

async fn run_effect(api: &JobApiClient, state: SearchState, effect: Effect) -> SearchState {
    let Effect::Fetch(params) = effect;
    let action = match api.search_jobs(&params).await {
        Ok(response) => Action::Loaded { params, response },
        Err(err) => {
            warn!("Search failed: {:#}", err);
            Action::LoadFailed(format!("{err:#}"))
        }
    };
    state.apply(action).0
}

/// Run the terminal search client
pub async fn run(args: SearchArgs) -> Result<()> {
    let api = JobApiClient::new(&args.api_url, Duration::from_secs(args.timeout_secs))?;

    let params = JobSearchParams::normalize(&RawSearchQuery {
        was: args.was,
        wo: args.wo,
        page: args.page,
        size: args.size,
    });

    let (state, effect) = SearchState::start(params);
    let mut state = run_effect(&api, state, effect).await;
    print!("{}", render(&state));

    if !args.interactive {
        return match state.status {
            LoadStatus::Failed(message) => Err(anyhow!(message)),
            _ => Ok(()),
        };
    }

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let actions = match parse_command(&line, &state) {
            Command::Quit => break,
            Command::Unknown => {
                println!("{HELP}");
                continue;
            }
            Command::Dispatch(actions) => actions,
        };

        for action in actions {
            let (next, effect) = state.apply(action);
            state = match effect {
                Some(effect) => run_effect(&api, next, effect).await,
                None => next,
            };
        }
        print!("{}", render(&state));
    }

    Ok(())
}
