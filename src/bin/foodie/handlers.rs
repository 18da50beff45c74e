use foodie_review::{
    config::Config,
    data::Restaurant,
    favorites::Favorites,
    review::{ReviewDraft, ReviewDraftBuilder},
    state::{AppState, View},
};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::render;

macro_rules! reply {
    ($out:expr, $text:expr) => {
        if let Err(e) = $out.write_all(format!("{}\n", $text).as_bytes()).await {
            tracing::error!("fail to write reply: {e}")
        }
    };
}

const HELP: &str = "\
Commands:
  cuisines                  back to the cuisine list
  cuisine <id>              list restaurants of a cuisine
  open <id>                 show a restaurant
  search [term]             filter by name, no term clears the search
  favorites                 toggle showing favorites only
  fav <id>                  mark or unmark a favorite
  review <1-5> <comment>    review the open restaurant
  back                      go up one screen
  state                     dump the current state as JSON
  help                      show this message
  quit                      leave";

#[derive(Debug, PartialEq)]
enum Action {
    Cuisines,
    Cuisine(u32),
    Open(u32),
    Search(String),
    Favorites,
    Fav(u32),
    Review(ReviewDraft),
    Back,
    State,
    Help,
}

/// What one input line asks for.
#[derive(Debug, PartialEq)]
enum Command {
    Act(Action),
    Quit,
}

impl Command {
    fn new(args: &[&str]) -> Result<Self, &'static str> {
        match args.first().map(|cmd| cmd.trim_start_matches('/')) {
            Some("quit" | "exit") => Ok(Self::Quit),
            _ => Action::new(args).map(Self::Act),
        }
    }
}

fn parse_id(arg: Option<&&str>) -> Result<u32, &'static str> {
    let Some(arg) = arg else {
        return Err("too less argument");
    };
    arg.parse()
        .map_err(|_| "Can not parse your argument into number")
}

impl Action {
    // I need:
    //  <cmd> [args...]
    fn new(args: &[&str]) -> Result<Self, &'static str> {
        let Some(cmd) = args.first() else {
            return Err("empty command");
        };

        match cmd.trim_start_matches('/') {
            "cuisines" | "home" => Ok(Self::Cuisines),
            "cuisine" => Ok(Self::Cuisine(parse_id(args.get(1))?)),
            "open" => Ok(Self::Open(parse_id(args.get(1))?)),
            "search" => Ok(Self::Search(args[1..].join(" "))),
            "favorites" => Ok(Self::Favorites),
            "fav" => Ok(Self::Fav(parse_id(args.get(1))?)),
            "review" => {
                if args.len() < 2 {
                    return Err("too less argument");
                }
                let Ok(rating) = args[1].parse::<i32>() else {
                    return Err("Can not parse your rating into number");
                };
                // an empty comment is still a draft, validation happens on submit
                let draft = ReviewDraftBuilder::default()
                    .rating(rating)
                    .comment(args[2..].join(" "))
                    .build()
                    .map_err(|_| "incomplete review")?;
                Ok(Self::Review(draft))
            }
            "back" => Ok(Self::Back),
            "state" => Ok(Self::State),
            "help" => Ok(Self::Help),
            _ => Err("unexpected action"),
        }
    }

    // consumed the action
    async fn run<W>(self, out: &mut W, state: &mut AppState, config: &Config) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match self {
            Self::Cuisines => state.home(),
            Self::Cuisine(id) => state.select_cuisine(id)?,
            Self::Open(id) => state.select_restaurant(id)?,
            Self::Search(term) => state.set_search_term(term),
            Self::Favorites => {
                state.toggle_favorites_only();
            }
            Self::Fav(id) => {
                let marked = state.toggle_favorite(id);
                let word = if marked { "Added to" } else { "Removed from" };
                reply!(out, format!("{word} favorites: {id}"));
            }
            Self::Review(draft) => {
                state.submit_review(&draft)?;
                reply!(out, "Thanks for your review!");
            }
            Self::Back => state.back(),
            Self::State => {
                reply!(out, serde_json::to_string_pretty(&Snapshot::of(state))?);
                return Ok(());
            }
            Self::Help => {
                reply!(out, HELP);
                return Ok(());
            }
        }

        reply!(out, render::view(state, config));
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    view: View,
    search_term: &'a str,
    favorites_only: bool,
    favorites: &'a Favorites,
    displayed: Vec<&'a Restaurant>,
}

impl<'a> Snapshot<'a> {
    fn of(state: &'a AppState) -> Self {
        Self {
            view: state.view(),
            search_term: state.search_term(),
            favorites_only: state.favorites_only(),
            favorites: state.favorites(),
            displayed: state.displayed_restaurants(),
        }
    }
}

/// Read commands line by line until `quit` or end of input.
pub(super) async fn run<R, W>(
    reader: R,
    mut out: W,
    state: &mut AppState,
    config: &Config,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    reply!(out, render::view(state, config));
    out.flush().await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let arguments = line.split_whitespace().collect::<Vec<_>>();
        if arguments.is_empty() {
            continue;
        }

        let action = match Command::new(&arguments) {
            Ok(Command::Act(action)) => action,
            Ok(Command::Quit) => break,
            Err(hint) => {
                reply!(out, format!("{hint}\n\n{HELP}"));
                out.flush().await?;
                continue;
            }
        };

        tracing::debug!(?action, "handling command");
        if let Err(e) = action.run(&mut out, state, config).await {
            tracing::warn!("command rejected: {e}");
            reply!(out, format!("Fail to take action: {e}"));
        }
        out.flush().await?;
    }

    Ok(())
}
