use crate::{
    cli::{
        actions::{
            mock,
            page::{self, PageRequest, WelcomeIntent},
            Action,
        },
        commands::{
            client::{ARG_API_URL, ARG_STORAGE_FILE},
            pages::{
                ARG_ACTION, ARG_CARD, ARG_CARD_BUTTON, ARG_CONFIRM_PASSWORD, ARG_EMAIL,
                ARG_LOGOUT, ARG_PASSWORD, ARG_PORT, ARG_USERNAME, ARG_YES, CMD_LOGIN,
                CMD_LOGOUT, CMD_MOCK_BACKEND, CMD_SIGNUP, CMD_WELCOME,
            },
        },
        globals::GlobalArgs,
    },
    config::DEFAULT_API_URL,
    pages::{LoginForm, SignupForm},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

fn globals(matches: &ArgMatches) -> GlobalArgs {
    let api_url = matches
        .get_one::<String>(ARG_API_URL)
        .cloned()
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let mut globals = GlobalArgs::new(api_url);
    if let Some(path) = matches.get_one::<PathBuf>(ARG_STORAGE_FILE) {
        globals.set_storage_file(path.clone());
    }
    globals
}

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let Some((name, sub)) = matches.subcommand() else {
        return Err(anyhow!("missing subcommand"));
    };

    let request = match name {
        CMD_MOCK_BACKEND => {
            let port = sub.get_one::<u16>(ARG_PORT).copied().unwrap_or(3000);
            return Ok(Action::MockBackend(mock::Args { port }));
        }
        CMD_LOGIN => PageRequest::Login(LoginForm::new(
            required(sub, ARG_USERNAME)?,
            required(sub, ARG_PASSWORD)?,
        )),
        CMD_SIGNUP => PageRequest::Signup(SignupForm::new(
            required(sub, ARG_USERNAME)?,
            required(sub, ARG_EMAIL)?,
            required(sub, ARG_PASSWORD)?,
            required(sub, ARG_CONFIRM_PASSWORD)?,
        )),
        CMD_WELCOME => PageRequest::Welcome(WelcomeIntent {
            card: sub.get_one::<String>(ARG_CARD).cloned(),
            card_button: sub.get_one::<String>(ARG_CARD_BUTTON).cloned(),
            action: sub.get_one::<String>(ARG_ACTION).cloned(),
            logout: sub.get_flag(ARG_LOGOUT),
        }),
        CMD_LOGOUT => PageRequest::Welcome(WelcomeIntent {
            logout: true,
            ..WelcomeIntent::default()
        }),
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    let assume_yes = sub.try_get_one::<bool>(ARG_YES).ok().flatten().copied().unwrap_or(false);

    Ok(Action::Page(page::Args {
        globals: globals(matches),
        request,
        assume_yes,
    }))
}
