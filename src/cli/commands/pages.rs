use clap::{Arg, ArgAction, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_SIGNUP: &str = "signup";
pub const CMD_WELCOME: &str = "welcome";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_MOCK_BACKEND: &str = "mock-backend";

pub const ARG_USERNAME: &str = "username";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_LOGOUT: &str = "logout";
pub const ARG_ACTION: &str = "action";
pub const ARG_CARD_BUTTON: &str = "card-button";
pub const ARG_CARD: &str = "card";
pub const ARG_YES: &str = "yes";
pub const ARG_PORT: &str = "port";

fn username() -> Arg {
    Arg::new(ARG_USERNAME)
        .short('u')
        .long("username")
        .help("Account username")
        .required(true)
}

fn password() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help("Account password")
        .env("DOORSTEP_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

fn yes() -> Arg {
    Arg::new(ARG_YES)
        .short('y')
        .long("yes")
        .help("Answer yes to confirmation prompts")
        .action(ArgAction::SetTrue)
}

#[must_use]
pub fn login() -> Command {
    Command::new(CMD_LOGIN)
        .about("Sign in and open the welcome page")
        .arg(username())
        .arg(password())
}

#[must_use]
pub fn signup() -> Command {
    Command::new(CMD_SIGNUP)
        .about("Create an account")
        .arg(username())
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long("email")
                .help("Account email address")
                .required(true),
        )
        .arg(password())
        .arg(
            Arg::new(ARG_CONFIRM_PASSWORD)
                .short('c')
                .long("confirm-password")
                .help("Repeat the password")
                .required(true),
        )
}

#[must_use]
pub fn welcome() -> Command {
    Command::new(CMD_WELCOME)
        .about("Open the welcome page of the signed-in user")
        .arg(
            Arg::new(ARG_LOGOUT)
                .long("logout")
                .help("Log out after the page loads")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_ACTION)
                .long("action")
                .value_name("LABEL")
                .help("Press an action button, e.g. \"Edit Profile\" or \"Delete Account\""),
        )
        .arg(
            Arg::new(ARG_CARD_BUTTON)
                .long("card-button")
                .value_name("LABEL")
                .help("Press a button inside a card"),
        )
        .arg(
            Arg::new(ARG_CARD)
                .long("card")
                .value_name("NAME")
                .help("Press a card"),
        )
        .arg(yes())
}

#[must_use]
pub fn logout() -> Command {
    Command::new(CMD_LOGOUT)
        .about("Log out the signed-in user")
        .arg(yes())
}

#[must_use]
pub fn mock_backend() -> Command {
    Command::new(CMD_MOCK_BACKEND)
        .about("Serve an in-memory users backend for development")
        .arg(
            Arg::new(ARG_PORT)
                .long("port")
                .help("Port to listen on")
                .default_value("3000")
                .env("DOORSTEP_MOCK_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
}
