use crate::app::cli::{help_text, parse_cli_verb, CliVerb};
use crate::app::command_support::{load_cli_settings, split_config_arg};

pub mod drafts;
pub mod submit;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let (config, args) = split_config_arg(args)?;
    if args.is_empty() {
        return Ok(help_text());
    }

    let verb = parse_cli_verb(args[0].as_str());
    match verb {
        CliVerb::Help => return Ok(help_text()),
        CliVerb::Unknown => return Err(format!("unknown command `{}`", args[0])),
        _ => {}
    }

    let settings = load_cli_settings(config.as_deref())?;
    match verb {
        CliVerb::Encode => drafts::cmd_encode(&args[1..], &settings),
        CliVerb::Validate => drafts::cmd_validate(&args[1..], &settings),
        CliVerb::Decode => drafts::cmd_decode(&args[1..], &settings),
        CliVerb::Create => submit::cmd_create(&args[1..], &settings),
        CliVerb::Update => submit::cmd_update(&args[1..], &settings),
        CliVerb::Clone => submit::cmd_clone(&args[1..], &settings),
        CliVerb::Help | CliVerb::Unknown => Ok(help_text()),
    }
}
