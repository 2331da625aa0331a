#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Encode,
    Validate,
    Decode,
    Create,
    Update,
    Clone,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "encode" => CliVerb::Encode,
        "validate" => CliVerb::Validate,
        "decode" => CliVerb::Decode,
        "create" => CliVerb::Create,
        "update" => CliVerb::Update,
        "clone" => CliVerb::Clone,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Usage: expform [--config <settings.yaml>] <command> ...".to_string(),
        String::new(),
        "Commands:".to_string(),
        "  encode <draft.yaml>                  Walk a form draft through the wizard and print the spec"
            .to_string(),
        "  validate <draft.yaml>                Report validation issues per wizard step".to_string(),
        "  decode <spec.json>                   Print the form values a spec loads into".to_string(),
        "  create <draft.yaml>                  Submit a draft as a new experiment".to_string(),
        "  update <id> <spec.json>              Resubmit an existing experiment under its id"
            .to_string(),
        "  clone <spec.json>                    Submit a copy of a spec under a derived name"
            .to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}
