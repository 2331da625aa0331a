use crate::app::command_support::{
    open_draft_wizard, read_spec, validation_report, walk_to_final_step,
};
use crate::config::Settings;
use crate::spec::decode_spec;
use serde_json::Value;
use std::path::Path;

fn single_path<'a>(args: &'a [String], usage: &str) -> Result<&'a Path, String> {
    match args {
        [path] => Ok(Path::new(path)),
        _ => Err(format!("usage: {usage}")),
    }
}

pub fn cmd_encode(args: &[String], settings: &Settings) -> Result<String, String> {
    let path = single_path(args, "expform encode <draft.yaml>")?;
    let mut wizard = open_draft_wizard(path, settings)?;
    walk_to_final_step(&mut wizard)?;
    let request = wizard.begin_submit().map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(request.spec()).map_err(|e| e.to_string())
}

pub fn cmd_validate(args: &[String], settings: &Settings) -> Result<String, String> {
    let path = single_path(args, "expform validate <draft.yaml>")?;
    let wizard = open_draft_wizard(path, settings)?;
    let (report, blocked) = validation_report(&wizard);
    if blocked {
        Err(report)
    } else {
        Ok(report)
    }
}

pub fn cmd_decode(args: &[String], settings: &Settings) -> Result<String, String> {
    let path = single_path(args, "expform decode <spec.json>")?;
    let spec = read_spec(path)?;
    match decode_spec(&spec) {
        Ok(snapshot) => serde_yaml::to_string(&snapshot).map_err(|e| e.to_string()),
        Err(err) => {
            settings.event_log().error(
                "wizard.decode_failed",
                &[
                    ("mode", Value::from("decode")),
                    ("error", Value::from(err.to_string())),
                ],
            );
            Err(err.to_string())
        }
    }
}
