//! `bscope interpret` and the assumption helpers shared with `rank`.

use buyerscope_discovery::{interpret_with, AssumptionEdit, AssumptionSet};
use buyerscope_lexicon::Lexicon;
use serde::Serialize;

use crate::exit_codes::EXIT_INVALID_EDIT;
use crate::util::to_json;
use crate::CliError;

#[derive(Serialize)]
struct InterpretOutput<'a> {
    runnable: bool,
    assumptions: &'a AssumptionSet,
}

pub fn cmd_interpret(
    lexicon: &Lexicon,
    text: &str,
    edits: &[String],
    json: bool,
) -> Result<(), CliError> {
    let set = apply_edits(interpret_with(lexicon, text), edits)?;

    if json {
        let out = InterpretOutput {
            runnable: set.is_runnable(),
            assumptions: &set,
        };
        println!("{}", to_json(&out)?);
    }
    print_assumptions(&set);
    Ok(())
}

/// Apply `--edit` values (tagged JSON, e.g. `{"op":"set_lookback","days":90}`) in order.
pub(crate) fn apply_edits(mut set: AssumptionSet, edits: &[String]) -> Result<AssumptionSet, CliError> {
    for raw in edits {
        let edit: AssumptionEdit = serde_json::from_str(raw).map_err(|e| {
            CliError::new(EXIT_INVALID_EDIT, format!("cannot parse edit '{raw}': {e}"))
                .with_hint(r#"edits look like {"op":"add_market","code":"EU"}"#)
        })?;
        set = set.apply(edit)?;
    }
    Ok(set)
}

/// Human summary on stderr.
pub(crate) fn print_assumptions(set: &AssumptionSet) {
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".into());
    let join = |items: Vec<String>| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };

    let hs = set
        .hs
        .iter()
        .map(|e| format!("{} ({:.0}%)", e.code, e.confidence * 100.0))
        .collect();
    eprintln!("hs:        {}", join(hs));
    eprintln!("markets:   {}", join(set.markets.iter().cloned().collect()));
    eprintln!("grade:     {}", or_dash(set.grade.clone()));
    eprintln!("pack:      {}", or_dash(set.pack.clone()));
    eprintln!("moq:       {}", or_dash(set.moq_tonnes.map(|t| format!("{t} MT"))));
    eprintln!("certs:     {}", join(set.certs.iter().cloned().collect()));
    eprintln!("lookback:  {} days", set.lookback_days);
    if !set.is_runnable() {
        eprintln!("note: no product recognised; a search needs at least one HS code");
    }
}
