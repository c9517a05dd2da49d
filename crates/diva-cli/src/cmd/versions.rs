use crate::output::{print_json, print_pairs};
use anyhow::Result;
use diva_core::{AppendType, MikuVersion};

pub fn run(json: bool) -> Result<()> {
    if json {
        let versions: Vec<_> = MikuVersion::all()
            .iter()
            .map(|v| serde_json::json!({ "version": v, "voice": v.voice_label() }))
            .collect();
        let value = serde_json::json!({
            "versions": versions,
            "append": AppendType::all(),
        });
        return print_json(&value);
    }

    let voices: Vec<_> = MikuVersion::all()
        .iter()
        .map(|v| (v.to_string(), v.voice_label().to_string()))
        .collect();
    print_pairs(("VERSION", "VOICE"), &voices);

    println!();
    let appends: Vec<_> = AppendType::all()
        .iter()
        .enumerate()
        .map(|(i, a)| (i.to_string(), a.to_string()))
        .collect();
    print_pairs(("INDEX", "APPEND"), &appends);
    Ok(())
}
