use crate::output::print_json;
use crate::stage::{self, Findings, StageOptions};

/// Report everything validation finds. Errors are listed first and fail the
/// command; warnings alone do not.
pub fn run(opts: &StageOptions, json: bool) -> anyhow::Result<()> {
    let findings = Findings::of(&stage::load_config(opts)?);

    if json {
        print_json(&findings)?;
    } else if findings.is_clean() {
        println!("Stage config is valid. No warnings.");
    } else {
        for e in &findings.errors {
            println!("[error] {e}");
        }
        for w in &findings.warnings {
            println!("[warning] {w}");
        }
    }

    match findings.errors.len() {
        0 => Ok(()),
        n => anyhow::bail!("stage config has {n} error(s)"),
    }
}
