use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A two-column listing: heading, dashed rule, then one row per pair.
///
/// Each column is as wide as its longest entry. Nothing trails the last column.
pub fn print_pairs(heading: (&str, &str), pairs: &[(String, String)]) {
    let left = pairs.iter().map(|(k, _)| k.len()).fold(heading.0.len(), usize::max);
    let right = pairs.iter().map(|(_, v)| v.len()).fold(heading.1.len(), usize::max);

    println!("{:left$}  {}", heading.0, heading.1);
    println!("{}  {}", "-".repeat(left), "-".repeat(right));
    for (key, value) in pairs {
        println!("{key:left$}  {value}");
    }
}
