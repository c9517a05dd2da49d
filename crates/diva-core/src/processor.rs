//! Song-title processors and the logging decorator that wraps them.

use std::fmt::Display;

use tracing::{info, warn};

use crate::error::{DivaError, Result};

/// Wrap `processor` so every call is logged, and failures are logged again.
///
/// The wrapped processor's result is returned unchanged.
pub fn with_logging<F, E>(processor: F) -> impl Fn(&str) -> std::result::Result<String, E>
where
    F: Fn(&str) -> std::result::Result<String, E>,
    E: Display,
{
    move |song| {
        info!("Processing: {song}");
        let result = processor(song);
        if let Err(e) = &result {
            warn!("Error: {e}");
        }
        result
    }
}

/// Trim surrounding whitespace; a title that is empty afterwards is rejected.
pub fn normalize_title(song: &str) -> Result<String> {
    let title = song.trim();
    if title.is_empty() {
        return Err(DivaError::InvalidSong(song.to_string()));
    }
    Ok(title.to_string())
}

/// Run every title of a setlist through `processor`, stopping at the first error.
pub fn prepare_setlist<F, E>(songs: &[String], processor: F) -> std::result::Result<Vec<String>, E>
where
    F: Fn(&str) -> std::result::Result<String, E>,
{
    songs.iter().map(|s| processor(s.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn normalize_trims() {
        assert_eq!(normalize_title("  Melt \n").unwrap(), "Melt");
    }

    #[test]
    fn normalize_rejects_blank() {
        let err = normalize_title("   ").unwrap_err();
        assert!(matches!(err, DivaError::InvalidSong(_)));
    }

    #[test]
    fn logging_passes_results_through() {
        let calls = Cell::new(0);
        let upper = with_logging(|s: &str| -> std::result::Result<String, String> {
            calls.set(calls.get() + 1);
            if s == "bad" {
                Err("nope".into())
            } else {
                Ok(s.to_uppercase())
            }
        });
        assert_eq!(upper("melt"), Ok("MELT".to_string()));
        assert_eq!(upper("bad"), Err("nope".to_string()));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn prepare_setlist_stops_at_first_invalid_title() {
        let songs = vec![" Melt".to_string(), "".to_string(), "Rolling Girl".to_string()];
        let err = prepare_setlist(&songs, with_logging(normalize_title)).unwrap_err();
        assert!(matches!(err, DivaError::InvalidSong(s) if s.is_empty()));

        let songs = vec![" Melt".to_string(), "Love is War ".to_string()];
        let ok = prepare_setlist(&songs, with_logging(normalize_title)).unwrap();
        assert_eq!(ok, vec!["Melt", "Love is War"]);
    }
}
