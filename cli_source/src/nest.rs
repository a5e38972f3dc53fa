//! Insertion of delimited keys into a nested configuration map.

use crate::delimiter::Delimiter;
use crate::error::SourceError;
use crate::value::{Dict, FlagValue};

/// Inserts `value` under the delimited `key`, creating intermediate mapping
/// levels as needed.
///
/// The collectors only ever insert scalar and list values; nested levels are
/// created here, never supplied by callers.
///
/// # Errors
///
/// Returns [`SourceError::KeyConflict`] when an intermediate segment already
/// holds a non-mapping value, or when the final segment already holds a
/// mapping. The existing entry is left untouched in either case.
pub(crate) fn insert(
    out: &mut Dict,
    key: &str,
    delimiter: &Delimiter,
    value: FlagValue,
) -> Result<(), SourceError> {
    let mut segments: Vec<&str> = key.split(delimiter.as_str()).collect();
    let Some(last) = segments.pop() else {
        return Ok(());
    };

    let mut cursor = out;
    let mut walked: Vec<&str> = Vec::with_capacity(segments.len());
    for segment in segments {
        walked.push(segment);
        let entry = cursor
            .entry(segment.to_owned())
            .or_insert_with(|| FlagValue::Dict(Dict::new()));
        cursor = match entry {
            FlagValue::Dict(level) => level,
            _ => return Err(SourceError::key_conflict(delimiter.join(&walked), key)),
        };
    }

    if cursor.get(last).is_some_and(FlagValue::is_dict) && !value.is_dict() {
        return Err(SourceError::key_conflict(key, key));
    }
    cursor.insert(last.to_owned(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dotted() -> Delimiter {
        Delimiter::default()
    }

    #[test]
    fn inserts_a_bare_key_at_the_top_level() {
        let mut out = Dict::new();
        insert(&mut out, "debug", &dotted(), FlagValue::Bool(true)).unwrap_or_else(|err| {
            panic!("insert failed: {err}");
        });
        assert_eq!(out.get("debug"), Some(&FlagValue::Bool(true)));
    }

    #[test]
    fn creates_intermediate_levels_for_deep_keys() {
        let mut out = Dict::new();
        insert(
            &mut out,
            "server.database.migrate.direction",
            &dotted(),
            FlagValue::Str("up".into()),
        )
        .unwrap_or_else(|err| panic!("insert failed: {err}"));

        let Some(FlagValue::Dict(server)) = out.get("server") else {
            panic!("expected server mapping, got {out:?}");
        };
        let Some(FlagValue::Dict(database)) = server.get("database") else {
            panic!("expected database mapping");
        };
        let Some(FlagValue::Dict(migrate)) = database.get("migrate") else {
            panic!("expected migrate mapping");
        };
        assert_eq!(migrate.get("direction"), Some(&FlagValue::Str("up".into())));
    }

    #[test]
    fn sibling_keys_share_intermediate_levels() {
        let mut out = Dict::new();
        for (key, value) in [
            ("server.host", FlagValue::Str("example.com".into())),
            ("server.port", FlagValue::Uint(9090)),
        ] {
            insert(&mut out, key, &dotted(), value)
                .unwrap_or_else(|err| panic!("insert failed: {err}"));
        }
        let Some(FlagValue::Dict(server)) = out.get("server") else {
            panic!("expected server mapping");
        };
        assert_eq!(server.len(), 2);
    }

    // A key must never be a scalar and a mapping at once; both insertion
    // orders are rejected with the offending path named.
    #[rstest]
    #[case("a", "a.b")]
    #[case("a.b", "a")]
    fn rejects_conflicting_paths(#[case] first: &str, #[case] second: &str) {
        let mut out = Dict::new();
        insert(&mut out, first, &dotted(), FlagValue::Int(1))
            .unwrap_or_else(|err| panic!("first insert failed: {err}"));
        let err = match insert(&mut out, second, &dotted(), FlagValue::Int(2)) {
            Err(err) => err,
            Ok(()) => panic!("expected a conflict inserting '{second}' after '{first}'"),
        };
        match err {
            // The blocking entry lives at 'a' in both orders; the key names
            // what was being inserted.
            SourceError::KeyConflict { path, key } => {
                assert_eq!(path, "a");
                assert_eq!(key, second);
            }
            other => panic!("expected a key conflict, got {other}"),
        }
        // The existing entry is untouched.
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn custom_delimiters_split_keys() {
        let mut out = Dict::new();
        insert(&mut out, "server/host", &Delimiter::new("/"), FlagValue::Str("h".into()))
            .unwrap_or_else(|err| panic!("insert failed: {err}"));
        assert!(matches!(out.get("server"), Some(FlagValue::Dict(_))));
    }
}
