//! Typed extraction of a flag's stored value from parsed matches.
//!
//! Dispatch is type-directed rather than probed by zero values: the flag's
//! action identifies booleans and counters, its arity identifies list kinds,
//! and scalar kinds are resolved by exact downcast of the stored value. A
//! flag explicitly set to `""`, `0`, `0.0` or `false` therefore extracts
//! faithfully instead of falling through to the wrong accessor.

use std::path::PathBuf;
use std::time::Duration;

use clap::parser::MatchesError;
use clap::{Arg, ArgAction, ArgMatches};

use crate::error::SourceError;
use crate::value::FlagValue;

/// Reads the stored value of `arg` from `matches`, if any.
///
/// Returns `Ok(None)` when the flag holds no value at all. Values of kinds
/// outside the supported set are rendered from the raw command line as
/// strings, the open-kind fallback.
///
/// # Errors
///
/// Returns [`SourceError::Matches`] if the parser reports the flag as
/// unknown, which indicates the matches and the command tree are mismatched.
pub(crate) fn flag_value(
    matches: &ArgMatches,
    arg: &Arg,
) -> Result<Option<FlagValue>, SourceError> {
    let id = arg.get_id().as_str();

    match arg.get_action() {
        ArgAction::SetTrue | ArgAction::SetFalse => {
            return Ok(one::<bool>(matches, id)?.map(FlagValue::Bool));
        }
        ArgAction::Count => {
            return Ok(one::<u8>(matches, id)?.map(|n| FlagValue::Int(i64::from(n))));
        }
        _ => {}
    }

    if takes_many(arg) {
        return many_value(matches, id);
    }
    single_value(matches, id)
}

/// A flag accepts multiple values when it appends occurrences or declares a
/// multi-value arity.
fn takes_many(arg: &Arg) -> bool {
    matches!(arg.get_action(), ArgAction::Append)
        || arg.get_num_args().is_some_and(|range| range.max_values() > 1)
}

fn single_value(matches: &ArgMatches, id: &str) -> Result<Option<FlagValue>, SourceError> {
    if let Some(v) = one::<String>(matches, id)? {
        return Ok(Some(FlagValue::Str(v)));
    }
    if let Some(v) = one::<bool>(matches, id)? {
        return Ok(Some(FlagValue::Bool(v)));
    }
    if let Some(v) = one::<i64>(matches, id)? {
        return Ok(Some(FlagValue::Int(v)));
    }
    if let Some(v) = one::<i32>(matches, id)? {
        return Ok(Some(FlagValue::Int(i64::from(v))));
    }
    if let Some(v) = one::<i16>(matches, id)? {
        return Ok(Some(FlagValue::Int(i64::from(v))));
    }
    if let Some(v) = one::<u64>(matches, id)? {
        return Ok(Some(FlagValue::Uint(v)));
    }
    if let Some(v) = one::<u32>(matches, id)? {
        return Ok(Some(FlagValue::Uint(u64::from(v))));
    }
    if let Some(v) = one::<u16>(matches, id)? {
        return Ok(Some(FlagValue::Uint(u64::from(v))));
    }
    if let Some(v) = one::<u8>(matches, id)? {
        return Ok(Some(FlagValue::Uint(u64::from(v))));
    }
    if let Some(v) = one::<f64>(matches, id)? {
        return Ok(Some(FlagValue::Float(v)));
    }
    if let Some(v) = one::<f32>(matches, id)? {
        return Ok(Some(FlagValue::Float(f64::from(v))));
    }
    if let Some(v) = one::<Duration>(matches, id)? {
        return Ok(Some(FlagValue::Duration(v)));
    }
    if let Some(v) = one::<PathBuf>(matches, id)? {
        return Ok(Some(FlagValue::Str(v.display().to_string())));
    }
    raw_fallback(matches, id, false)
}

fn many_value(matches: &ArgMatches, id: &str) -> Result<Option<FlagValue>, SourceError> {
    if let Some(values) = many::<String>(matches, id)? {
        return Ok(Some(FlagValue::StrList(values)));
    }
    if let Some(values) = many::<i64>(matches, id)? {
        return Ok(Some(FlagValue::IntList(values)));
    }
    if let Some(values) = many::<i32>(matches, id)? {
        return Ok(Some(FlagValue::IntList(
            values.into_iter().map(i64::from).collect(),
        )));
    }
    if let Some(values) = many::<i16>(matches, id)? {
        return Ok(Some(FlagValue::IntList(
            values.into_iter().map(i64::from).collect(),
        )));
    }
    if let Some(values) = many::<u64>(matches, id)? {
        return Ok(Some(FlagValue::UintList(values)));
    }
    if let Some(values) = many::<u32>(matches, id)? {
        return Ok(Some(FlagValue::UintList(
            values.into_iter().map(u64::from).collect(),
        )));
    }
    if let Some(values) = many::<u16>(matches, id)? {
        return Ok(Some(FlagValue::UintList(
            values.into_iter().map(u64::from).collect(),
        )));
    }
    if let Some(values) = many::<u8>(matches, id)? {
        return Ok(Some(FlagValue::UintList(
            values.into_iter().map(u64::from).collect(),
        )));
    }
    if let Some(values) = many::<f64>(matches, id)? {
        return Ok(Some(FlagValue::FloatList(values)));
    }
    if let Some(values) = many::<f32>(matches, id)? {
        return Ok(Some(FlagValue::FloatList(
            values.into_iter().map(f64::from).collect(),
        )));
    }
    if let Some(values) = many::<PathBuf>(matches, id)? {
        return Ok(Some(FlagValue::StrList(
            values.iter().map(|p| p.display().to_string()).collect(),
        )));
    }
    raw_fallback(matches, id, true)
}

/// Downcast-aware single-value accessor: a wrong stored type is "not this
/// kind", not an error.
fn one<T>(matches: &ArgMatches, id: &str) -> Result<Option<T>, SourceError>
where
    T: Clone + Send + Sync + 'static,
{
    match matches.try_get_one::<T>(id) {
        Ok(found) => Ok(found.cloned()),
        Err(MatchesError::Downcast { .. }) => Ok(None),
        Err(err) => Err(SourceError::matches(id, err)),
    }
}

fn many<T>(matches: &ArgMatches, id: &str) -> Result<Option<Vec<T>>, SourceError>
where
    T: Clone + Send + Sync + 'static,
{
    match matches.try_get_many::<T>(id) {
        Ok(found) => Ok(found.map(|values| values.cloned().collect())),
        Err(MatchesError::Downcast { .. }) => Ok(None),
        Err(err) => Err(SourceError::matches(id, err)),
    }
}

/// Open-kind fallback: render the raw command-line input to strings. For a
/// single-value flag the last occurrence wins, matching the parser's own
/// overwrite semantics.
fn raw_fallback(
    matches: &ArgMatches,
    id: &str,
    expects_many: bool,
) -> Result<Option<FlagValue>, SourceError> {
    match matches.try_get_raw(id) {
        Ok(Some(raw)) => {
            let mut rendered: Vec<String> = raw
                .map(|value| value.to_string_lossy().into_owned())
                .collect();
            if expects_many {
                Ok(Some(FlagValue::StrList(rendered)))
            } else {
                Ok(rendered.pop().map(FlagValue::Str))
            }
        }
        Ok(None) => Ok(None),
        Err(err) => Err(SourceError::matches(id, err)),
    }
}
