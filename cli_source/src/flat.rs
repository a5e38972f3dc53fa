//! The flat-mode flag collector.
//!
//! A distinct entry point for the single-level case: no hierarchy walk, and
//! no "explicitly set" filter. Every flag known to the invocation is
//! reported, including flags still at their default value.

use clap::{ArgMatches, Command};
use figment::value::Map;
use figment::{Metadata, Profile};

use crate::delimiter::Delimiter;
use crate::error::SourceError;
use crate::source::Source;
use crate::value::{Dict, into_figment_dict};
use crate::{extract, nest};

/// A configuration source reporting every known flag of one command level.
///
/// With the empty delimiter the map stays flat: keys are flag names, and a
/// dotted flag name remains a single key. With a non-empty delimiter each
/// name is split on the separator and unflattened into nested levels, with
/// the same conflict behaviour as hierarchical collection.
///
/// # Examples
///
/// ```rust
/// use clap::{Arg, Command};
/// use cli_source::{FlagValue, FlatFlags, Source};
///
/// let cmd = Command::new("app")
///     .arg(Arg::new("host").long("host").default_value("localhost"));
/// let matches = cmd.clone().get_matches_from(["app"]);
///
/// // Defaults are reported; there is no explicitly-set filter.
/// let dict = FlatFlags::new(&cmd, &matches).read()?;
/// assert_eq!(dict.get("host"), Some(&FlagValue::Str("localhost".into())));
/// # Ok::<(), cli_source::SourceError>(())
/// ```
#[derive(Debug)]
pub struct FlatFlags<'a> {
    command: &'a Command,
    matches: &'a ArgMatches,
    delimiter: Delimiter,
}

impl<'a> FlatFlags<'a> {
    /// Creates a flat collector that performs no unflattening.
    #[must_use]
    pub fn new(command: &'a Command, matches: &'a ArgMatches) -> Self {
        Self::with_delimiter(command, matches, Delimiter::flat())
    }

    /// Creates a flat collector that unflattens keys on `delimiter`.
    #[must_use]
    pub const fn with_delimiter(
        command: &'a Command,
        matches: &'a ArgMatches,
        delimiter: Delimiter,
    ) -> Self {
        Self {
            command,
            matches,
            delimiter,
        }
    }
}

impl Source for FlatFlags<'_> {
    fn name(&self) -> &'static str {
        "flat command-line flags"
    }

    /// Reads the stored value of every non-positional flag at this level.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::KeyConflict`] when unflattening produces
    /// structurally incompatible keys. The flat (empty-delimiter) mode
    /// cannot conflict.
    fn read(&self) -> Result<Dict, SourceError> {
        let mut out = Dict::new();
        for arg in self.command.get_arguments() {
            if arg.is_positional() {
                continue;
            }
            let id = arg.get_id().as_str();
            let Some(value) = extract::flag_value(self.matches, arg)? else {
                continue;
            };
            if self.delimiter.is_flat() {
                out.insert(id.to_owned(), value);
            } else {
                nest::insert(&mut out, id, &self.delimiter, value)?;
            }
        }
        tracing::debug!(keys = out.len(), "collected flat command-line flags");
        Ok(out)
    }
}

impl figment::Provider for FlatFlags<'_> {
    fn metadata(&self) -> Metadata {
        Metadata::named(self.name())
    }

    fn data(&self) -> Result<Map<Profile, figment::value::Dict>, figment::Error> {
        let dict = self
            .read()
            .map_err(|err| figment::Error::from(err.to_string()))?;
        let mut data = Map::new();
        data.insert(Profile::Default, into_figment_dict(dict));
        Ok(data)
    }
}
