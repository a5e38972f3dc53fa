//! The hierarchical flag collector.
//!
//! Walks the resolved subcommand chain from the application root down to the
//! leaf and collects every flag the caller explicitly set, keyed by its
//! position in the command hierarchy: a flag `--direction` on the command
//! path `server database migrate` lands under
//! `server.database.migrate.direction`.

use clap::parser::ValueSource;
use clap::{ArgMatches, Command};
use figment::value::Map;
use figment::{Metadata, Profile};

use crate::delimiter::Delimiter;
use crate::error::SourceError;
use crate::source::Source;
use crate::value::{Dict, into_figment_dict};
use crate::{extract, nest};

/// A configuration source over a parsed command-line invocation, namespacing
/// each flag by its command path.
///
/// The collector consumes the invocation read-only: it never mutates the
/// command tree or the matches, and every [`Source::read`] call builds a
/// fresh map. The matches must have been produced by the given command.
///
/// Flags left at their default (or filled from the environment) are omitted;
/// only values the caller explicitly passed on the command line appear in
/// the output. For the single-level variant that reports defaults too, see
/// [`crate::FlatFlags`].
///
/// # Examples
///
/// ```rust
/// use clap::{Arg, ArgAction, Command};
/// use cli_source::{CliFlags, FlagValue, Source};
///
/// let cmd = Command::new("app")
///     .arg(Arg::new("debug").long("debug").action(ArgAction::SetTrue))
///     .subcommand(Command::new("server").arg(Arg::new("host").long("host")));
/// let matches = cmd
///     .clone()
///     .get_matches_from(["app", "--debug", "server", "--host", "example.com"]);
///
/// let dict = CliFlags::new(&cmd, &matches).read()?;
/// assert_eq!(dict.get("debug"), Some(&FlagValue::Bool(true)));
/// # Ok::<(), cli_source::SourceError>(())
/// ```
#[derive(Debug)]
pub struct CliFlags<'a> {
    command: &'a Command,
    matches: &'a ArgMatches,
    delimiter: Delimiter,
}

impl<'a> CliFlags<'a> {
    /// Creates a collector with the conventional `.` delimiter.
    #[must_use]
    pub fn new(command: &'a Command, matches: &'a ArgMatches) -> Self {
        Self::with_delimiter(command, matches, Delimiter::default())
    }

    /// Creates a collector with a custom delimiter.
    ///
    /// Hierarchical collection cannot operate without a separator, so the
    /// empty delimiter is normalised to the default `.`.
    #[must_use]
    pub fn with_delimiter(
        command: &'a Command,
        matches: &'a ArgMatches,
        delimiter: Delimiter,
    ) -> Self {
        let separator = if delimiter.is_flat() {
            Delimiter::default()
        } else {
            delimiter
        };
        Self {
            command,
            matches,
            delimiter: separator,
        }
    }

    /// Collects the explicitly set flags of one command level under `prefix`.
    fn collect_level(
        &self,
        command: &Command,
        matches: &ArgMatches,
        prefix: &str,
        out: &mut Dict,
    ) -> Result<(), SourceError> {
        for arg in command.get_arguments() {
            if arg.is_positional() {
                continue;
            }
            let id = arg.get_id().as_str();
            // `value_source` panics on ids the matches do not know; surface
            // a mismatched command/matches pair as an error instead.
            if let Err(err) = matches.try_contains_id(id) {
                return Err(SourceError::matches(id, err));
            }
            if matches.value_source(id) != Some(ValueSource::CommandLine) {
                continue;
            }
            let Some(value) = extract::flag_value(matches, arg)? else {
                continue;
            };
            let key = if prefix.is_empty() {
                id.to_owned()
            } else {
                format!("{prefix}{}{id}", self.delimiter.as_str())
            };
            tracing::trace!(key = %key, "collected flag");
            nest::insert(out, &key, &self.delimiter, value)?;
        }
        Ok(())
    }
}

impl Source for CliFlags<'_> {
    fn name(&self) -> &'static str {
        "command-line flags"
    }

    /// Builds the nested configuration map for the invocation.
    ///
    /// Each level of the command chain is processed exactly once, the root
    /// frame contributing no path segment: a root flag lands under its bare
    /// name, an ancestor's flag under the ancestor's path, and a leaf flag
    /// under the full path including the leaf's own name.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::KeyConflict`] when two flags flatten to
    /// structurally incompatible keys. Matches produced by a different
    /// command surface as [`SourceError::Matches`] when a flag id is unknown
    /// to them, or [`SourceError::UnknownCommand`] when they select a
    /// subcommand the command tree does not define.
    fn read(&self) -> Result<Dict, SourceError> {
        let mut out = Dict::new();
        let mut command = self.command;
        let mut matches = self.matches;
        let mut path: Vec<&str> = Vec::new();

        loop {
            let prefix = self.delimiter.join(&path);
            self.collect_level(command, matches, &prefix, &mut out)?;
            let Some((name, sub_matches)) = matches.subcommand() else {
                break;
            };
            command = command
                .find_subcommand(name)
                .ok_or_else(|| SourceError::UnknownCommand {
                    name: name.to_owned(),
                })?;
            path.push(command.get_name());
            matches = sub_matches;
        }

        tracing::debug!(keys = out.len(), "collected hierarchical command-line flags");
        Ok(out)
    }
}

impl figment::Provider for CliFlags<'_> {
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
