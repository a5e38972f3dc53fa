//! Command-line flags as a layered-configuration source.
//!
//! This crate reads a parsed `clap` invocation as a nested configuration
//! map, so command-line flags can be merged with file and environment
//! providers by a configuration library such as `figment`. Each flag is
//! addressed by its position in the command hierarchy: invoking
//! `app server database migrate --direction up` yields
//! `{server: {database: {migrate: {direction: "up"}}}}`.
//!
//! Two entry points with deliberately different semantics are provided:
//!
//! - [`CliFlags`] walks the resolved subcommand chain and collects only the
//!   flags the caller explicitly set, namespaced by command path.
//! - [`FlatFlags`] reports every flag known to a single command level,
//!   defaults included, optionally unflattening dotted flag names.
//!
//! Both implement the [`Source`] contract and `figment::Provider`.
//!
//! ```rust
//! use clap::{Arg, ArgAction, Command};
//! use cli_source::{CliFlags, FlagValue, Source};
//!
//! let cmd = Command::new("app")
//!     .arg(Arg::new("debug").long("debug").action(ArgAction::SetTrue))
//!     .subcommand(
//!         Command::new("server").arg(Arg::new("host").long("host")),
//!     );
//! let matches = cmd
//!     .clone()
//!     .get_matches_from(["app", "--debug", "server", "--host", "example.com"]);
//!
//! let dict = CliFlags::new(&cmd, &matches).read()?;
//! assert_eq!(dict.get("debug"), Some(&FlagValue::Bool(true)));
//! let Some(FlagValue::Dict(server)) = dict.get("server") else {
//!     panic!("expected a server mapping");
//! };
//! assert_eq!(server.get("host"), Some(&FlagValue::Str("example.com".into())));
//! # Ok::<(), cli_source::SourceError>(())
//! ```

mod delimiter;
mod error;
mod extract;
mod flat;
mod hierarchy;
mod nest;
mod source;
mod value;

pub use delimiter::Delimiter;
pub use error::SourceError;
pub use flat::FlatFlags;
pub use hierarchy::CliFlags;
pub use source::{ChangeHandler, Source};
pub use value::{Dict, FlagValue, into_figment_dict};
