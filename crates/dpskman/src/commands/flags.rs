//! Field flags generated from the record schema.
//!
//! `dpsk list` and `dpsk modify` take one `--<field>` and one
//! `--regexp-<field>` flag per record attribute. Clap captures them raw; they
//! are parsed here with a command built at run time from `schema`, so the
//! help listing and validation always match the record type.
//!
//! Because the raw capture is greedy, global options written after the
//! field flags (`... set --passphrase x --yes`) land in it too. They are
//! lifted back out and merged into [`GlobalOpts`] before dispatch.

use std::collections::HashSet;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};

use dpskman_core::schema::{self, FilterKind, FlagSpec};
use dpskman_core::{FilterSet, UpdateSet};

use crate::cli::{Cli, Command as CliCommand, DpskArgs, DpskCommand, GlobalOpts};
use crate::error::CliError;

/// Token separating filter flags from value flags in `dpsk modify`.
pub const SET_TOKEN: &str = "set";

const EXACT_HEADING: &str = "Exact filters";
const REGEXP_HEADING: &str = "Regexp filters";
const VALUES_HEADING: &str = "Values";

// ── Command construction ────────────────────────────────────────────

fn flag_command(
    name: &'static str,
    about: &'static str,
    exact_heading: &'static str,
    specs: &[FlagSpec],
) -> Command {
    let base = Command::new(name)
        .no_binary_name(true)
        .about(about)
        .disable_version_flag(true);

    specs.iter().fold(base, |cmd, spec| {
        let (heading, value_name) = match spec.kind {
            FilterKind::Exact => (exact_heading, "VALUE"),
            FilterKind::Regexp => (REGEXP_HEADING, "PATTERN"),
        };
        cmd.arg(
            Arg::new(spec.name.clone())
                .long(spec.name.clone())
                .value_name(value_name)
                .help(spec.help.clone())
                .help_heading(heading)
                .action(ArgAction::Set),
        )
    })
}

fn list_command() -> Command {
    flag_command(
        "dpskman dpsk list",
        "List DPSK records matching every given filter",
        EXACT_HEADING,
        &schema::filter_flags(),
    )
}

fn modify_command() -> Command {
    flag_command(
        "dpskman dpsk modify",
        "Update every DPSK matching the filters: <FILTERS> set <VALUES>",
        EXACT_HEADING,
        &schema::filter_flags(),
    )
    .after_help(format!(
        "Values (after `{SET_TOKEN}`):\n{}",
        schema::render_usage(&schema::update_flags())
    ))
}

fn set_command() -> Command {
    flag_command(
        "dpskman dpsk modify ... set",
        "Values to write to every matching DPSK",
        VALUES_HEADING,
        &schema::update_flags(),
    )
}

// ── Parsing ─────────────────────────────────────────────────────────

/// Run `cmd` over `args`. `Ok(None)` means help was requested and printed.
fn parse(cmd: Command, args: &[String], specs: &[FlagSpec]) -> Result<Option<ArgMatches>, CliError> {
    match cmd.try_get_matches_from(args) {
        Ok(matches) => Ok(Some(matches)),
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            e.print()?;
            Ok(None)
        }
        Err(e) => Err(CliError::Usage {
            message: first_line(&e),
            usage: Some(format!(
                "Available flags:\n{}",
                schema::render_usage(specs)
            )),
        }),
    }
}

/// Clap's headline for `err`, without the `error: ` prefix.
fn first_line(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_owned()
}

/// `(identifier, value)` pairs for every flag of `kind` that was given.
fn values_of(matches: &ArgMatches, specs: &[FlagSpec], kind: FilterKind) -> Vec<(&'static str, String)> {
    specs
        .iter()
        .filter(|spec| spec.kind == kind)
        .filter_map(|spec| {
            matches
                .get_one::<String>(&spec.name)
                .map(|v| (spec.field.as_str(), v.clone()))
        })
        .collect()
}

fn build_filters(matches: &ArgMatches, specs: &[FlagSpec]) -> Result<FilterSet, CliError> {
    let exact = values_of(matches, specs, FilterKind::Exact);
    let regexp = values_of(matches, specs, FilterKind::Regexp);

    FilterSet::build(
        exact.iter().map(|(f, v)| (*f, v.as_str())),
        regexp.iter().map(|(f, v)| (*f, v.as_str())),
    )
    .map_err(|e| CliError::usage(&e, &schema::render_usage(specs)))
}

/// Parse `dpsk list` flags into a filter set.
pub fn parse_list(args: &[String]) -> Result<Option<FilterSet>, CliError> {
    let specs = schema::filter_flags();
    let Some(matches) = parse(list_command(), args, &specs)? else {
        return Ok(None);
    };
    build_filters(&matches, &specs).map(Some)
}

/// Parse `dpsk modify` flags: filters, the `set` token, then values.
///
/// Checked in order: filter validity, at least one filter, presence of
/// `set`, value validity, at least one value.
pub fn parse_modify(args: &[String]) -> Result<Option<(FilterSet, UpdateSet)>, CliError> {
    let split = args.iter().position(|a| a == SET_TOKEN);
    let (filter_args, set_args) = match split {
        Some(pos) => (&args[..pos], &args[pos + 1..]),
        None => (args, &[][..]),
    };

    let filter_specs = schema::filter_flags();
    let Some(matches) = parse(modify_command(), filter_args, &filter_specs)? else {
        return Ok(None);
    };
    let filters = build_filters(&matches, &filter_specs)?;

    if split.is_none() {
        return Err(CliError::Usage {
            message: "set directive not found".into(),
            usage: Some(format!(
                "Usage: dpskman dpsk modify <FILTERS> {SET_TOKEN} <VALUES>\n\nValues:\n{}",
                schema::render_usage(&schema::update_flags())
            )),
        });
    }

    let value_specs = schema::update_flags();
    let Some(matches) = parse(set_command(), set_args, &value_specs)? else {
        return Ok(None);
    };
    let values = values_of(&matches, &value_specs, FilterKind::Exact);
    let updates = UpdateSet::build(values.iter().map(|(f, v)| (*f, v.as_str())))
        .map_err(|e| CliError::usage(&e, &schema::render_usage(&value_specs)))?;

    Ok(Some((filters, updates)))
}

// ── Trailing global options ─────────────────────────────────────────

/// The global options alone, reading only the command line.
fn globals_command() -> Command {
    GlobalOpts::augment_args(Command::new("dpskman").no_binary_name(true))
        .mut_args(|arg| arg.env(None::<&'static str>))
}

/// If `token` is a global option, whether its value is the next token.
fn global_option(cmd: &Command, token: &str) -> Option<bool> {
    if let Some(long) = token.strip_prefix("--") {
        let (name, inline) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        let arg = cmd.get_arguments().find(|a| a.get_long() == Some(name))?;
        return Some(arg.get_action().takes_values() && !inline);
    }

    // Short options may be clustered (`-vvy`) or carry their value (`-ojson`).
    let cluster = token.strip_prefix('-').filter(|c| !c.is_empty())?;
    for (at, short) in cluster.char_indices() {
        let arg = cmd.get_arguments().find(|a| a.get_short() == Some(short))?;
        if arg.get_action().takes_values() {
            return Some(at + short.len_utf8() == cluster.len());
        }
    }
    Some(false)
}

fn merge_globals(global: &mut GlobalOpts, trailing: GlobalOpts) {
    let GlobalOpts {
        profile,
        controller,
        username,
        password,
        ca_cert,
        insecure,
        timeout,
        output,
        verbose,
        quiet,
        yes,
    } = trailing;

    global.profile = profile.or(global.profile.take());
    global.controller = controller.or(global.controller.take());
    global.username = username.or(global.username.take());
    global.password = password.or(global.password.take());
    global.ca_cert = ca_cert.or(global.ca_cert.take());
    global.timeout = timeout.or(global.timeout.take());
    global.output = output.or(global.output.take());
    global.insecure |= insecure;
    global.quiet |= quiet;
    global.yes |= yes;
    global.verbose = global.verbose.saturating_add(verbose);
}

/// Move global options out of `raw` field flags and into `global`.
///
/// Every field flag takes exactly one value, so a field flag and the token
/// after it are always kept together, even when that value looks like an
/// option.
pub fn hoist_globals(raw: &mut Vec<String>, global: &mut GlobalOpts) -> Result<(), CliError> {
    let field_flags: HashSet<String> = schema::filter_flags()
        .into_iter()
        .map(|spec| format!("--{}", spec.name))
        .collect();
    let cmd = globals_command();

    let mut kept = Vec::with_capacity(raw.len());
    let mut hoisted = Vec::new();
    let mut tokens = std::mem::take(raw).into_iter();
    while let Some(token) = tokens.next() {
        if field_flags.contains(&token) {
            kept.push(token);
            kept.extend(tokens.next());
            continue;
        }
        match global_option(&cmd, &token) {
            Some(takes_next) => {
                hoisted.push(token);
                if takes_next {
                    hoisted.extend(tokens.next());
                }
            }
            None => kept.push(token),
        }
    }
    *raw = kept;

    if hoisted.is_empty() {
        return Ok(());
    }
    let usage = |e: clap::Error| CliError::Usage {
        message: first_line(&e),
        usage: None,
    };
    let matches = cmd.try_get_matches_from(&hoisted).map_err(usage)?;
    let trailing = GlobalOpts::from_arg_matches(&matches).map_err(usage)?;
    tracing::debug!(options = ?hoisted, "global options after field flags");
    merge_globals(global, trailing);
    Ok(())
}

/// Apply [`hoist_globals`] to the field flags of `dpsk list` / `dpsk modify`.
pub fn hoist_trailing_globals(cli: &mut Cli) -> Result<(), CliError> {
    match &mut cli.command {
        CliCommand::Dpsk(DpskArgs {
            command: DpskCommand::List(fields) | DpskCommand::Modify(fields),
        }) => hoist_globals(&mut fields.flags, &mut cli.global),
        _ => Ok(()),
    }
}
