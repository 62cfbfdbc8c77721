use std::collections::HashSet;
use std::ffi::OsString;

use clap::builder::ValueRange;
use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory};
use thiserror::Error;
use tracing::debug;

use crate::cli::Args;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    ExactlyOne,
    ZeroOrOne,
    OneOrMore,
    ZeroOrMore,
}

impl Arity {
    pub fn is_multi(self) -> bool {
        matches!(self, Arity::OneOrMore | Arity::ZeroOrMore)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Single,
    List,
    Flag,
}

/// One recognised `--flag` of the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDecl {
    pub name: String,
    pub description: String,
    pub arity: Arity,
    pub required: bool,
    pub kind: ValueKind,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("option '--{0}' is declared more than once")]
    DuplicateName(String),

    #[error("argument '{0}' has no long flag; positional arguments are not accepted")]
    Unnamed(String),

    #[error("option '--{name}' uses unsupported action {action}")]
    UnsupportedAction { name: String, action: String },

    #[error("option '--{name}' is a {kind:?} value but has arity {arity:?}")]
    KindArityMismatch {
        name: String,
        kind: ValueKind,
        arity: Arity,
    },
}

/// The immutable command-line schema, built once at process start and
/// handed to whoever needs to parse against it.
#[derive(Debug, Clone)]
pub struct Surface {
    command: Command,
    declarations: Vec<OptionDecl>,
}

impl Surface {
    pub fn new() -> Result<Self, SurfaceError> {
        Self::from_command(Args::command())
    }

    pub fn from_command(mut command: Command) -> Result<Self, SurfaceError> {
        command.build();

        let declarations = command
            .get_arguments()
            .filter(|arg| !is_builtin(arg))
            .map(declaration_of)
            .collect::<Result<Vec<_>, _>>()?;
        validate(&declarations)?;

        debug!(
            options = ?declarations.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            "command surface ready"
        );
        Ok(Self {
            command,
            declarations,
        })
    }

    pub fn declarations(&self) -> &[OptionDecl] {
        &self.declarations
    }

    pub fn declaration(&self, name: &str) -> Option<&OptionDecl> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// Strict parse: every token must be a declared flag or a value consumed
    /// by one, and all required options must be present. Nothing is
    /// extracted from the matches here.
    pub fn parse<I, T>(&self, tokens: I) -> Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.command.clone().try_get_matches_from(tokens)
    }
}

fn is_builtin(arg: &Arg) -> bool {
    matches!(
        arg.get_action(),
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
    )
}

fn is_boolean(arg: &Arg) -> bool {
    let mut names: Vec<String> = arg
        .get_possible_values()
        .iter()
        .map(|v| v.get_name().to_string())
        .collect();
    names.sort();
    names == ["false", "true"]
}

fn declaration_of(arg: &Arg) -> Result<OptionDecl, SurfaceError> {
    let name = arg
        .get_long()
        .ok_or_else(|| SurfaceError::Unnamed(arg.get_id().as_str().to_string()))?
        .to_string();
    let range = arg.get_num_args().unwrap_or(ValueRange::SINGLE);
    let action = arg.get_action();

    let kind = match action {
        ArgAction::Append => ValueKind::List,
        ArgAction::SetTrue | ArgAction::SetFalse => ValueKind::Flag,
        ArgAction::Set if is_boolean(arg) => ValueKind::Flag,
        ArgAction::Set => ValueKind::Single,
        other => {
            return Err(SurfaceError::UnsupportedAction {
                name,
                action: format!("{other:?}"),
            })
        }
    };

    let required = arg.is_required_set();
    let multi = matches!(action, ArgAction::Append) || range.max_values() > 1;
    let arity = match (multi, required) {
        (true, true) => Arity::OneOrMore,
        (true, false) => Arity::ZeroOrMore,
        (false, true) => Arity::ExactlyOne,
        (false, false) => Arity::ZeroOrOne,
    };

    Ok(OptionDecl {
        name,
        description: arg.get_help().map(|h| h.to_string()).unwrap_or_default(),
        arity,
        required,
        kind,
    })
}

pub(crate) fn validate(declarations: &[OptionDecl]) -> Result<(), SurfaceError> {
    let mut seen = HashSet::new();
    for decl in declarations {
        if !seen.insert(decl.name.as_str()) {
            return Err(SurfaceError::DuplicateName(decl.name.clone()));
        }

        let consistent = match decl.kind {
            ValueKind::List => decl.arity.is_multi(),
            ValueKind::Single | ValueKind::Flag => !decl.arity.is_multi(),
        };
        if !consistent {
            return Err(SurfaceError::KindArityMismatch {
                name: decl.name.clone(),
                kind: decl.kind,
                arity: decl.arity,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(argv: &[&str]) -> Result<ArgMatches, clap::Error> {
        let surface = Surface::new().unwrap();
        surface.parse(std::iter::once("genapi").chain(argv.iter().copied()))
    }

    #[test]
    fn test_declares_exactly_the_expected_options() {
        let surface = Surface::new().unwrap();
        let got: Vec<(&str, Arity, bool, ValueKind)> = surface
            .declarations()
            .iter()
            .map(|d| (d.name.as_str(), d.arity, d.required, d.kind))
            .collect();

        assert_eq!(
            got,
            vec![
                ("assembly", Arity::OneOrMore, true, ValueKind::List),
                ("assembly-reference", Arity::ZeroOrMore, false, ValueKind::List),
                ("exclude-attributes-file", Arity::ZeroOrMore, false, ValueKind::List),
                ("output-path", Arity::ZeroOrOne, false, ValueKind::Single),
                ("header-file", Arity::ZeroOrOne, false, ValueKind::Single),
                ("exception-message", Arity::ZeroOrOne, false, ValueKind::Single),
                ("include-visible-outside", Arity::ZeroOrOne, false, ValueKind::Flag),
            ]
        );
    }

    #[test]
    fn test_declarations_carry_help_text() {
        let surface = Surface::new().unwrap();
        let assembly = surface.declaration("assembly").unwrap();
        assert!(assembly.description.contains("assemblies"));
        assert!(surface.declaration("help").is_none());
    }

    #[test]
    fn test_unknown_flag_rejected_in_any_position() {
        let cases: [&[&str]; 3] = [
            &["--unknown-flag", "foo", "--assembly", "a.dll"],
            &["--assembly", "a.dll", "--unknown-flag", "foo"],
            &["--output-path", "out", "--unknown-flag", "--assembly", "a.dll"],
        ];
        for argv in cases {
            let err = parse(argv).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownArgument, "{argv:?}");
            assert!(err.to_string().contains("--unknown-flag"));
        }
    }

    #[test]
    fn test_stray_value_rejected() {
        let err = parse(&["--output-path", "out", "stray", "--assembly", "a.dll"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.to_string().contains("stray"));
    }

    #[test]
    fn test_missing_assembly_is_distinct_error() {
        let err = parse(&["--output-path", "out"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_assembly_without_value_rejected() {
        assert!(parse(&["--assembly"]).is_err());
    }

    #[test]
    fn test_empty_segment_rejected_at_parse_time() {
        let err = parse(&["--assembly", "a.dll,,b.dll"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_multi_value_single_option_is_inconsistent() {
        let command = Command::new("bad").arg(
            Arg::new("path")
                .long("path")
                .num_args(1..)
                .action(ArgAction::Set),
        );
        let err = Surface::from_command(command).unwrap_err();
        assert!(matches!(err, SurfaceError::KindArityMismatch { .. }));
    }

    #[test]
    fn test_positional_argument_is_rejected() {
        let command = Command::new("bad").arg(Arg::new("input"));
        assert_eq!(
            Surface::from_command(command).unwrap_err(),
            SurfaceError::Unnamed("input".to_string())
        );
    }

    #[test]
    fn test_duplicate_names_detected() {
        let decl = OptionDecl {
            name: "assembly".to_string(),
            description: String::new(),
            arity: Arity::OneOrMore,
            required: true,
            kind: ValueKind::List,
        };
        assert_eq!(
            validate(&[decl.clone(), decl]),
            Err(SurfaceError::DuplicateName("assembly".to_string()))
        );
    }
}
