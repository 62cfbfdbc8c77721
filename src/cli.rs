use std::path::PathBuf;

use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::debug;

use crate::paths::{path_list_token, split_path_list};

#[derive(Parser, Debug)]
#[command(name = "genapi", author, version, long_about = None)]
#[command(about = "Generate the public API surface of .NET assemblies as source")]
pub struct Args {
    /// The path to one or more assemblies or directories with assemblies (can be repeated or comma separated)
    #[arg(long, required = true, num_args = 1.., value_name = "PATH", value_parser = path_list_token)]
    pub assembly: Vec<String>,

    /// Paths to assembly references or their underlying directories for a specific target framework in the package
    #[arg(long, num_args = 0.., value_name = "PATH", value_parser = path_list_token)]
    pub assembly_reference: Option<Vec<String>>,

    /// The path to one or more attribute exclusion files with types in DocId format
    #[arg(long, num_args = 0.., value_name = "PATH", value_parser = path_list_token)]
    pub exclude_attributes_file: Option<Vec<String>>,

    /// Output path. Default is the console. An existing directory gets one file per assembly, named after the assembly
    #[arg(long, value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// A file with alternate header content to prepend to the output
    #[arg(long, value_name = "PATH")]
    pub header_file: Option<PathBuf>,

    /// If specified, method bodies throw PlatformNotSupportedException with this message, else `throw null`
    #[arg(long, value_name = "MESSAGE")]
    pub exception_message: Option<String>,

    /// Include internal API's
    #[arg(
        long,
        num_args = 0..=1,
        action = ArgAction::Set,
        default_value_t = false,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub include_visible_outside: bool,
}

/// Everything the generation engine needs for one run.
///
/// `None` always means "not given on the command line"; an option given
/// with no values is `Some` of an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenApiConfig {
    pub assemblies: Vec<PathBuf>,
    pub assembly_references: Option<Vec<PathBuf>>,
    pub output_path: Option<PathBuf>,
    pub header_file: Option<PathBuf>,
    pub exception_message: Option<String>,
    pub exclude_attributes_files: Option<Vec<PathBuf>>,
    pub include_visible_outside_of_assembly: bool,
}

pub fn build_config(args: &Args) -> GenApiConfig {
    let config = GenApiConfig {
        assemblies: split_path_list(&args.assembly),
        assembly_references: args.assembly_reference.as_deref().map(split_path_list),
        output_path: args.output_path.clone(),
        header_file: args.header_file.clone(),
        exception_message: args.exception_message.clone(),
        exclude_attributes_files: args.exclude_attributes_file.as_deref().map(split_path_list),
        include_visible_outside_of_assembly: args.include_visible_outside,
    };

    debug!(?config, "built configuration");
    config
}
