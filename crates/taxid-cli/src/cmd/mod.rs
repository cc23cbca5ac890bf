/// Command module for the `taxid` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod company_number;
pub mod rules;
pub mod screen;
pub mod validate;
