//! Version command implementation

use anyhow::Result;

use crate::cli::Output;
use crate::VERSION;

/// Execute the version command
pub fn execute(output: &Output) -> Result<()> {
    output.header(env!("CARGO_PKG_NAME"));
    output.key_value("Version:", VERSION, true);
    output.key_value("Description:", env!("CARGO_PKG_DESCRIPTION"), false);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        false,
    );
    output.blank_line();
    output.success("Run 'hookgate --help' for usage information");
    Ok(())
}
