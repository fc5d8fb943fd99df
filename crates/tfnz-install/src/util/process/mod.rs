use crate::prelude::*;
use crate::{fatal, Result};
use std::process::Stdio;

/// Limit for the amount of stderr output quoted in the error message
const MAX_STDERR_CHARS: usize = 2000;

/// Runs the program to completion and returns its stdout. Non-zero exit status
/// is an error that quotes the captured stderr of the program.
pub(crate) async fn run(program: &str, args: &[&str]) -> Result<Vec<u8>> {
    let display_args = shlex::try_join(args.iter().copied()).fatal_ctx(|| {
        format!("Couldn't run program that contains a nul byte: {program:?} {args:?}")
    })?;

    let display_cmd = format!("{program} {display_args}");
    debug!(
        cmd = %display_cmd,
        "Running program"
    );

    let output = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .fatal_ctx(|| format!("Invocation failed. Command:\n`{display_cmd}`"))?;

    let status = output.status;

    if !status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = truncate_tail(stderr.trim(), MAX_STDERR_CHARS);

        return Err(fatal!(
            "{program} invocation failed with {status}. Command:\n\
            `{display_cmd}`\n\
            Stderr:\n{stderr}"
        ));
    }

    Ok(output.stdout)
}

/// The last lines of the output are usually the most relevant ones
fn truncate_tail(text: &str, max_chars: usize) -> &str {
    let Some((start, char)) = text.char_indices().rev().nth(max_chars) else {
        return text;
    };
    &text[start + char.len_utf8()..]
}
