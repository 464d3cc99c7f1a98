use std::{
    error::Error,
    io,
    path::Path,
    process::{Command, Output},
    str,
};

const SLUC_PATH: &str = "./target/debug/sluc";

pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

fn run_interpreter(src_path: &Path) -> Result<Output, io::Error> {
    Command::new(SLUC_PATH).arg(src_path).output()
}

/// Run a program through the interpreter binary and assert on its exact
/// output.
pub fn check_run(src_path: &Path, expected: Expected) -> Result<(), Box<dyn Error>> {
    let output = run_interpreter(src_path)?;

    expected.assert_matches(&output)?;
    assert!(
        output.status.success(),
        "sluc exited with status {:?}",
        output.status.code()
    );

    Ok(())
}

/// Run a program that must be rejected and assert the interpreter exits
/// non-zero with a line-prefixed diagnostic.
pub fn check_failing_run(src_path: &Path) -> Result<(), Box<dyn Error>> {
    let output = run_interpreter(src_path)?;

    assert!(
        !output.status.success(),
        "sluc should exit with a non-zero status"
    );

    let combined = format!(
        "{}{}",
        str::from_utf8(&output.stdout)?,
        str::from_utf8(&output.stderr)?
    );
    assert!(
        combined.contains("ERROR:"),
        "expected a diagnostic, got: {combined}"
    );

    Ok(())
}
