use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/expressions.sluc";
const EXPECTED: Expected = Expected {
    stdout: "7\n9\n3\n3.5\n2\n",
    stderr: "",
};

#[test]
fn interpret_expressions() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
