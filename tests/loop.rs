use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/countdown.sluc";
const EXPECTED: Expected = Expected {
    stdout: "5\n4\n3\n2\n1\n",
    stderr: "",
};

#[test]
fn interpret_countdown() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
