use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/greeting.sluc";
const EXPECTED: Expected = Expected {
    stdout: "hi\n",
    stderr: "",
};

#[test]
fn interpret_greeting() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
