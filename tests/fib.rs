use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/fib.sluc";
const EXPECTED: Expected = Expected {
    stdout: "6765\n",
    stderr: "",
};

#[test]
fn interpret_fib() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
