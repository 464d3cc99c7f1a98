use std::{error::Error, path::Path};

use test_utils::{check_run, Expected};

const SRC_PATH: &str = "./demos/scientific.sluc";
const EXPECTED: Expected = Expected {
    stdout: "150.0\n3000\n0.25\n",
    stderr: "",
};

#[test]
fn interpret_scientific_notation() -> Result<(), Box<dyn Error>> {
    check_run(Path::new(SRC_PATH), EXPECTED)
}
