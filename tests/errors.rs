use std::{error::Error, path::Path};

use test_utils::check_failing_run;

#[test]
fn reject_bool_receiving_numeric() -> Result<(), Box<dyn Error>> {
    check_failing_run(Path::new("./demos/bool_mismatch.sluc"))
}

#[test]
fn reject_duplicate_declaration() -> Result<(), Box<dyn Error>> {
    check_failing_run(Path::new("./demos/duplicate.sluc"))
}

#[test]
fn reject_reference_before_assignment() -> Result<(), Box<dyn Error>> {
    check_failing_run(Path::new("./demos/unknown_name.sluc"))
}

#[test]
fn abort_on_division_by_zero() -> Result<(), Box<dyn Error>> {
    check_failing_run(Path::new("./demos/division_by_zero.sluc"))
}
