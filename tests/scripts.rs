use std::{fs, io, path::Path};

use pretty_assertions::assert_eq;
use scriptit::{
    interpreter::{evaluator::core::Context, io::SharedOutput},
    run_program,
};
use walkdir::WalkDir;

/// Runs a script the way the command line does: program output first, then
/// `Error: <message>` if the program failed.
fn transcript(path: &Path) -> String {
    let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
    let output = SharedOutput::new();
    let mut context = Context::with_io(output.clone(), io::empty());

    let mut transcript = match run_program(&source, &mut context) {
        Ok(()) => output.contents(),
        Err(e) => format!("{}Error: {e}\n", output.contents()),
    };
    if !transcript.ends_with('\n') && !transcript.is_empty() {
        transcript.push('\n');
    }
    transcript
}

#[test]
fn scripts_match_expected_output() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").sort_by_file_name()
                                              .into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| e.path().extension().is_some_and(|ext| ext == "sit"))
    {
        let script = entry.path();
        let expected_path = script.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Missing expected output {expected_path:?}: {e}")
                                                         });

        count += 1;
        assert_eq!(transcript(script), expected, "output of {script:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}
