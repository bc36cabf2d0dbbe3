use std::{fs, io::Cursor};

use rill::{HostIo, Session, SharedWriter};
use walkdir::WalkDir;

#[test]
fn script_corpus_matches_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| {
                                         e.path().extension().is_some_and(|ext| ext == "rill")
                                     })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let expected_path = path.with_extension("expected");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                           panic!("Missing expected output {expected_path:?}: {e}")
                       });

        let writer = SharedWriter::new();
        let io = HostIo::new(Box::new(Cursor::new(Vec::new())), Box::new(writer.clone()));
        let mut session = Session::new(io);
        session.run(&source);

        assert!(!session.had_error() && !session.had_runtime_error(),
                "script {path:?} failed: {:?}",
                session.drain_diagnostics());
        assert_eq!(writer.contents(), expected, "script {path:?}");

        count += 1;
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}
