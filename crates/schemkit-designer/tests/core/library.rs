use std::fs;
use std::io::Cursor;

use schemkit_core::LibraryError;
use schemkit_designer::{read_library, MacroLibrary};

const LIBRARY: &str = "[FIDOLIB Test parts]\n\
{Passive}\n\
[RES Resistor]\n\
LI 100 100 110 100 0\n\
RV 110 98 125 102 0\n\
{Active}\n\
[LED Light emitting diode]\n\
SA 100 100 0\n";

#[test]
fn test_read_library_grammar() {
    let macros = read_library(Cursor::new(LIBRARY), "test", "test.fcl").unwrap();
    assert_eq!(macros.len(), 2);
    assert_eq!(macros[0].key, "test.res");
    assert_eq!(macros[0].name, "Resistor");
    assert_eq!(macros[0].category, "Passive");
    assert_eq!(macros[0].library, "Test parts");
    assert!(macros[0].body.contains("RV 110 98 125 102 0"));
    assert_eq!(macros[1].category, "Active");
}

#[test]
fn test_unterminated_brackets() {
    let err = read_library(Cursor::new("{Passive\n"), "", "bad.fcl").unwrap_err();
    assert!(matches!(
        err,
        LibraryError::UnterminatedCategory { line_number: 1, .. }
    ));
    let err = read_library(Cursor::new("{P}\n[RES Resistor\n"), "", "bad.fcl").unwrap_err();
    assert!(matches!(
        err,
        LibraryError::UnterminatedMacro { line_number: 2, .. }
    ));
}

#[test]
fn test_load_dir_skips_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("FCDstdlib.fcl"), LIBRARY).unwrap();
    fs::write(dir.path().join("broken.fcl"), "{Oops\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "[IGNORED x]\n").unwrap();

    let mut library = MacroLibrary::new();
    let report = library.load_dir(dir.path()).unwrap();
    assert_eq!(report.loaded.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(library.contains("res"));
    assert!(library.contains("LED"));
    assert_eq!(library.len(), 2);
}
