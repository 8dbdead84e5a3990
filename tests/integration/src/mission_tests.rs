//! Mission-based Integration Tests
//!
//! Each mission exercises one guarantee of the stripping workflow across
//! crate boundaries, against real files in temporary directories.

use std::fs;

use symfield_blocks::{FieldMatcher, scan, strip_field};
use symfield_core::{
    BatchDriver, Error, FileOutcome, FileRewriter, StripConfig, UnbalancedPolicy,
};
use symfield_fs::NormalizedPath;
use symfield_test_utils::TestLibrary;
use symfield_test_utils::fixtures::{
    LED_PLAIN, RESISTOR_STRIPPED, RESISTOR_WITH_FITPART, property_block, symbol_library, to_crlf,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn rewriter(field: &str) -> FileRewriter {
    FileRewriter::new(StripConfig::for_field(field)).unwrap()
}

fn normalized(lib: &TestLibrary, rel: &str) -> NormalizedPath {
    NormalizedPath::new(lib.path(rel))
}

// =============================================================================
// Mission 1: Block Scanning
// =============================================================================

mod m1_scanning {
    use super::*;

    /// M1.1: a one-line block is a complete occurrence
    #[test]
    fn m1_1_single_line_block_document_becomes_empty() {
        assert_eq!(strip_field("(property \"X\" \"v\")\n", "X").unwrap(), "");
    }

    /// M1.2: nested interior parentheses keep the block open until depth
    /// returns to zero
    #[test]
    fn m1_2_nested_block_removed_entirely() {
        let text = RESISTOR_WITH_FITPART;
        assert_eq!(strip_field(text, "FitPart").unwrap(), RESISTOR_STRIPPED);
    }

    /// M1.3: two occurrences removed independently, a different field
    /// between them survives
    #[test]
    fn m1_3_adjacent_blocks_with_survivor_between() {
        let props: &[(&str, &str)] = &[("FitPart", "A"), ("Value", "10k"), ("FitPart", "B")];
        let text = symbol_library(&[("R", props)]);

        let stripped = strip_field(&text, "FitPart").unwrap();

        let survivor: &[(&str, &str)] = &[("Value", "10k")];
        assert_eq!(stripped, symbol_library(&[("R", survivor)]));
    }

    /// M1.4: the field name inside a value does not open a block
    #[test]
    fn m1_4_field_name_in_value_is_not_a_marker() {
        let text = "(lib\n(property \"Description\" \"see FitPart docs\")\n)\n";
        assert_eq!(strip_field(text, "FitPart").unwrap(), text);
    }

    /// M1.5: matching ignores case of the field name and keyword
    #[test]
    fn m1_5_case_insensitive_marker() {
        let text = format!("(lib\n{})\n", property_block("FITPART", "1"));
        let matcher = FieldMatcher::new("fitpart").unwrap();
        assert_eq!(scan(&text, &matcher).occurrences.len(), 1);
    }

    /// M1.6: CRLF terminators survive on untouched lines
    #[test]
    fn m1_6_crlf_preserved_in_memory() {
        let text = to_crlf(RESISTOR_WITH_FITPART);
        let stripped = strip_field(&text, "FitPart").unwrap();
        assert_eq!(stripped, to_crlf(RESISTOR_STRIPPED));
    }
}

// =============================================================================
// Mission 2: Single-File Safety
// =============================================================================

mod m2_rewrite {
    use super::*;

    /// M2.1: backup equals pre-run content whether or not anything changed
    #[test]
    fn m2_1_backup_invariant() {
        let lib = TestLibrary::new();
        lib.write("Device.kicad_sym", RESISTOR_WITH_FITPART);
        lib.write("LED.kicad_sym", LED_PLAIN);

        let r = rewriter("FitPart");
        assert!(r.rewrite(&normalized(&lib, "Device.kicad_sym")).unwrap().is_modified());
        assert!(!r.rewrite(&normalized(&lib, "LED.kicad_sym")).unwrap().is_modified());

        lib.assert_bytes("Device.kicad_sym.bak", RESISTOR_WITH_FITPART);
        lib.assert_bytes("LED.kicad_sym.bak", LED_PLAIN);
    }

    /// M2.2: no-op files keep their bytes and modification time
    #[test]
    fn m2_2_noop_write_leaves_file_untouched() {
        let lib = TestLibrary::new();
        let crlf = to_crlf(LED_PLAIN);
        let path = lib.write("LED.kicad_sym", &crlf);
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let outcome = rewriter("FitPart")
            .rewrite(&normalized(&lib, "LED.kicad_sym"))
            .unwrap();

        assert!(matches!(outcome, FileOutcome::Unchanged { .. }));
        lib.assert_bytes("LED.kicad_sym", &crlf);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    /// M2.3: modified files are written with normalized terminators
    #[test]
    fn m2_3_modified_file_uses_lf() {
        let lib = TestLibrary::new();
        lib.write("Device.kicad_sym", to_crlf(RESISTOR_WITH_FITPART));

        rewriter("FitPart")
            .rewrite(&normalized(&lib, "Device.kicad_sym"))
            .unwrap();

        lib.assert_bytes("Device.kicad_sym", RESISTOR_STRIPPED);
        lib.assert_bytes("Device.kicad_sym.bak", to_crlf(RESISTOR_WITH_FITPART));
    }

    /// M2.4: invalid UTF-8 is replaced, not fatal
    #[test]
    fn m2_4_invalid_utf8_tolerated() {
        let lib = TestLibrary::new();
        let mut bytes = b"(lib\n(property \"Value\" \"\xff\")\n".to_vec();
        bytes.extend_from_slice(b"(property \"FitPart\" \"1\")\n)\n");
        lib.write("Odd.kicad_sym", &bytes);

        let outcome = rewriter("FitPart")
            .rewrite(&normalized(&lib, "Odd.kicad_sym"))
            .unwrap();

        assert!(outcome.is_modified());
        lib.assert_bytes("Odd.kicad_sym.bak", &bytes);
        assert_eq!(
            lib.read("Odd.kicad_sym"),
            "(lib\n(property \"Value\" \"\u{FFFD}\")\n)\n"
        );
    }

    /// M2.5: an unterminated block is either consumed to EOF or refused
    #[test]
    fn m2_5_unterminated_policies() {
        let broken = "(lib\n(property \"FitPart\" \"x\"\n  (at 0 0)\n";

        let lib = TestLibrary::new();
        lib.write("A.kicad_sym", broken);
        let refuse = FileRewriter::new(StripConfig {
            on_unbalanced: UnbalancedPolicy::Refuse,
            ..StripConfig::for_field("FitPart")
        })
        .unwrap();

        let err = refuse.rewrite(&normalized(&lib, "A.kicad_sym")).unwrap_err();
        assert!(matches!(err, Error::UnbalancedBlock { line: 2, .. }));
        lib.assert_bytes("A.kicad_sym", broken);

        let outcome = rewriter("FitPart")
            .rewrite(&normalized(&lib, "A.kicad_sym"))
            .unwrap();
        assert!(matches!(
            outcome,
            FileOutcome::Modified { unterminated: true, .. }
        ));
        lib.assert_bytes("A.kicad_sym", "(lib\n");
    }
}

// =============================================================================
// Mission 3: Batch Processing
// =============================================================================

mod m3_batch {
    use super::*;

    /// M3.1: one failing file does not stop the others
    #[test]
    fn m3_1_failure_isolated() {
        let lib = TestLibrary::new();
        lib.write("A.kicad_sym", RESISTOR_WITH_FITPART);
        lib.write("B.kicad_sym", RESISTOR_WITH_FITPART);
        lib.write("C.kicad_sym", RESISTOR_WITH_FITPART);
        fs::create_dir(lib.path("B.kicad_sym.bak")).unwrap();

        let driver = BatchDriver::new(StripConfig::default()).unwrap();
        let report = driver.run(&NormalizedPath::new(lib.root())).unwrap();

        assert_eq!(report.modified(), 2);
        assert_eq!(report.errors(), 1);
        assert!(!report.success());
        lib.assert_bytes("A.kicad_sym", RESISTOR_STRIPPED);
        lib.assert_bytes("B.kicad_sym", RESISTOR_WITH_FITPART);
        lib.assert_bytes("C.kicad_sym", RESISTOR_STRIPPED);
    }

    /// M3.2: dry run leaves the directory exactly as it was
    #[test]
    fn m3_2_dry_run_touches_nothing() {
        let lib = TestLibrary::new();
        lib.write("A.kicad_sym", RESISTOR_WITH_FITPART);

        let config = StripConfig {
            dry_run: true,
            ..StripConfig::default()
        };
        let report = BatchDriver::new(config)
            .unwrap()
            .run(&NormalizedPath::new(lib.root()))
            .unwrap();

        assert_eq!(report.modified(), 1);
        assert_eq!(lib.list_files(), vec!["A.kicad_sym"]);
        lib.assert_bytes("A.kicad_sym", RESISTOR_WITH_FITPART);
        match &report.files[0].outcome {
            FileOutcome::Modified { diff: Some(diff), .. } => {
                assert!(diff.contains("-\t\t(property \"FitPart\" \"Yes\""));
            }
            other => panic!("expected a diff, got {:?}", other),
        }
    }

    /// M3.3: a missing root is the only error that aborts a run
    #[test]
    fn m3_3_missing_root_aborts() {
        let lib = TestLibrary::new();
        let driver = BatchDriver::new(StripConfig::default()).unwrap();
        let result = driver.run(&normalized(&lib, "missing"));
        assert!(result.is_err());
    }
}
