use std::path::PathBuf;

use pretty_assertions::assert_eq;
use reprise_core::{AdapterKind, TestClass, TestIndex};
use reprise_discovery::{failed_tests_suite, AssemblyConfig};
use tempfile::TempDir;

use crate::support::{collect_ids, write_file};

const CONSOLE_LOG: &str = "\
[junit] Running com.acme.FooTest
[junit] Tests run: 3, Failures: 1, Errors: 0,
[junit] Running com.acme.FooTest
[junit] Tests run: 3, Failures: 0, Errors: 0,
[junit] Running com.acme.OkTest
[junit] Tests run: 5, Failures: 0, Errors: 0,
[worker1] com.acme.GradleTest > someMethod FAILED
[worker2] com.acme.jython/ScriptTest > run FAILED
[junit] Running com.acme.ErrTest
[junit] Tests run: 1, Failures: 0, Errors: 2,
";

fn sample_index() -> TestIndex {
    let mut index = TestIndex::new();
    index
        .register(TestClass::legacy("com.acme.FooTest").with_methods(["testFoo"]))
        .register(TestClass::legacy("com.acme.OkTest"))
        .register(TestClass::annotated("com.acme.GradleTest"))
        .register(TestClass::legacy("com.acme.ErrTest"))
        .register(TestClass::annotated("com.acme.BazTest"));
    index
}

#[test]
fn combines_log_and_report_sources_into_one_deduplicated_suite() {
    let temp = TempDir::new().unwrap();
    let log = write_file(temp.path(), "consoleText", CONSOLE_LOG);
    let report = write_file(
        temp.path(),
        "TESTS-TestSuites.xml",
        r#"<testsuites><testsuite name="nightly">
             <testcase classname="com.acme.BazTest"/>
             <testcase classname="com.acme.FooTest" name="seenAgain"/>
           </testsuite></testsuites>"#,
    );

    let config = AssemblyConfig {
        log_sources: vec![log.to_string_lossy().into_owned()],
        report_files: vec![report],
        ..Default::default()
    };

    let suite = failed_tests_suite(&config, &sample_index()).unwrap();
    assert_eq!(suite.name(), "Failed JUnit tests");

    // Insertion order of first sighting: console sources before report
    // files. The passing FooTest pair adds nothing on its own and the
    // report's FooTest sighting is already processed; OkTest never failed
    // and the jython name is rejected outright.
    assert_eq!(
        collect_ids(&suite),
        vec![
            "com.acme.FooTest",
            "com.acme.GradleTest",
            "com.acme.ErrTest",
            "com.acme.BazTest",
        ]
    );

    let kinds: Vec<_> = suite.tests().map(|unit| unit.adapter_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            AdapterKind::Legacy,
            AdapterKind::Modern,
            AdapterKind::Legacy,
            AdapterKind::Modern,
        ]
    );
}

#[test]
fn unopenable_log_source_does_not_abort_the_remaining_sources() {
    let temp = TempDir::new().unwrap();
    let log = write_file(temp.path(), "consoleText", CONSOLE_LOG);

    let config = AssemblyConfig {
        log_sources: vec![
            temp.path()
                .join("no-such-consoleText")
                .to_string_lossy()
                .into_owned(),
            log.to_string_lossy().into_owned(),
        ],
        ..Default::default()
    };

    let suite = failed_tests_suite(&config, &sample_index()).unwrap();
    assert_eq!(
        collect_ids(&suite),
        vec!["com.acme.FooTest", "com.acme.GradleTest", "com.acme.ErrTest"]
    );
}

#[test]
fn report_paths_that_are_not_regular_files_are_silently_skipped() {
    let temp = TempDir::new().unwrap();
    let report = write_file(
        temp.path(),
        "TEST-com.acme.BazTest.xml",
        r#"<testsuite><testcase classname="com.acme.BazTest"/></testsuite>"#,
    );

    let config = AssemblyConfig {
        report_files: vec![
            temp.path().to_path_buf(),           // a directory
            PathBuf::from("/no/such/report.xml"), // missing
            report,
        ],
        ..Default::default()
    };

    let suite = failed_tests_suite(&config, &sample_index()).unwrap();
    assert_eq!(collect_ids(&suite), vec!["com.acme.BazTest"]);
}

#[test]
fn parse_failure_in_one_report_does_not_stop_subsequent_files() {
    let temp = TempDir::new().unwrap();
    let broken = write_file(
        temp.path(),
        "broken.xml",
        "<testsuite><open></mismatch></testsuite>",
    );
    let good = write_file(
        temp.path(),
        "good.xml",
        r#"<testsuite><testcase classname="com.acme.BazTest"/></testsuite>"#,
    );

    let config = AssemblyConfig {
        report_files: vec![broken, good],
        ..Default::default()
    };

    let suite = failed_tests_suite(&config, &sample_index()).unwrap();
    assert_eq!(collect_ids(&suite), vec!["com.acme.BazTest"]);
}

#[test]
fn no_sources_yield_an_empty_suite() {
    let suite = failed_tests_suite(&AssemblyConfig::default(), &sample_index()).unwrap();
    assert!(suite.is_empty());
    assert_eq!(suite.test_count(), 0);
}
