use crate::error::GominError;
use crate::history::{release_of, History};

const GO1_16: &str = "\
pkg io/fs, type FS interface { Open }
pkg io/fs, func ValidPath(string) bool
pkg os, func ReadFile(string) ([]uint8, error)
pkg embed, method (FS) Open(string) (fs.File, error)
pkg net/http, type Server struct, ReadHeaderTimeout time.Duration
";

const GO1_18: &str = "\
# comment lines are skipped

pkg net/netip, type Addr struct
pkg sync/atomic, method (*Pointer[$0]) Load() *$0
pkg os, func ReadFile(string) ([]uint8, error)
pkg go/ast, type IndexListExpr struct, Indices []Expr
pkg syscall (windows-386), const WSAECONNRESET = 10054
pkg syscall (windows-386), const WSAECONNRESET Errno
pkg crypto/tls, type ConnectionState struct, Unused0 bool //deprecated
pkg context, type Ctx interface, Deadline() (time.Time, bool)
pkg os/exec, type Unexp interface, unexported methods
pkg log, var Default *Logger
";

fn sample() -> History {
    History::from_releases([(18, GO1_18), (16, GO1_16)], 18).unwrap()
}

#[test]
fn test_functions_and_types_are_registered() {
    let history = sample();
    assert_eq!(history.lookup("io/fs", "ValidPath", None), Some(16));
    assert_eq!(history.lookup("net/netip", "Addr", None), Some(18));
    assert_eq!(history.lookup("log", "Default", None), Some(18));
    assert_eq!(history.lookup("syscall", "WSAECONNRESET", None), Some(18));
    assert_eq!(history.latest(), 18);
}

#[test]
fn test_members_are_registered_under_their_owner() {
    let history = sample();
    assert_eq!(history.lookup("embed", "Open", Some("FS")), Some(16));
    assert_eq!(history.lookup("sync/atomic", "Load", Some("Pointer")), Some(18));
    assert_eq!(
        history.lookup("net/http", "ReadHeaderTimeout", Some("Server")),
        Some(16)
    );
    assert_eq!(history.lookup("go/ast", "Indices", Some("IndexListExpr")), Some(18));
    // A member is not a top-level identifier
    assert_eq!(history.lookup("embed", "Open", None), None);
}

#[test]
fn test_interface_shapes_register_type_and_methods() {
    let history = sample();
    assert_eq!(history.lookup("io/fs", "FS", None), Some(16));
    assert_eq!(history.lookup("io/fs", "Open", Some("FS")), Some(16));
    assert_eq!(history.lookup("context", "Ctx", None), Some(18));
    assert_eq!(history.lookup("context", "Deadline", Some("Ctx")), Some(18));
    assert_eq!(history.lookup("os/exec", "Unexp", None), Some(18));
}

#[test]
fn test_earliest_release_wins() {
    let history = sample();
    assert_eq!(history.lookup("os", "ReadFile", None), Some(16));
}

#[test]
fn test_reregistering_is_a_no_op() {
    let mut history = History::new();
    history.register("p", None, "Q", 16);
    history.register("p", None, "Q", 20);
    history.register("p", Some("T"), "M", 17);
    history.register("p", Some("T"), "M", 19);
    assert_eq!(history.lookup("p", "Q", None), Some(16));
    assert_eq!(history.lookup("p", "M", Some("T")), Some(17));
}

#[test]
fn test_deprecated_lines_are_skipped() {
    let history = sample();
    assert_eq!(
        history.lookup("crypto/tls", "Unused0", Some("ConnectionState")),
        None
    );
}

#[test]
fn test_unknown_symbols_are_absent() {
    let history = sample();
    assert_eq!(history.lookup("io/fs", "Nope", None), None);
    assert_eq!(history.lookup("nope", "ValidPath", None), None);
    assert_eq!(history.lookup("embed", "Open", Some("Other")), None);
}

#[test]
fn test_malformed_line_names_file_and_line() {
    let text = "pkg os, func Getpid() int\npkg os, something odd\n";
    let err = History::from_releases([(3, text)], 3).unwrap_err();
    match err {
        GominError::MalformedHistory { file, line, text } => {
            assert_eq!(file, "go1.3.txt");
            assert_eq!(line, 2);
            assert_eq!(text, "pkg os, something odd");
        }
        other => panic!("expected MalformedHistory, got {:?}", other),
    }
}

#[test]
fn test_current_release_must_match_history() {
    let err = History::from_releases([(16, GO1_16)], 17).unwrap_err();
    assert!(matches!(
        err,
        GominError::HistoryVersionMismatch {
            history: 16,
            current: 17
        }
    ));
}

#[test]
fn test_package_history_counts_entries() {
    let history = sample();
    let fs = history.package("io/fs").unwrap();
    assert_eq!(fs.len(), 3);
    assert!(!fs.is_empty());
    assert!(history.package("absent").is_none());
}

#[test]
fn test_release_file_names() {
    assert_eq!(release_of("go1.9.txt"), Some(9));
    assert_eq!(release_of("go1.10.txt"), Some(10));
    assert_eq!(release_of("go1.txt"), None);
    assert_eq!(release_of("next.txt"), None);
    assert_eq!(release_of("go1.x.txt"), None);
    assert_eq!(release_of("go1.21.txt.bak"), None);
}

#[test]
fn test_empty_history() {
    let history = History::default();
    assert!(history.is_empty());
    assert_eq!(history.latest(), 0);
    assert!(history.verify_current(0).is_ok());
}

#[test]
fn test_register_extends_latest() {
    let mut history = History::from_releases([(20, "pkg p, func A()\n")], 20).unwrap();
    history.register("p", None, "B", 24);
    history.register("p", None, "C", 22);
    assert_eq!(history.latest(), 24);
    assert_eq!(history.lookup("p", "C", None), Some(22));
    assert!(history.verify_current(24).is_ok());
}
