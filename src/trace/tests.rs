use assert_approx_eq::assert_approx_eq;

use crate::config::EngineConfig;
use crate::error::{SkipReason, TraceError};
use crate::tests::{row, trace, HEADER};
use crate::trace::{EventKind, TaskId, Trace};

#[test]
fn header_is_always_discarded() {
    // even a header that looks like a valid record is dropped
    let text = format!(
        "{}\n{}\n{}\n",
        row(0.0, "1", "Periodic", "Running"),
        row(0.1, "1", "Periodic", "Running"),
        row(0.2, "2", "Periodic", "Running")
    );
    let t = Trace::from_text(text);
    let cfg = EngineConfig::default();
    let events: Vec<_> = t.events(&cfg).collect();
    assert_eq!(events.len(), 1);
    let e = events[0].clone().unwrap();
    assert_eq!(e.task_id, "2");
    assert_approx_eq!(e.time, 0.2);
    assert_eq!(t.record_count(&cfg), 1);
}

#[test]
fn record_fields() {
    let t = trace(&[
        row(1.5, "3", "Server(Poller)", "ServerExec"),
        row(1.6, "4", "Server(Deferrable)", "ServerExec(DS)"),
        row(1.7, "5", "Aperiodic", "BackgroundRun"),
        row(2.0, "2", "FAILURE", "DEADLINE_MISS"),
        row(2.0, "-1", "Unknown", "Idle"),
    ]);
    let cfg = EngineConfig::default();
    let events: Vec<_> = t.events(&cfg).map(Result::unwrap).collect();
    let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::ServerExec,
            EventKind::ServerExecDeferred,
            EventKind::BackgroundRun,
            EventKind::DeadlineMiss,
            EventKind::Other
        ]
    );
    assert_eq!(events[0].description, "Server(Poller)");
    assert_eq!(events[1].task_id, "4");
    assert_approx_eq!(events[2].time, 1.7);
}

#[test]
fn execution_kinds() {
    assert!(EventKind::Running.is_execution());
    assert!(EventKind::ServerExec.is_execution());
    assert!(EventKind::BackgroundRun.is_execution());
    assert!(EventKind::ServerExecDeferred.is_execution());
    assert!(!EventKind::DeadlineMiss.is_execution());
    assert!(!EventKind::Other.is_execution());
    assert!(!EventKind::BackgroundRun.consumes_budget());
    assert!(EventKind::ServerExecDeferred.consumes_budget());
}

#[test]
fn malformed_lines_are_skipped() {
    let t = trace(&[
        row(0.0, "1", "Periodic", "Running"),
        "0.1\t0\t1".to_string(),
        "abc\t0\t1\tPeriodic\tRunning".to_string(),
        String::new(),
        row(0.1, "1", "Periodic", "Running"),
    ]);
    let cfg = EngineConfig::default();
    let items: Vec<_> = t.events(&cfg).collect();
    assert_eq!(items.len(), 5);

    let skipped: Vec<_> = items.iter().filter_map(|i| i.clone().err()).collect();
    assert_eq!(skipped.len(), 3);
    assert_eq!(skipped[0].line, 4);
    assert_eq!(
        skipped[0].reason,
        SkipReason::TooFewFields {
            found: 3,
            required: 5
        }
    );
    assert_eq!(
        skipped[1].reason,
        SkipReason::InvalidTime {
            text: "abc".to_string()
        }
    );
    assert_eq!(skipped[2].line, 6);

    let valid: Vec<_> = items.into_iter().filter_map(Result::ok).collect();
    assert_eq!(valid.len(), 2);
    assert_approx_eq!(valid[1].time, 0.1);
}

#[test]
fn events_are_restartable() {
    let t = trace(&[
        row(0.0, "1", "Periodic", "Running"),
        row(0.1, "2", "Periodic", "Running"),
    ]);
    let cfg = EngineConfig::default();
    let first: Vec<_> = t.events(&cfg).collect();
    let second: Vec<_> = t.events(&cfg).collect();
    assert_eq!(first, second);
}

#[test]
fn crlf_and_custom_delimiter() {
    let text = format!("{}0.0,0,1,Periodic,Running\r\n0.1,0,1,Periodic,Running\r\n", HEADER);
    let t = Trace::from_text(text);
    let cfg = EngineConfig {
        delimiter: ',',
        ..EngineConfig::default()
    };
    let events: Vec<_> = t.events(&cfg).map(Result::unwrap).collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].kind, EventKind::Running);
}

#[test]
fn missing_source() {
    let err = Trace::open("/nonexistent/rt-trace-layout/output.txt").unwrap_err();
    assert!(matches!(err, TraceError::NotFound { .. }));
}

#[test]
fn read_from_disk() {
    let path = std::env::temp_dir().join(format!("rt-trace-layout-{}.txt", std::process::id()));
    std::fs::write(&path, format!("{}{}\n", HEADER, row(0.3, "1", "Periodic", "Running"))).unwrap();
    let t = Trace::open(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let cfg = EngineConfig::default();
    let e = t.events(&cfg).next().unwrap().unwrap();
    assert_approx_eq!(e.time, 0.3);
}

#[test]
fn task_ids() {
    let id = TaskId::from("12");
    assert_eq!(id.numeric(), Some(12));
    assert_eq!(TaskId::from("-1").numeric(), Some(-1));
    assert_eq!(TaskId::from("srv").numeric(), None);
    assert_eq!(id.to_string(), "12");
    assert!(id == *"12");
}
