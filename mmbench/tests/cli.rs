use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

use assert_cmd::Command;
use predicates::prelude::*;

/// Starts a server that answers `MULTIMAP.*` with an unknown command error and everything else
/// with `+OK`, like a server without the multimap module loaded.
fn start_server() -> SocketAddr {
    start_server_with(usize::MAX)
}

/// Like [`start_server`], but each connection is closed after `replies` replies.
fn start_server_with(replies: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let stream = stream.unwrap();
            thread::spawn(move || serve(stream, replies));
        }
    });
    addr
}

fn serve(stream: TcpStream, replies: usize) {
    let mut writer = stream.try_clone().unwrap();
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    for _ in 0..replies {
        line.clear();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let argc: usize = line.trim_end().trim_start_matches('*').parse().unwrap();

        let mut argv = Vec::with_capacity(argc);
        for _ in 0..argc {
            // Bulk string length line, then the data itself. Test payloads never contain CRLF.
            line.clear();
            reader.read_line(&mut line).unwrap();
            line.clear();
            reader.read_line(&mut line).unwrap();
            argv.push(line.trim_end().to_owned());
        }

        let reply = if argv[0].to_ascii_uppercase().starts_with("MULTIMAP.") {
            format!("-ERR unknown command '{}'\r\n", argv[0])
        } else {
            "+OK\r\n".to_owned()
        };
        if writer.write_all(reply.as_bytes()).is_err() {
            return;
        }
    }
}

fn warnings(stderr: &[u8]) -> usize {
    String::from_utf8_lossy(stderr)
        .matches("Server replied with an error")
        .count()
}

fn unused_addr() -> SocketAddr {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
}

#[test]
fn help() {
    Command::cargo_bin("mmbench")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--clients"))
        .stdout(predicate::str::contains("multimap.insert"));
}

#[test]
fn zero_clients() {
    Command::cargo_bin("mmbench")
        .unwrap()
        .args(["--clients", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--clients"));
}

#[test]
fn unknown_test() {
    Command::cargo_bin("mmbench")
        .unwrap()
        .args(["--tests", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("get"));
}

#[test]
fn nothing_listening() {
    let addr = unused_addr();
    Command::cargo_bin("mmbench")
        .unwrap()
        .args(["--addr", &addr.to_string(), "--clients", "1", "--requests", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("Connecting to {addr}")));
}

#[test]
fn reports_both_commands() {
    let addr = start_server();
    Command::cargo_bin("mmbench")
        .unwrap()
        .args(["--addr", &addr.to_string(), "--clients", "4", "--requests", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "MULTIMAP.INSERT: 40 requests in",
        ))
        .stdout(predicate::str::contains(", 40 errors"))
        .stdout(predicate::str::contains("SET: 40 requests in"));
}

#[test]
fn json_reports() {
    let addr = start_server();
    let output = Command::cargo_bin("mmbench")
        .unwrap()
        .args([
            "--addr",
            &addr.to_string(),
            "--clients",
            "2",
            "--requests",
            "10",
            "--tests",
            "set",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(r#""name":"SET""#));
    assert!(lines[0].contains(r#""requests":10"#));
    assert!(lines[0].contains(r#""errors":0"#));
    assert!(lines[0].contains(r#""clients":2"#));
}

#[test]
fn connection_dropped_mid_run() {
    let addr = start_server_with(1);
    Command::cargo_bin("mmbench")
        .unwrap()
        .args(["--addr", &addr.to_string()])
        .args(["--clients", "2", "--requests", "20", "--tests", "set"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(format!("Sending SET to {addr}")));
}

#[test]
fn warns_once_per_client() {
    let addr = start_server();
    let output = Command::cargo_bin("mmbench")
        .unwrap()
        .env_remove("RUST_LOG")
        .args(["--addr", &addr.to_string()])
        .args(["--clients", "1", "--requests", "10", "--tests", "multimap.insert"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(", 10 errors"));
    assert_eq!(warnings(&output.stderr), 1);

    // A client that never got to claim a request has nothing to warn about.
    let output = Command::cargo_bin("mmbench")
        .unwrap()
        .env_remove("RUST_LOG")
        .args(["--addr", &addr.to_string()])
        .args(["--clients", "4", "--requests", "40", "--tests", "multimap.insert"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(", 40 errors"));
    assert!((1..=4).contains(&warnings(&output.stderr)));
}

#[test]
fn verbosity() {
    let addr = start_server();
    Command::cargo_bin("mmbench")
        .unwrap()
        .env_remove("RUST_LOG")
        .args(["--addr", &addr.to_string()])
        .args(["--clients", "1", "--requests", "1", "--tests", "set"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Starting benchmark"))
        .stderr(predicate::str::contains("Clients connected").not());

    Command::cargo_bin("mmbench")
        .unwrap()
        .env_remove("RUST_LOG")
        .args(["--addr", &addr.to_string(), "-v"])
        .args(["--clients", "1", "--requests", "1", "--tests", "set"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Clients connected"));
}
