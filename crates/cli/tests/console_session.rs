//! End-to-end console sessions over in-memory input/output.

use retailbank_cli::{Cli, build_console, run_with_args};

use clap::Parser;

fn session(args: &[&str], script: &str) -> String {
    let mut argv = vec!["retailbank"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    run_with_args(argv, script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn borrowing_and_repaying_between_two_accounts() {
    let out = session(
        &[],
        "login Alice\n\
         topup 100\n\
         login Bob\n\
         topup 80\n\
         pay Alice 50\n\
         pay Alice 100\n\
         topup 30\n\
         login Alice\n\
         pay Bob 30\n\
         login Bob\n\
         topup 100\n\
         exit\n",
    );

    let expected = "\
===>Welcome to Retail Bank<===
Login to do Banking.
Hello, Alice!
Your balance is 0.
Your balance is 100.
Hello, Bob!
Your balance is 0.
Your balance is 80.
Your balance is 30.
Your balance is 0.
Owing 70 to Alice.
Your balance is 0.
Owing 40 to Alice.
Hello, Alice!
Your balance is 210.
Owing 40 from Bob.
Your balance is 210.
Owing 10 from Bob.
Hello, Bob!
Your balance is 0.
Owing 10 to Alice.
Your balance is 90.
Exiting, Thanks for using the application.
";
    assert_eq!(out, expected);
}

#[test]
fn unknown_payee_is_reported_without_side_effects() {
    let out = session(&["--no-seed"], "login Bob\ntopup 20\npay Alice 10\ntopup 0\n");

    assert!(out.contains("Error: unknown account: Alice. Please try again."));
    assert!(out.ends_with("Your balance is 20.\nExiting, Thanks for using the application.\n"));
}

#[test]
fn negative_amounts_are_rejected() {
    let out = session(&[], "login Bob\ntopup -5\npay Alice -1\n");

    assert_eq!(out.matches("Error: invalid argument").count(), 2);
}

#[test]
fn json_flag_switches_output() {
    let cli = Cli::try_parse_from(["retailbank", "--json", "--no-seed"]).unwrap();
    let console = build_console(&cli).unwrap();
    assert!(console.bank().get_account("Alice").unwrap().is_none());

    let out = session(&["--json"], "login Bob\n");
    let line = out.lines().find(|l| l.starts_with('{')).unwrap();
    let summary: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(summary["id"], "Bob");
    assert_eq!(summary["balance"], 0);
}

#[test]
fn bad_flags_are_errors() {
    let mut out = Vec::new();
    assert!(run_with_args(["retailbank", "--log-format", "yaml"], "".as_bytes(), &mut out).is_err());
}
