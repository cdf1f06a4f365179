//! # Script File Tests
//!
//! Runs command scripts from disk the way the binary does.

use std::fs::File;
use std::io::{BufReader, Write};

use quasar_node::{NodeRuntime, RunSummary};
use quasar_registry::{CurrencyRegistryApi, Price, RegistryConfig};
use shared_types::Address;

const ADMIN: Address = Address::repeat_byte(0x42);

fn write_script(lines: &[String]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn run_file(runtime: &mut NodeRuntime, path: &std::path::Path) -> (RunSummary, Vec<String>) {
    let reader = BufReader::new(File::open(path).unwrap());
    let mut output = Vec::new();
    let summary = runtime.run_script(reader, &mut output).unwrap();
    let lines = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (summary, lines)
}

#[test]
fn test_price_feed_from_file() {
    let admin = ADMIN.to_hex();
    let mut lines = vec![
        format!(r#"{{"op":"create","caller":"{admin}","name":"Alpha","symbol":"ALP"}}"#),
        format!(r#"{{"op":"create","caller":"{admin}","name":"Beta","symbol":"BET"}}"#),
    ];
    for (id, price) in [(1, "100"), (2, "7"), (1, "115792089237316195423570985008687907853269984665640564039457584007913129639935")] {
        lines.push(format!(
            r#"{{"op":"push_price","caller":"{admin}","id":{id},"price":"{price}"}}"#
        ));
    }
    lines.push(format!(
        r#"{{"op":"update","caller":"{admin}","id":2,"name":"Beta","symbol":"BETA"}}"#
    ));
    let script = write_script(&lines);

    let mut runtime = NodeRuntime::new(RegistryConfig::new(ADMIN)).unwrap();
    let (summary, output) = run_file(&mut runtime, script.path());

    assert_eq!(summary.applied, 6);
    assert_eq!(output.len(), 6);
    assert!(output.iter().all(|l| !l.contains("rejected")));

    let registry = runtime.registry();
    assert_eq!(registry.get_price(1), Ok(Price::MAX));
    assert_eq!(registry.get_metadata(2).unwrap().symbol, "BETA");

    let alpha = runtime.indexer().currency(1).unwrap();
    assert_eq!(alpha.price_history, vec![Price::from(100u64), Price::MAX]);
    let beta = runtime.indexer().currency(2).unwrap();
    assert_eq!(beta.metadata_history.len(), 2);
}

#[test]
fn test_rejections_reported_per_line() {
    let admin = ADMIN.to_hex();
    let stranger = Address::repeat_byte(0x01).to_hex();
    let script = write_script(&[
        format!(r#"{{"op":"create","caller":"{admin}","name":"","symbol":"X"}}"#),
        format!(r#"{{"op":"create","caller":"{stranger}","name":"X","symbol":"X"}}"#),
        format!(r#"{{"op":"update","caller":"{admin}","id":1,"name":"X","symbol":"X"}}"#),
        format!(r#"{{"op":"transfer_administrator","caller":"{admin}","new_admin":"{}"}}"#, Address::ZERO.to_hex()),
    ]);

    let mut runtime = NodeRuntime::new(RegistryConfig::new(ADMIN)).unwrap();
    let (summary, output) = run_file(&mut runtime, script.path());

    assert_eq!(summary.rejected, 4);
    assert_eq!(summary.applied, 0);

    let reasons: Vec<String> = output
        .iter()
        .map(|l| {
            let value: serde_json::Value = serde_json::from_str(l).unwrap();
            value["reason"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            "Quasar: name cannot be blank",
            "Ownable: caller is not the owner",
            "Quasar: currency should exist",
            "Ownable: new owner is the zero address",
        ]
    );
    assert_eq!(runtime.indexer().events_applied(), 0);
    assert_eq!(runtime.stats().unauthorized_requests, 1);
}
