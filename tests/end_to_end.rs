use std::fs;
use std::path::Path;

use tempfile::tempdir;

use zkbench_report::pipeline;
use zkbench_report::report::{now_utc, BenchReport, RunMeta};

const ARITH_HEADER: &str = "framework,category,curve,field,operation,input,ram,time,\
                            nbPhysicalCores,nbLogicalCores,count,cpu";

const CIRCUIT_HEADER: &str = "framework,category,backend,curve,circuit,input,operation,\
                              nbConstraints,nbSecret,nbPublic,ram,time,proofSize,\
                              nbPhysicalCores,nbLogicalCores,count,cpu";

fn write_log(dir: &Path, name: &str, contents: &str) {
    if let Some(parent) = dir.join(name).parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn repeated_arithmetic_trials_collapse_to_one_row() {
    let dir = tempdir().unwrap();
    write_log(
        dir.path(),
        "math/machine1/gnark.csv",
        &format!(
            "{ARITH_HEADER}\n\
             gnark,arithmetic,bn254,base,add,input_1.json,1000,50,1,1,1,x86\n\
             gnark,arithmetic,bn254,base,add,input_1.json,2000,150,1,1,1,x86\n"
        ),
    );

    let analysis = pipeline::analyse(dir.path()).unwrap();
    assert!(analysis.circuits.is_empty());
    assert!(analysis.ec.is_empty());

    let rows = analysis.arithmetics.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ram, Some(1500));
    assert_eq!(rows[0].time, Some(100));
    assert_eq!(rows[0].count, 2);
}

#[test]
fn malformed_sibling_file_only_loses_its_own_records() {
    let dir = tempdir().unwrap();
    write_log(
        dir.path(),
        "good.csv",
        &format!("{ARITH_HEADER}\ngnark,arithmetic,bn254,base,add,input_1.json,1000,50,1,1,1,x86\n"),
    );
    write_log(dir.path(), "bad.csv", "garbage header\nwith,some,rows\n");

    let analysis = pipeline::analyse(dir.path()).unwrap();
    assert_eq!(analysis.arithmetics.len(), 1);
    assert_eq!(analysis.stats.files_parsed, 1);
    assert_eq!(analysis.stats.files_skipped, 1);
}

#[test]
fn circuit_logs_flow_through_to_the_report() {
    let dir = tempdir().unwrap();
    write_log(
        dir.path(),
        "circuit/machine1/gnark_groth16.csv",
        &format!(
            "{CIRCUIT_HEADER}\n\
             gnark,circuit,groth16,bn254,cubic,input_1.json,prove,3,1,1,1200,900,192,8,16,10,x86\n\
             gnark,circuit,groth16,bn254,cubic,input_1.json,verify,3,1,1,300,,192,8,16,10,x86\n"
        ),
    );

    let analysis = pipeline::analyse(dir.path()).unwrap();
    assert_eq!(analysis.circuits.len(), 2);

    let report = BenchReport {
        run: RunMeta {
            schema_version: 1,
            tool_version: "test".into(),
            timestamp_utc: now_utc(),
            logs_root: dir.path().display().to_string(),
            files_parsed: analysis.stats.files_parsed,
            files_skipped: analysis.stats.files_skipped,
        },
        circuits: analysis.circuits,
        arithmetics: analysis.arithmetics,
        ec: analysis.ec,
    };

    let out = dir.path().join("index.html");
    report.write_to(&out).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = &json["circuits"]["rows"];
    assert_eq!(rows[0]["operation"], "prove");
    assert_eq!(rows[0]["nbConstraints"], 3);
    assert_eq!(rows[0]["proofSize"], 192);
    // The unset time of the verify row stays unset.
    assert_eq!(rows[1]["time"], serde_json::Value::Null);
    assert_eq!(
        json["circuits"]["columns"],
        serde_json::json!([
            "framework",
            "backend",
            "curve",
            "circuit",
            "input",
            "operation",
            "nbConstraints",
            "nbSecret",
            "nbPublic",
            "ram",
            "time",
            "proofSize",
            "nbPhysicalCores",
            "nbLogicalCores",
            "count",
            "cpu"
        ])
    );
}
