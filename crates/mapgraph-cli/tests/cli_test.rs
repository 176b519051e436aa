use assert_cmd::Command;
use serde_json::Value;
use std::fs;

const SNAPSHOT: &str = r#"{
  "mapId": "m1",
  "concepts": [
    { "id": "a", "label": "Animal", "position": { "x": 10, "y": 20 } },
    { "id": "b", "label": "Bird", "position": { "x": 300, "y": 20 } },
    { "id": "c", "label": "Cat", "position": { "x": 600, "y": 20 } }
  ],
  "relationships": [
    { "id": "r1", "fromConceptId": "b", "toConceptId": "a", "primaryLabel": "is an" }
  ],
  "perspectives": [
    { "id": "p1", "name": "Birds", "conceptIds": ["a", "b"], "relationshipIds": ["r1"] }
  ]
}"#;

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("mapgraph-cli"))
}

fn stdout_json(output: std::process::Output) -> Value {
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn node<'a>(graph: &'a Value, id: &str) -> &'a Value {
    graph["nodes"]
        .as_array()
        .and_then(|nodes| nodes.iter().find(|n| n["id"] == id))
        .expect("node present")
}

#[test]
fn map_prints_nodes_and_edges_from_a_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("map.json");
    fs::write(&input, SNAPSHOT).expect("write snapshot");

    let output = cli()
        .args(["map", input.to_string_lossy().as_ref()])
        .output()
        .expect("run");
    let graph = stdout_json(output);

    assert_eq!(graph["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(graph["edges"][0]["sourceHandle"], "bottom-2");
    assert_eq!(graph["edges"][0]["targetHandle"], "top-2");
    assert_eq!(node(&graph, "a")["position"]["x"], 10.0);
}

#[test]
fn perspective_view_hides_excluded_concepts() {
    let output = cli()
        .args(["map", "--perspective", "p1"])
        .write_stdin(SNAPSHOT)
        .output()
        .expect("run");
    let graph = stdout_json(output);

    let ids: Vec<&str> = graph["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .filter_map(|n| n["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn layout_uses_canvas_flags() {
    let single = r#"{ "concepts": [ { "id": "a", "label": "A" } ], "relationships": [] }"#;
    let output = cli()
        .args([
            "layout",
            "--strategy",
            "circular",
            "--width",
            "800",
            "--height",
            "600",
            "-",
        ])
        .write_stdin(single)
        .output()
        .expect("run");
    let graph = stdout_json(output);

    assert_eq!(node(&graph, "a")["position"]["x"], 325.0);
    assert_eq!(node(&graph, "a")["position"]["y"], 275.0);
}

#[test]
fn layout_reads_json5_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("layout.json5");
    fs::write(&config, "{ circular: { radius: 100, sortByDegree: false } }").expect("write");

    let output = cli()
        .args([
            "layout",
            "--strategy",
            "circular",
            "--config",
            config.to_string_lossy().as_ref(),
        ])
        .write_stdin(SNAPSHOT)
        .output()
        .expect("run");
    let graph = stdout_json(output);

    // First node at angle 0 on a ring of radius 100 around (500, 500).
    assert_eq!(node(&graph, "a")["position"]["x"], 525.0);
    assert_eq!(node(&graph, "a")["position"]["y"], 475.0);
}

#[test]
fn new_only_keeps_laid_out_nodes() {
    let snapshot = r#"{
      "concepts": [
        { "id": "a", "label": "A", "position": { "x": 12, "y": 34 } },
        { "id": "b", "label": "B", "position": { "x": 0, "y": 0 } }
      ],
      "relationships": [ { "id": "r1", "fromConceptId": "a", "toConceptId": "b" } ],
      "laidOut": ["a"]
    }"#;
    for strategy in ["circular", "stress", "hierarchical", "force-directed"] {
        let output = cli()
            .args(["layout", "--strategy", strategy, "--scope", "new-only"])
            .write_stdin(snapshot)
            .output()
            .expect("run");
        let graph = stdout_json(output);
        assert_eq!(node(&graph, "a")["position"]["x"], 12.0, "{strategy}");
        assert_eq!(node(&graph, "a")["position"]["y"], 34.0, "{strategy}");
    }
}

#[test]
fn unknown_perspective_fails() {
    cli()
        .args(["map", "--perspective", "nope"])
        .write_stdin(SNAPSHOT)
        .assert()
        .code(1);
}

#[test]
fn malformed_input_fails() {
    cli().arg("map").write_stdin("{ not json").assert().code(1);
}

#[test]
fn bad_arguments_are_usage_errors() {
    cli().arg("--frobnicate").assert().code(2);
    cli().args(["layout", "--strategy", "spiral"]).assert().code(2);
    cli().args(["layout", "--width", "-5"]).assert().code(2);
}
