use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Workspace {
    config_home: TempDir,
    storage: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            config_home: TempDir::new().unwrap(),
            storage: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("glissemontre").expect("binary exists");
        cmd.env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("RUST_LOG")
            .arg("--storage-dir")
            .arg(self.storage.path());
        cmd
    }

    fn run(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).assert().success().get_output().clone();
        String::from_utf8(output.stdout).unwrap()
    }

    fn new_slideshow(&self, name: &str) -> String {
        self.run(&["new", name]).trim().to_string()
    }
}

#[test]
fn help_prints_usage() {
    Command::cargo_bin("glissemontre")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Manage ordered slideshows of image annotations",
        ));
}

#[test]
fn new_add_list_move_show_flow() {
    let ws = Workspace::new();
    let id = ws.new_slideshow("Kitchen");

    ws.run(&["add", &id, "--point", "10,20", "--content", "tap"]);
    ws.run(&["add", &id, "--rect", "0,0,30,40", "--content", "window"]);
    ws.run(&["add", &id, "--polygon", "0,0", "10,0", "5,8"]);

    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{id}\tKitchen\t3 annotations")));

    ws.run(&["move", &id, "0", "2"]);

    let shown = ws.run(&["show", &id]);
    let rows: Vec<Vec<&str>> = shown
        .lines()
        .skip(1)
        .map(|line| line.split('\t').collect())
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][2], "rectangle");
    assert_eq!(rows[0][3], "window");
    assert_eq!(rows[1][2], "polygon");
    assert_eq!(rows[2][2], "point");
    assert_eq!(rows[2][3], "tap");
}

#[test]
fn edit_remove_and_rename() {
    let ws = Workspace::new();
    let id = ws.new_slideshow("Hall");
    ws.run(&["add", &id, "--point", "1,1"]);
    ws.run(&["add", &id, "--point", "2,2"]);

    ws.run(&["edit", &id, "1", "--content", "coat hook"]);
    ws.cmd()
        .args(["edit", &id, "1", "--content", "coat hook"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing changed"));

    ws.run(&["remove", &id, "0"]);
    ws.run(&["rename", &id, "Entrance"]);

    let shown = ws.run(&["show", &id]);
    assert!(shown.starts_with("Entrance (1 annotations)"));
    assert!(shown.contains("coat hook"));
}

#[test]
fn export_writes_feature_collection() {
    let ws = Workspace::new();
    let id = ws.new_slideshow("Porch");
    ws.run(&["add", &id, "--rect", "5,5,15,25"]);

    let out = ws.storage.path().join("porch.geojson");
    ws.run(&["export", &id, "-o", out.to_str().unwrap()]);

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["type"], "FeatureCollection");
    assert_eq!(value["name"], "Porch");
    assert_eq!(value["features"][0]["geometry"]["type"], "Polygon");
}

#[test]
fn missing_slideshow_is_an_error() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("slideshow 'nope' not found"));
}

#[test]
fn out_of_range_index_is_an_error() {
    let ws = Workspace::new();
    let id = ws.new_slideshow("Empty");
    ws.cmd()
        .args(["remove", &id, "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no annotation at index 3"));
}

#[test]
fn bad_coordinates_are_rejected_by_the_parser() {
    let ws = Workspace::new();
    let id = ws.new_slideshow("Typos");
    ws.cmd()
        .args(["add", &id, "--point", "ten,20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected X,Y"));
}

#[test]
fn duplicate_copies_annotations_under_new_id() {
    let ws = Workspace::new();
    let id = ws.new_slideshow("Cellar");
    ws.run(&["add", &id, "--point", "5,5", "--content", "barrel"]);

    let copy = ws.run(&["duplicate", &id]).trim().to_string();
    assert_ne!(copy, id);
    ws.cmd()
        .args(["show", &copy])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cellar (copy) (1 annotations)"))
        .stdout(predicate::str::contains("barrel"));

    let named = ws.run(&["duplicate", &id, "Wine cellar"]).trim().to_string();
    ws.run(&["remove", &named, "0"]);
    ws.cmd()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cellar (1 annotations)"));
    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wine cellar\t0 annotations"));
}

#[test]
fn delete_removes_slideshow() {
    let ws = Workspace::new();
    let id = ws.new_slideshow("Shed");
    ws.run(&["delete", &id]);
    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No slideshows"));
}

#[test]
fn init_config_writes_example_once() {
    let ws = Workspace::new();
    ws.cmd().arg("init-config").assert().success();
    assert!(
        ws.config_home
            .path()
            .join("glissemontre/config.toml")
            .exists()
    );
    ws.cmd()
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
