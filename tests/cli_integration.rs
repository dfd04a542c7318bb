use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::path::Path;

fn adminboard(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("adminboard").unwrap();
    cmd.env("ADMINBOARD_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// The id printed on the "ID" line of a detail view.
fn printed_id(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .find(|line| line.starts_with("ID"))
        .and_then(|line| line.split_whitespace().last())
        .map(str::to_string)
        .expect("detail view prints an ID line")
}

#[test]
fn product_needs_a_variant() {
    let temp_dir = tempfile::tempdir().unwrap();

    adminboard(temp_dir.path())
        .args([
            "products",
            "add",
            "--title",
            "Professional Widget",
            "--image",
            "widget.png",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Please add at least one product variant",
        ));

    adminboard(temp_dir.path())
        .args([
            "products",
            "add",
            "--title",
            "Professional Widget",
            "--image",
            "widget.png",
            "--variant",
            "m:red:10:12:yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product added: Professional Widget"));

    adminboard(temp_dir.path())
        .args(["products", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Professional Widget"))
        .stdout(predicate::str::contains(
            "1. m    red     $10 (MRP $12) available: yes",
        ));
}

#[test]
fn product_search_is_case_insensitive() {
    let temp_dir = tempfile::tempdir().unwrap();
    for title in ["Professional Widget", "Basic Cap"] {
        adminboard(temp_dir.path())
            .args(["products", "add", "--title", title, "--image", "p.png"])
            .args(["--variant", "all:black:5:5"])
            .assert()
            .success();
    }

    adminboard(temp_dir.path())
        .args(["products", "search", "PRO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Professional Widget"))
        .stdout(predicate::str::contains("Basic Cap").not());
}

#[test]
fn product_edit_adds_and_removes_variants() {
    let temp_dir = tempfile::tempdir().unwrap();
    let added = adminboard(temp_dir.path())
        .args(["products", "add", "--title", "Tee", "--image", "tee.png"])
        .args(["--variant", "m:red:10:12"])
        .assert()
        .success();
    let id = printed_id(&added.get_output().stdout);

    adminboard(temp_dir.path())
        .args(["products", "edit", &id, "--title", "Classic Tee"])
        .args(["--variant", "s:blue:8:9:no"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product updated: Classic Tee"))
        .stdout(predicate::str::contains("2. s    blue    $8 (MRP $9) available: no"));

    adminboard(temp_dir.path())
        .args(["products", "edit", &id, "--remove-variant", "1"])
        .assert()
        .success();

    adminboard(temp_dir.path())
        .args(["products", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. s    blue"))
        .stdout(predicate::str::contains("red").not());

    // Positions start at 1; 0 must not touch the first variant.
    for args in [
        ["--remove-variant", "0"],
        ["--replace-variant", "0=xl:green:1:1"],
    ] {
        adminboard(temp_dir.path())
            .args(["products", "edit", &id])
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("positions start at 1"));
    }
    adminboard(temp_dir.path())
        .args(["products", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. s    blue"))
        .stdout(predicate::str::contains("green").not());

    // Removing the last variant leaves an invalid product; nothing is saved.
    adminboard(temp_dir.path())
        .args(["products", "edit", &id, "--remove-variant", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please add at least one product variant",
        ));
}

#[test]
fn paid_event_needs_a_price() {
    let temp_dir = tempfile::tempdir().unwrap();
    let event_args = [
        "events",
        "add",
        "--title",
        "Charity Run",
        "--days",
        "sat,sun",
        "--start-date",
        "2025-04-05",
        "--end-date",
        "2025-04-06",
        "--start-time",
        "09:00",
        "--end-time",
        "12:00",
        "--location",
        "City Park",
        "--pricing",
        "paid",
        "--image",
        "run.png",
    ];

    adminboard(temp_dir.path())
        .args(event_args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Price must be greater than 0"));

    // Infinity would be written as null and break every later load.
    adminboard(temp_dir.path())
        .args(event_args)
        .args(["--price", "inf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Price must be greater than 0"));

    adminboard(temp_dir.path())
        .args(event_args)
        .args(["--price", "25"])
        .assert()
        .success();

    adminboard(temp_dir.path())
        .args(["events", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Charity Run"))
        .stdout(predicate::str::contains("$25"));

    adminboard(temp_dir.path())
        .args(["events", "list", "--pricing", "free"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events found."));
}

#[test]
fn missing_id_is_not_found() {
    let temp_dir = tempfile::tempdir().unwrap();
    let id = "6f1c2f0e-3f5a-4c1e-9a63-2d3c1e0b7a11";

    adminboard(temp_dir.path())
        .args(["products", "show", id])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Product not found"));

    adminboard(temp_dir.path())
        .args(["users", "delete", id])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("User not found"));
}

#[test]
fn users_are_paged_by_five() {
    let temp_dir = tempfile::tempdir().unwrap();
    adminboard(temp_dir.path())
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 8 user records"));

    adminboard(temp_dir.path())
        .args(["users", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("Jennifer Lee").not())
        .stdout(predicate::str::contains("Page 1 of 2"));

    adminboard(temp_dir.path())
        .args(["users", "list", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jennifer Lee"))
        .stdout(predicate::str::contains("Lisa Anderson"))
        .stdout(predicate::str::contains("John Smith").not());

    adminboard(temp_dir.path())
        .args(["config", "users-page-size", "3"])
        .assert()
        .success();

    adminboard(temp_dir.path())
        .args(["users", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 3"));
}

#[test]
fn donations_filter_by_type() {
    let temp_dir = tempfile::tempdir().unwrap();
    adminboard(temp_dir.path()).arg("seed").assert().success();

    adminboard(temp_dir.path())
        .args(["donations", "list", "--type", "funder"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Michael Brown"))
        .stdout(predicate::str::contains("Robert Wilson"))
        .stdout(predicate::str::contains("John Smith").not());

    adminboard(temp_dir.path())
        .args(["donations", "list", "-s", "sarah", "--type", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sarah Johnson"))
        .stdout(predicate::str::contains("Page 1 of 1"));
}

#[test]
fn legacy_blog_snapshot_is_upgraded() {
    let temp_dir = tempfile::tempdir().unwrap();
    let snapshot = temp_dir.path().join("blog-store.json");
    std::fs::write(
        &snapshot,
        r#"[{"id":"0d8a4c55-8e3e-4a3f-b1d6-0f4e2b7c9a10","title":"Old Post","date":"2024-01-05","image":"old.png","content":["First paragraph","Second paragraph"]}]"#,
    )
    .unwrap();

    adminboard(temp_dir.path())
        .args(["blogs", "show", "0d8a4c55-8e3e-4a3f-b1d6-0f4e2b7c9a10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. First paragraph"))
        .stdout(predicate::str::contains("2. Second paragraph"));

    let rewritten = std::fs::read_to_string(&snapshot).unwrap();
    assert!(rewritten.contains(r#""text": "First paragraph""#));
}

#[test]
fn blog_date_range_excludes_undated_posts() {
    let temp_dir = tempfile::tempdir().unwrap();
    adminboard(temp_dir.path())
        .args(["blogs", "add", "--title", "Spring Gala", "--date", "2025-03-02"])
        .args(["--image", "gala.png", "--block", "Thanks for coming"])
        .assert()
        .success();
    adminboard(temp_dir.path())
        .args(["blogs", "add", "--title", "Undated Notes", "--image", "n.png"])
        .args(["--block", "Draft|sketch.gif"])
        .assert()
        .success();

    adminboard(temp_dir.path())
        .args(["blogs", "list", "--from", "2025-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spring Gala"))
        .stdout(predicate::str::contains("Undated Notes").not());

    adminboard(temp_dir.path())
        .args(["blogs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Undated Notes"));
}

#[test]
fn blog_block_positions_start_at_one() {
    let temp_dir = tempfile::tempdir().unwrap();
    let added = adminboard(temp_dir.path())
        .args(["blogs", "add", "--title", "Spring Gala", "--image", "gala.png"])
        .args(["--block", "Thanks for coming", "--block", "See you next year"])
        .assert()
        .success();
    let id = printed_id(&added.get_output().stdout);

    adminboard(temp_dir.path())
        .args(["blogs", "edit", &id, "--remove-block", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positions start at 1"));

    adminboard(temp_dir.path())
        .args(["blogs", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Thanks for coming"))
        .stdout(predicate::str::contains("2. See you next year"));
}

#[test]
fn oversized_image_upload_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image = temp_dir.path().join("huge.png");
    std::fs::write(&image, vec![0u8; 2 * 1024 * 1024]).unwrap();

    adminboard(temp_dir.path())
        .args(["products", "add", "--title", "Poster", "--variant", "l:white:3:4"])
        .arg("--image")
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Image must be at most 1024 KB"));
}

#[test]
fn config_lists_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    adminboard(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("users-page-size=5"))
        .stdout(predicate::str::contains("donations-page-size=10"));

    adminboard(temp_dir.path())
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
