use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temp directory holding the database and its session file.
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// `bookam --no-color --database-file <db>` isolated from the caller's env.
fn bookam_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bookam").expect("Failed to find bookam binary");
    cmd.env_remove("BOOKAM_API_URL")
        .env_remove("BOOKAM_DATABASE")
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

fn run(db_path: &Path, args: &[&str]) -> String {
    let output = bookam_cmd(db_path).args(args).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is UTF-8")
}

fn seeded_db(temp_dir: &TempDir) -> std::path::PathBuf {
    let db_path = temp_dir.path().join("cli_test.db");
    run(&db_path, &["seed"]);
    db_path
}

/// The draft link from the "Next:" block of a checkout step.
fn next_draft(stdout: &str, command: &str) -> String {
    let marker = format!("bookam book {command} '");
    let start = stdout
        .find(&marker)
        .unwrap_or_else(|| panic!("no `{command}` step in output:\n{stdout}"))
        + marker.len();
    let end = stdout[start..].find('\'').expect("unterminated draft link") + start;
    stdout[start..end].to_string()
}

#[test]
fn test_cli_empty_database_lists_no_routes() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    bookam_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No routes found."));
}

#[test]
fn test_cli_seed_once() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    bookam_cmd(&db_path)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Seeded 2 user(s), 3 bus(es) and 6 route(s)",
        ))
        .stdout(predicate::str::contains("Port Harcourt"));

    bookam_cmd(&db_path)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing seeded"));
}

#[test]
fn test_cli_route_search() {
    let temp_dir = create_cli_test_environment();
    let db_path = seeded_db(&temp_dir);

    bookam_cmd(&db_path)
        .args(["route", "search", "--from", "Enugu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Port Harcourt"))
        .stdout(predicate::str::contains("₦9,000"))
        .stdout(predicate::str::contains("Abuja").not());

    bookam_cmd(&db_path)
        .args(["route", "search", "--from", "Kano"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No routes match your search."));
}

#[test]
fn test_cli_two_passenger_checkout() {
    let temp_dir = create_cli_test_environment();
    let db_path = seeded_db(&temp_dir);

    let seats = run(&db_path, &["book", "seats", "1", "1A,1B"]);
    assert!(seats.contains("Selected: 1A, 1B (₦50,000)"), "{seats}");
    let draft = next_draft(&seats, "passengers");

    let passengers = run(
        &db_path,
        &[
            "book",
            "passengers",
            &draft,
            "--passenger",
            "title=Mrs,first=Ada,last=Obi,email=ada@example.com,phone=08031234567,terms=yes",
            "--passenger",
            "title=Mr,first=Tunde,last=Bello",
        ],
    );
    assert!(passengers.contains("All passengers complete. Total ₦50,000."), "{passengers}");
    let draft = next_draft(&passengers, "pay");

    let payment = run(
        &db_path,
        &[
            "book",
            "pay",
            &draft,
            "--card-name",
            "Ada Obi",
            "--card-number",
            "4111 1111 1111 1111",
            "--expiry",
            "12/29",
            "--cvv",
            "123",
        ],
    );
    assert!(payment.contains("- Step: 4 of 4 (confirmation)"), "{payment}");
    let draft = next_draft(&payment, "confirm");
    assert!(!draft.contains("4111"));

    bookam_cmd(&db_path)
        .args(["book", "confirm", &draft])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Booking confirmed"))
        .stdout(predicate::str::contains("# Ticket BKA-000001"))
        .stdout(predicate::str::contains("Lagos → Abuja"))
        .stdout(predicate::str::contains("Tunde Bello"));

    // Both seats are now taken
    bookam_cmd(&db_path)
        .args(["book", "seats", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30 seat(s) available"));

    bookam_cmd(&db_path)
        .args(["book", "seats", "1", "1A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Seat 1A is not available"));
}

#[test]
fn test_cli_single_passenger_cash_checkout() {
    let temp_dir = create_cli_test_environment();
    let db_path = seeded_db(&temp_dir);

    let seats = run(&db_path, &["book", "seats", "2", "3C"]);
    let draft = next_draft(&seats, "passenger");

    bookam_cmd(&db_path)
        .args([
            "book", "passenger", &draft, "--name", "J", "--email", "jo@example.com", "--phone",
            "08030000000",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("fullName"))
        .stderr(predicate::str::contains("Contact details are incomplete"));

    let contact = run(
        &db_path,
        &[
            "book", "passenger", &draft, "--name", "Jo", "--email", "jo@example.com", "--phone",
            "08030000000",
        ],
    );
    let draft = next_draft(&contact, "pay");
    let payment = run(&db_path, &["book", "pay", &draft, "--cash"]);
    let draft = next_draft(&payment, "confirm");

    bookam_cmd(&db_path)
        .args(["book", "confirm", &draft])
        .assert()
        .success()
        .stdout(predicate::str::contains("| 3C | Jo |"))
        .stdout(predicate::str::contains("Pending"));
}

#[test]
fn test_cli_online_payment_needs_card() {
    let temp_dir = create_cli_test_environment();
    let db_path = seeded_db(&temp_dir);

    let seats = run(&db_path, &["book", "seats", "2", "1A"]);
    let draft = next_draft(&seats, "passenger");
    let contact = run(
        &db_path,
        &[
            "book", "passenger", &draft, "--name", "Ada Obi", "--email", "ada@example.com",
            "--phone", "08031234567",
        ],
    );
    let draft = next_draft(&contact, "pay");

    bookam_cmd(&db_path)
        .args(["book", "pay", &draft, "--card-name", "Ada Obi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Payment details are incomplete"));
}

#[test]
fn test_cli_passengers_without_seats_is_blocked() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    bookam_cmd(&db_path)
        .args([
            "book",
            "passengers",
            "/booking/passenger-details?v=1&step=passenger-details&mode=multi",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No seats selected"));
}

#[test]
fn test_cli_rejects_tampered_draft() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    bookam_cmd(&db_path)
        .args(["draft", "show", "v=9&step=payment"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("version 9 is not supported"));

    bookam_cmd(&db_path)
        .args(["draft", "show", "v=1&step=passenger-details&seats=1A,1B&price=30000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Step: 2 of 4"))
        .stdout(predicate::str::contains("- Total: ₦30,000"));
}

#[test]
fn test_cli_draft_schema() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    bookam_cmd(&db_path)
        .args(["draft", "schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"passengerCount\""))
        .stdout(predicate::str::contains("\"seats\""));
}

#[test]
fn test_cli_admin_commands_need_admin_login() {
    let temp_dir = create_cli_test_environment();
    let db_path = seeded_db(&temp_dir);
    let create_bus = [
        "bus", "create", "Chisco 21", "--plate", "enu-221-cs", "--type", "luxury", "--capacity",
        "20", "--amenities", "AC, WiFi",
    ];

    bookam_cmd(&db_path)
        .args(create_bus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("You need to log in first"));

    bookam_cmd(&db_path)
        .args(["account", "login", "ada.obi@example.com", "--password", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Ada Obi (customer)"));

    bookam_cmd(&db_path)
        .args(create_bus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires an administrator"));

    run(&db_path, &["account", "logout"]);
    run(&db_path, &["account", "login", "admin@bookam.ng", "--password", "x"]);

    bookam_cmd(&db_path)
        .args(create_bus)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bus with ID: 4"))
        .stdout(predicate::str::contains("ENU-221-CS"));

    bookam_cmd(&db_path)
        .args(["bus", "update", "4", "--capacity", "24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Seats: 24"));

    bookam_cmd(&db_path)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada.obi@example.com"));

    bookam_cmd(&db_path)
        .args(["bus", "delete", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted bus with ID: 4"));
}

#[test]
fn test_cli_account_lifecycle() {
    let temp_dir = create_cli_test_environment();
    let db_path = seeded_db(&temp_dir);

    let registered = run(
        &db_path,
        &[
            "account",
            "register",
            "--first-name",
            "Chika",
            "--last-name",
            "Eze",
            "--email",
            "chika@example.com",
            "--password",
            "supersecret",
        ],
    );
    let start = registered.find("Your code is **").expect("code shown") + "Your code is **".len();
    let code = &registered[start..start + registered[start..].find("**").unwrap()];

    bookam_cmd(&db_path)
        .args(["account", "login", "chika@example.com", "--password", "supersecret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirm your account"));

    run(&db_path, &["account", "confirm", "chika@example.com", code]);
    run(&db_path, &["account", "login", "chika@example.com", "--password", "supersecret"]);

    bookam_cmd(&db_path)
        .args(["account", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chika Eze"));

    bookam_cmd(&db_path)
        .args(["booking", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookings found."));

    bookam_cmd(&db_path)
        .args(["account", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out chika@example.com"));

    bookam_cmd(&db_path)
        .args(["account", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_cli_bookings_need_login() {
    let temp_dir = create_cli_test_environment();
    let db_path = seeded_db(&temp_dir);

    for args in [["booking", "list"].as_slice(), ["booking", "show", "1"].as_slice()] {
        bookam_cmd(&db_path)
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("You need to log in first"));
    }
}
