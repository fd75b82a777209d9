mod common;

use common::{names, run, run_all, setup_test_env};
use finance_tracker::cli::output::{render_records, render_sources};
use finance_tracker::core::{CommandError, FollowUp, SessionError};

#[test]
fn find_filters_and_list_resets() {
    let (mut session, _) = setup_test_env();
    run_all(
        &mut session,
        &["spend n/Chicken rice $/4.50", "spend n/Duck rice $/5", "spend n/Noodles $/3"],
    );

    let outcome = run(&mut session, "find RICE").unwrap();
    assert_eq!(outcome.message, "2 records listed!");
    assert!(!outcome.state_changed);
    assert_eq!(names(&session), ["Chicken rice", "Duck rice"]);

    run(&mut session, "list").unwrap();
    assert_eq!(names(&session).len(), 3);
}

#[test]
fn indices_refer_to_the_filtered_view() {
    let (mut session, _) = setup_test_env();
    run_all(
        &mut session,
        &["spend n/Chicken rice $/4.50", "spend n/Noodles $/3", "find noodles"],
    );
    let outcome = run(&mut session, "delete 1").unwrap();
    assert!(outcome.message.contains("Noodles"));
    assert!(names(&session).is_empty());

    run(&mut session, "list").unwrap();
    assert_eq!(names(&session), ["Chicken rice"]);
}

#[test]
fn edit_keeps_description_and_rejects_collisions() {
    let (mut session, _) = setup_test_env();
    run_all(
        &mut session,
        &[
            "spend n/Lunch $/5 d/14/03/2024 r/with team",
            "spend n/Dinner $/9 d/14/03/2024",
            "edit 1 n/Brunch c/food",
        ],
    );
    let brunch = session.tracker().filtered_record(0).unwrap().1.clone();
    assert_eq!(brunch.name().as_str(), "Brunch");
    assert_eq!(brunch.description().as_str(), "with team");

    let err = run(&mut session, "edit 1 n/Dinner $/9").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Command(CommandError::DuplicateRecord)
    ));
}

#[test]
fn summary_reports_totals_without_committing() {
    let (mut session, _) = setup_test_env();
    run_all(
        &mut session,
        &[
            "spend n/Lunch $/5 d/14/03/2024 c/food",
            "spend n/Rent $/900 d/01/01/2024",
        ],
    );
    let history = session.tracker().history_len();

    let week = run(&mut session, "summary").unwrap();
    assert!(week.message.contains("Total spent: $5.00"));
    let months = run(&mut session, "summary 3 m").unwrap();
    assert!(months.message.contains("Total spent: $905.00"));
    assert_eq!(session.tracker().history_len(), history);
}

#[test]
fn sources_have_their_own_store() {
    let (mut session, _) = setup_test_env();
    run_all(
        &mut session,
        &["source add n/Salary r/monthly pay", "source add n/Tutoring"],
    );
    let err = run(&mut session, "source add n/Salary r/monthly pay").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Command(CommandError::DuplicateSource)
    ));

    let outcome = run(&mut session, "source delete 2").unwrap();
    assert!(outcome.message.starts_with("Deleted Source:"));
    assert_eq!(session.tracker().deleted_sources().len(), 1);
    assert_eq!(
        render_sources(&session.tracker().filtered_sources()),
        "1. Salary Description: monthly pay"
    );
    assert!(session.tracker().records().is_empty());
}

#[test]
fn pinned_records_are_marked_in_the_listing() {
    let (mut session, _) = setup_test_env();
    run_all(&mut session, &["spend n/Lunch $/5 d/14/03/2024", "pin 1"]);
    assert!(render_records(session.tracker()).ends_with("[pinned]"));

    let err = run(&mut session, "pin 1").unwrap_err();
    assert_eq!(err.to_string(), "This record is already pinned.");
}

#[test]
fn help_and_exit_only_request_follow_ups() {
    let (mut session, _) = setup_test_env();
    let help = run(&mut session, "help").unwrap();
    assert_eq!(help.follow_up, FollowUp::ShowHelp);
    let exit = run(&mut session, "exit").unwrap();
    assert_eq!(exit.follow_up, FollowUp::Exit);
    assert_eq!(session.tracker().history_len(), 1);
}
