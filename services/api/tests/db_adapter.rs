mod common;

use common::test_db;
use student_results_core::domain::{NewResult, NewStudent};
use student_results_core::ports::{DatabaseService, PortError};

fn new_student(name: &str, roll_number: &str, email: &str) -> NewStudent {
    NewStudent {
        name: Some(name.to_string()),
        roll_number: Some(roll_number.to_string()),
        email: Some(email.to_string()),
    }
}

fn new_result(subject: &str, marks: i64) -> NewResult {
    NewResult {
        subject: Some(subject.to_string()),
        marks: Some(marks),
        semester: Some("Fall2024".to_string()),
    }
}

#[tokio::test]
async fn created_student_is_retrievable() {
    let db = test_db().await;
    let id = db
        .create_student(&new_student("John Doe", "2021001", "john.doe@example.com"))
        .await
        .unwrap();

    let student = db.get_student(id).await.unwrap().expect("student exists");
    assert_eq!(student.name, "John Doe");
    assert_eq!(student.roll_number, "2021001");
    assert_eq!(student.email, "john.doe@example.com");

    let all = db.list_students().await.unwrap();
    assert_eq!(all, vec![student]);
}

#[tokio::test]
async fn ids_are_generated_in_sequence() {
    let db = test_db().await;
    let first = db.create_student(&new_student("A", "1", "a@x")).await.unwrap();
    let second = db.create_student(&new_student("B", "2", "b@x")).await.unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn reused_roll_number_or_email_is_a_constraint_error() {
    let db = test_db().await;
    db.create_student(&new_student("John Doe", "2021001", "john.doe@example.com"))
        .await
        .unwrap();

    let same_roll = db
        .create_student(&new_student("Other", "2021001", "other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(same_roll, PortError::Constraint(_)), "{same_roll:?}");
    assert_eq!(
        same_roll.message(),
        "SQLITE_CONSTRAINT: UNIQUE constraint failed: students.roll_number"
    );

    let same_email = db
        .create_student(&new_student("Other", "2021009", "john.doe@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(same_email, PortError::Constraint(_)), "{same_email:?}");
    assert!(same_email.message().contains("students.email"));

    assert_eq!(db.list_students().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_student_is_none() {
    let db = test_db().await;
    assert_eq!(db.get_student(12).await.unwrap(), None);
}

#[tokio::test]
async fn results_store_the_grade_at_insertion() {
    let db = test_db().await;
    let student_id = db
        .create_student(&new_student("John Doe", "2021001", "john.doe@example.com"))
        .await
        .unwrap();

    db.create_result(student_id, &new_result("Math", 90)).await.unwrap();
    db.create_result(student_id, &new_result("Physics", 49)).await.unwrap();

    let mut results = db.list_results_for_student(student_id).await.unwrap();
    results.sort_by_key(|r| r.id);
    let grades: Vec<_> = results
        .iter()
        .map(|r| (r.subject.as_str(), r.grade.as_deref()))
        .collect();
    assert_eq!(grades, vec![("Math", Some("A+")), ("Physics", Some("F"))]);
    assert!(results.iter().all(|r| r.student_id == Some(student_id)));
}

#[tokio::test]
async fn results_are_scoped_to_their_student() {
    let db = test_db().await;
    let first = db.create_student(&new_student("A", "1", "a@x")).await.unwrap();
    let second = db.create_student(&new_student("B", "2", "b@x")).await.unwrap();

    db.create_result(first, &new_result("Math", 70)).await.unwrap();
    db.create_result(second, &new_result("Art", 60)).await.unwrap();
    db.create_result(second, &new_result("Music", 80)).await.unwrap();

    assert_eq!(db.list_results_for_student(first).await.unwrap().len(), 1);
    assert_eq!(db.list_results_for_student(second).await.unwrap().len(), 2);
}

#[tokio::test]
async fn result_may_reference_a_missing_student() {
    let db = test_db().await;
    let id = db.create_result(404, &new_result("Math", 65)).await.unwrap();

    let results = db.list_results_for_student(404).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, id);
    assert_eq!(results[0].grade.as_deref(), Some("B"));
}

#[tokio::test]
async fn result_with_missing_fields_is_rejected() {
    let db = test_db().await;
    let err = db
        .create_result(1, &NewResult::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::Constraint(_)), "{err:?}");
}

#[tokio::test]
async fn creating_tables_twice_is_harmless() {
    let db = test_db().await;
    db.create_tables().await.unwrap();
    assert!(db.list_students().await.unwrap().is_empty());
}
