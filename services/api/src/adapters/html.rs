//! services/api/src/adapters/html.rs
//!
//! The HTML implementation of the `ViewRenderer` port. Every page shares one
//! layout; stored text is escaped before it reaches the markup.

use student_results_core::domain::{ExamResult, Student};
use student_results_core::ports::{PortResult, View, ViewRenderer};

const SITE_TITLE: &str = "Student Result Portal";

/// Renders views as complete HTML documents.
#[derive(Clone, Debug, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ViewRenderer for HtmlRenderer {
    fn render(&self, view: &View<'_>) -> PortResult<String> {
        let (heading, body) = match view {
            View::Index => (SITE_TITLE.to_string(), index_body()),
            View::Students { students } => ("Students".to_string(), students_body(students)),
            View::NewStudent => ("Add Student".to_string(), new_student_body()),
            View::StudentResults { student, results } => (
                format!("Results for {}", escape(&student.name)),
                student_results_body(student, results),
            ),
            View::NewResult { student } => ("Add Result".to_string(), new_result_body(*student)),
        };
        Ok(layout(view.name(), &heading, &body))
    }
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

//=========================================================================================
// Layout
//=========================================================================================

fn layout(view_name: &str, heading: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/css/style.css">
</head>
<body data-view="{view_name}">
  <header>
    <a class="brand" href="/">{title}</a>
    <nav>
      <a href="/students">Students</a>
      <a href="/students/new">Add Student</a>
    </nav>
  </header>
  <main>
    <h1>{heading}</h1>
{body}
  </main>
</body>
</html>
"#,
        title = SITE_TITLE,
    )
}

//=========================================================================================
// Page Bodies
//=========================================================================================

fn index_body() -> String {
    r#"    <p>Record students and their exam results, semester by semester.</p>
    <ul class="actions">
      <li><a href="/students">View all students</a></li>
      <li><a href="/students/new">Register a new student</a></li>
    </ul>
"#
    .to_string()
}

fn students_body(students: &[Student]) -> String {
    if students.is_empty() {
        return r#"    <p class="empty">No students yet. <a href="/students/new">Add the first one</a>.</p>
"#
        .to_string();
    }

    let rows: String = students
        .iter()
        .map(|s| {
            format!(
                r#"        <tr>
          <td>{id}</td>
          <td>{name}</td>
          <td>{roll}</td>
          <td>{email}</td>
          <td><a href="/students/{id}/results">Results</a> | <a href="/students/{id}/results/new">Add Result</a></td>
        </tr>
"#,
                id = s.id,
                name = escape(&s.name),
                roll = escape(&s.roll_number),
                email = escape(&s.email),
            )
        })
        .collect();

    format!(
        r#"    <table class="students">
      <thead>
        <tr><th>ID</th><th>Name</th><th>Roll Number</th><th>Email</th><th></th></tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
"#
    )
}

fn new_student_body() -> String {
    r#"    <form method="POST" action="/students">
      <label>Name <input type="text" name="name" required></label>
      <label>Roll Number <input type="text" name="roll_number" required></label>
      <label>Email <input type="email" name="email" required></label>
      <button type="submit">Save Student</button>
    </form>
"#
    .to_string()
}

fn student_results_body(student: &Student, results: &[ExamResult]) -> String {
    let summary = format!(
        r#"    <p class="student">Roll Number: {roll} &middot; Email: {email}</p>
    <p><a href="/students/{id}/results/new">Add Result</a></p>
"#,
        id = student.id,
        roll = escape(&student.roll_number),
        email = escape(&student.email),
    );

    if results.is_empty() {
        return format!("{summary}    <p class=\"empty\">No results recorded.</p>\n");
    }

    let rows: String = results
        .iter()
        .map(|r| {
            format!(
                "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&r.subject),
                r.marks,
                escape(r.grade.as_deref().unwrap_or("")),
                escape(&r.semester),
            )
        })
        .collect();

    format!(
        r#"{summary}    <table class="results">
      <thead>
        <tr><th>Subject</th><th>Marks</th><th>Grade</th><th>Semester</th></tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
"#
    )
}

fn new_result_body(student: Option<&Student>) -> String {
    let Some(student) = student else {
        return r#"    <p class="empty">Student not found.</p>
"#
        .to_string();
    };

    format!(
        r#"    <p class="student">{name} ({roll})</p>
    <form method="POST" action="/students/{id}/results">
      <label>Subject <input type="text" name="subject" required></label>
      <label>Marks <input type="number" name="marks" min="0" max="100" required></label>
      <label>Semester <input type="text" name="semester" required></label>
      <button type="submit">Save Result</button>
    </form>
"#,
        id = student.id,
        name = escape(&student.name),
        roll = escape(&student.roll_number),
    )
}
