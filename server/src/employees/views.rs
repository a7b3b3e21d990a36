//! Server-rendered pages for the employee routes.
//!
//! Each [`View`] names its template and carries the view-model attribute the
//! template reads (`employees` or `employee`). [`Page`] adds the layout and
//! renders to HTML.

use std::fmt::Write as _;

use axum::response::{Html, IntoResponse, Response};
use platform_api::escape_html;
use platform_db::Employee;

pub const LIST_TEMPLATE: &str = "employees/list-employees";
pub const FORM_TEMPLATE: &str = "employees/employee-form";

/// Values bound into the employee form. `id` is `None` for a new record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<Employee> for EmployeeDraft {
    fn from(model: Employee) -> Self {
        Self {
            id: Some(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    List {
        employees: Vec<Employee>,
        /// Search term to echo back into the search box.
        search: Option<String>,
    },
    Form {
        employee: EmployeeDraft,
    },
}

impl View {
    pub fn template(&self) -> &'static str {
        match self {
            View::List { .. } => LIST_TEMPLATE,
            View::Form { .. } => FORM_TEMPLATE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub view: View,
}

impl Page {
    pub fn new(title: impl Into<String>, view: View) -> Self {
        Self {
            title: title.into(),
            view,
        }
    }

    pub fn render(&self) -> String {
        let body = match &self.view {
            View::List { employees, search } => render_list(employees, search.as_deref()),
            View::Form { employee } => render_form(employee),
        };
        let title = escape_html(&self.title);
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n</head>\n<body data-template=\"{template}\">\n\
             <div class=\"container\">\n<h3>{title}</h3>\n<hr>\n{body}</div>\n</body>\n</html>\n",
            template = self.view.template(),
        )
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

fn render_list(employees: &[Employee], search: Option<&str>) -> String {
    let mut html = String::new();
    let term = escape_html(search.unwrap_or_default());
    let _ = write!(
        html,
        "<form action=\"/employees/search\" method=\"get\" class=\"form-inline\">\n\
         <a href=\"/employees/showFormForAdd\" class=\"btn btn-primary\">Add Employee</a>\n\
         <input type=\"search\" name=\"employeeName\" placeholder=\"Search by name\" value=\"{term}\">\n\
         <button type=\"submit\">Search</button>\n</form>\n"
    );
    html.push_str(
        "<table class=\"table table-bordered table-striped\">\n<thead>\n<tr>\
         <th>First Name</th><th>Last Name</th><th>Email</th><th>Action</th>\
         </tr>\n</thead>\n<tbody>\n",
    );
    if employees.is_empty() {
        html.push_str("<tr><td colspan=\"4\">No employees found.</td></tr>\n");
    }
    for employee in employees {
        let _ = write!(
            html,
            "<tr><td>{first}</td><td>{last}</td><td>{email}</td><td>\
             <a href=\"/employees/showFormForUpdate?employeeId={id}\" class=\"btn btn-info btn-sm\">Update</a> \
             <a href=\"/employees/delete?employeeId={id}\" class=\"btn btn-danger btn-sm\" \
             onclick=\"return confirm('Are you sure you want to delete this employee?')\">Delete</a>\
             </td></tr>\n",
            id = employee.id,
            first = escape_html(&employee.first_name),
            last = escape_html(&employee.last_name),
            email = escape_html(&employee.email),
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

fn render_form(employee: &EmployeeDraft) -> String {
    let mut html = String::new();
    let heading = if employee.id.is_some() {
        "Update Employee"
    } else {
        "Save Employee"
    };
    let _ = writeln!(html, "<p class=\"h4\">{heading}</p>");
    html.push_str("<form action=\"/employees/save\" method=\"post\">\n");
    if let Some(id) = employee.id {
        let _ = writeln!(html, "<input type=\"hidden\" name=\"id\" value=\"{id}\">");
    }
    for (name, placeholder, value) in [
        ("firstName", "First name", &employee.first_name),
        ("lastName", "Last name", &employee.last_name),
        ("email", "Email", &employee.email),
    ] {
        let _ = writeln!(
            html,
            "<input type=\"text\" name=\"{name}\" placeholder=\"{placeholder}\" value=\"{value}\" class=\"form-control mb-4 col-4\">",
            value = escape_html(value),
        );
    }
    html.push_str("<button type=\"submit\" class=\"btn btn-info col-2\">Save</button>\n</form>\n");
    html.push_str("<hr>\n<a href=\"/employees/list\">Back to Employees List</a>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn employee(id: i32, first: &str, last: &str) -> Employee {
        let now = Utc::now().into();
        Employee {
            id,
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@example.com", first.to_lowercase()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn list_renders_rows_and_actions() {
        let page = Page::new(
            "Staff",
            View::List {
                employees: vec![employee(3, "Leslie", "Andrews")],
                search: None,
            },
        );
        let html = page.render();
        assert!(html.contains("<title>Staff</title>"));
        assert!(html.contains("data-template=\"employees/list-employees\""));
        assert!(html.contains("<td>Leslie</td><td>Andrews</td><td>leslie@example.com</td>"));
        assert!(html.contains("/employees/showFormForUpdate?employeeId=3"));
        assert!(html.contains("/employees/delete?employeeId=3"));
    }

    #[test]
    fn empty_list_says_so() {
        let html = Page::new(
            "Staff",
            View::List {
                employees: vec![],
                search: Some("zz".into()),
            },
        )
        .render();
        assert!(html.contains("No employees found."));
        assert!(html.contains("value=\"zz\""));
    }

    #[test]
    fn values_are_escaped() {
        let html = Page::new(
            "<Staff>",
            View::List {
                employees: vec![employee(1, "<b>Bold</b>", "O'Neil")],
                search: Some("\"><script>".into()),
            },
        )
        .render();
        assert!(!html.contains("<b>Bold</b>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(html.contains("O&#x27;Neil"));
        assert!(html.contains("<title>&lt;Staff&gt;</title>"));
    }

    #[test]
    fn empty_form_has_no_hidden_id() {
        let html = Page::new(
            "Staff",
            View::Form {
                employee: EmployeeDraft::default(),
            },
        )
        .render();
        assert!(html.contains("data-template=\"employees/employee-form\""));
        assert!(html.contains("action=\"/employees/save\" method=\"post\""));
        assert!(!html.contains("name=\"id\""));
        assert!(html.contains("name=\"firstName\""));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let draft = EmployeeDraft::from(employee(27, "Yuri", "Petrov"));
        let html = Page::new("Staff", View::Form { employee: draft }).render();
        assert!(html.contains("<input type=\"hidden\" name=\"id\" value=\"27\">"));
        assert!(html.contains("value=\"Yuri\""));
        assert!(html.contains("value=\"Petrov\""));
        assert!(html.contains("Update Employee"));
    }
}
