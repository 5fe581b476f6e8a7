//! Nested text-menu shell over core services.
//!
//! # Responsibility
//! - Render numbered menus, collect typed input, and invoke core services.
//! - Convert every recoverable data error into a printed message; the loop
//!   never crashes the session for validation, duplicate, in-use, or
//!   not-found conditions.
//!
//! # Invariants
//! - EOF on stdin exits the whole shell cleanly.
//! - Update/delete targets are selected by number from the enumerated
//!   current rows; ids never have to be typed.

use log::warn;
use rusqlite::Connection;
use staffbook_core::{
    core_version, Department, DepartmentService, Employee, EmployeeDraft, EmployeeService,
    EmployeeView, RepoError, RepoResult, Role, RoleService, SqliteDepartmentRepository,
    SqliteEmployeeRepository, SqliteRoleRepository,
};
use std::io;

use crate::prompt;
use crate::table;

const CHOICE_PROMPT: &str = "\nEnter a choice: ";
const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Whether the enclosing loop should keep running after an action.
enum Flow {
    Continue,
    Exit,
}

/// Outcome of a numbered pick from an enumerated list.
enum Pick {
    Index(usize),
    Invalid,
    Eof,
}

/// Outcome of collecting a full employee draft from the operator.
enum DraftOutcome {
    Ready(EmployeeDraft),
    Aborted,
    Eof,
}

/// Runs the main menu loop until exit or EOF.
pub fn run(conn: &mut Connection) -> io::Result<()> {
    println!("StaffBook {}", core_version());
    println!("Welcome to the Employee Management System!");

    loop {
        println!("\n--- Employee Management System ---");
        println!("1. Manage Departments");
        println!("2. Manage Roles");
        println!("3. Manage Employees");
        println!("4. View Departments");
        println!("5. View Roles");
        println!("6. View Employees");
        println!("7. Exit");

        let Some(line) = prompt::read_line(CHOICE_PROMPT)? else {
            break;
        };
        let flow = match prompt::parse_choice(&line) {
            Some(1) => manage_departments(conn)?,
            Some(2) => manage_roles(conn)?,
            Some(3) => manage_employees(conn)?,
            Some(4) => view_departments(conn)?,
            Some(5) => view_roles(conn)?,
            Some(6) => view_employees(conn)?,
            Some(7) => {
                println!("Exiting...");
                Flow::Exit
            }
            _ => {
                println!("{INVALID_CHOICE}");
                Flow::Continue
            }
        };
        if let Flow::Exit = flow {
            break;
        }
    }

    Ok(())
}

fn manage_departments(conn: &mut Connection) -> io::Result<Flow> {
    loop {
        println!("\n--- Manage Departments ---");
        println!("1. Add Department");
        println!("2. Update Department");
        println!("3. Delete Department");
        println!("4. Back to Main Menu");

        let Some(line) = prompt::read_line(CHOICE_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let flow = match prompt::parse_choice(&line) {
            Some(1) => add_department(conn)?,
            Some(2) => update_department(conn)?,
            Some(3) => delete_department(conn)?,
            Some(4) => return Ok(Flow::Continue),
            _ => {
                println!("{INVALID_CHOICE}");
                Flow::Continue
            }
        };
        if let Flow::Exit = flow {
            return Ok(Flow::Exit);
        }
    }
}

fn add_department(conn: &Connection) -> io::Result<Flow> {
    let Some(name) = prompt::read_line("Enter department name: ")? else {
        return Ok(Flow::Exit);
    };

    match department_service(conn).and_then(|svc| svc.add_department(&name)) {
        Ok(department) => println!("Department '{}' added successfully.", department.name),
        Err(err) => report("department_add", &err),
    }
    Ok(Flow::Continue)
}

fn update_department(conn: &Connection) -> io::Result<Flow> {
    let departments = match list_departments(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("department_update", &err);
            return Ok(Flow::Continue);
        }
    };
    if departments.is_empty() {
        println!("No departments available for updating.");
        return Ok(Flow::Continue);
    }

    let labels = department_labels(&departments);
    let index = match pick_one(
        &labels,
        "Update Department",
        "Select department to update by number: ",
    )? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };

    let Some(new_name) = prompt::read_line("Enter new department name: ")? else {
        return Ok(Flow::Exit);
    };
    match department_service(conn)
        .and_then(|svc| svc.rename_department(departments[index].id, &new_name))
    {
        Ok(()) => println!("Department updated to '{}'.", new_name.trim()),
        Err(err) => report("department_update", &err),
    }
    Ok(Flow::Continue)
}

fn delete_department(conn: &Connection) -> io::Result<Flow> {
    let departments = match list_departments(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("department_delete", &err);
            return Ok(Flow::Continue);
        }
    };
    if departments.is_empty() {
        println!("No departments available for deletion.");
        return Ok(Flow::Continue);
    }

    let labels = department_labels(&departments);
    let index = match pick_one(
        &labels,
        "Delete Department",
        "Select department to delete by number: ",
    )? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };

    match department_service(conn).and_then(|svc| svc.delete_department(departments[index].id)) {
        Ok(()) => println!(
            "Department '{}' deleted successfully.",
            departments[index].name
        ),
        Err(err) => report("department_delete", &err),
    }
    Ok(Flow::Continue)
}

fn manage_roles(conn: &mut Connection) -> io::Result<Flow> {
    loop {
        println!("\n--- Manage Roles ---");
        println!("1. Add Role");
        println!("2. Update Role");
        println!("3. Delete Role");
        println!("4. Back to Main Menu");

        let Some(line) = prompt::read_line(CHOICE_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let flow = match prompt::parse_choice(&line) {
            Some(1) => add_role(conn)?,
            Some(2) => update_role(conn)?,
            Some(3) => delete_role(conn)?,
            Some(4) => return Ok(Flow::Continue),
            _ => {
                println!("{INVALID_CHOICE}");
                Flow::Continue
            }
        };
        if let Flow::Exit = flow {
            return Ok(Flow::Exit);
        }
    }
}

fn add_role(conn: &Connection) -> io::Result<Flow> {
    let Some(title) = prompt::read_line("Enter role title: ")? else {
        return Ok(Flow::Exit);
    };

    match role_service(conn).and_then(|svc| svc.add_role(&title)) {
        Ok(role) => println!("Role '{}' added successfully.", role.title),
        Err(err) => report("role_add", &err),
    }
    Ok(Flow::Continue)
}

fn update_role(conn: &Connection) -> io::Result<Flow> {
    let roles = match list_roles(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("role_update", &err);
            return Ok(Flow::Continue);
        }
    };
    if roles.is_empty() {
        println!("No roles available for updating.");
        return Ok(Flow::Continue);
    }

    let labels = role_labels(&roles);
    let index = match pick_one(&labels, "Update Role", "Select role to update by number: ")? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };

    let Some(new_title) = prompt::read_line("Enter new role title: ")? else {
        return Ok(Flow::Exit);
    };
    match role_service(conn).and_then(|svc| svc.rename_role(roles[index].id, &new_title)) {
        Ok(()) => println!("Role updated to '{}'.", new_title.trim()),
        Err(err) => report("role_update", &err),
    }
    Ok(Flow::Continue)
}

fn delete_role(conn: &Connection) -> io::Result<Flow> {
    let roles = match list_roles(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("role_delete", &err);
            return Ok(Flow::Continue);
        }
    };
    if roles.is_empty() {
        println!("No roles available for deletion.");
        return Ok(Flow::Continue);
    }

    let labels = role_labels(&roles);
    let index = match pick_one(&labels, "Delete Role", "Select role to delete by number: ")? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };

    match role_service(conn).and_then(|svc| svc.delete_role(roles[index].id)) {
        Ok(()) => println!("Role '{}' deleted successfully.", roles[index].title),
        Err(err) => report("role_delete", &err),
    }
    Ok(Flow::Continue)
}

fn manage_employees(conn: &mut Connection) -> io::Result<Flow> {
    loop {
        println!("\n--- Manage Employees ---");
        println!("1. Add Employee");
        println!("2. Update Employee");
        println!("3. Delete Employee");
        println!("4. Back to Main Menu");

        let Some(line) = prompt::read_line(CHOICE_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let flow = match prompt::parse_choice(&line) {
            Some(1) => add_employee(conn)?,
            Some(2) => update_employee(conn)?,
            Some(3) => delete_employee(conn)?,
            Some(4) => return Ok(Flow::Continue),
            _ => {
                println!("{INVALID_CHOICE}");
                Flow::Continue
            }
        };
        if let Flow::Exit = flow {
            return Ok(Flow::Exit);
        }
    }
}

fn add_employee(conn: &mut Connection) -> io::Result<Flow> {
    let draft = match prompt_employee_draft(conn)? {
        DraftOutcome::Ready(draft) => draft,
        DraftOutcome::Aborted => return Ok(Flow::Continue),
        DraftOutcome::Eof => return Ok(Flow::Exit),
    };

    match employee_service(conn).and_then(|mut svc| svc.add_employee(&draft)) {
        Ok(employee) => println!("Employee '{}' added successfully.", employee.name),
        Err(err) => report("employee_add", &err),
    }
    Ok(Flow::Continue)
}

fn update_employee(conn: &mut Connection) -> io::Result<Flow> {
    let employees = match list_employees(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("employee_update", &err);
            return Ok(Flow::Continue);
        }
    };
    if employees.is_empty() {
        println!("No employees available for updating.");
        return Ok(Flow::Continue);
    }

    let labels = employee_labels(&employees);
    let index = match pick_one(
        &labels,
        "Update Employee",
        "Select employee to update by number: ",
    )? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };

    let draft = match prompt_employee_draft(conn)? {
        DraftOutcome::Ready(draft) => draft,
        DraftOutcome::Aborted => return Ok(Flow::Continue),
        DraftOutcome::Eof => return Ok(Flow::Exit),
    };

    match employee_service(conn).and_then(|mut svc| svc.update_employee(employees[index].id, &draft))
    {
        Ok(()) => println!("Employee updated to '{}'.", draft.name.trim()),
        Err(err) => report("employee_update", &err),
    }
    Ok(Flow::Continue)
}

fn delete_employee(conn: &mut Connection) -> io::Result<Flow> {
    let employees = match list_employees(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("employee_delete", &err);
            return Ok(Flow::Continue);
        }
    };
    if employees.is_empty() {
        println!("No employees available for deletion.");
        return Ok(Flow::Continue);
    }

    let labels = employee_labels(&employees);
    let index = match pick_one(
        &labels,
        "Delete Employee",
        "Select employee to delete by number: ",
    )? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };

    match employee_service(conn).and_then(|svc| svc.delete_employee(employees[index].id)) {
        Ok(()) => println!("Employee '{}' deleted successfully.", employees[index].name),
        Err(err) => report("employee_delete", &err),
    }
    Ok(Flow::Continue)
}

/// Collects the shared name/department/role/salary inputs for employee add
/// and update flows. Department and role are picked from the enumerated
/// current rows, so only ids that resolve at prompt time reach the draft.
fn prompt_employee_draft(conn: &Connection) -> io::Result<DraftOutcome> {
    let Some(name) = prompt::read_line("Enter employee name: ")? else {
        return Ok(DraftOutcome::Eof);
    };

    let departments = match list_departments(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("employee_write", &err);
            return Ok(DraftOutcome::Aborted);
        }
    };
    if departments.is_empty() {
        println!("No departments available to assign.");
        return Ok(DraftOutcome::Aborted);
    }
    let labels = department_labels(&departments);
    let department_id = match pick_one(&labels, "Departments", "Select department by number: ")? {
        Pick::Index(index) => departments[index].id,
        Pick::Invalid => return Ok(DraftOutcome::Aborted),
        Pick::Eof => return Ok(DraftOutcome::Eof),
    };

    let roles = match list_roles(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("employee_write", &err);
            return Ok(DraftOutcome::Aborted);
        }
    };
    if roles.is_empty() {
        println!("No roles available to assign.");
        return Ok(DraftOutcome::Aborted);
    }
    let labels = role_labels(&roles);
    let role_id = match pick_one(&labels, "Roles", "Select role by number: ")? {
        Pick::Index(index) => roles[index].id,
        Pick::Invalid => return Ok(DraftOutcome::Aborted),
        Pick::Eof => return Ok(DraftOutcome::Eof),
    };

    let Some(salary_line) = prompt::read_line("Enter salary: ")? else {
        return Ok(DraftOutcome::Eof);
    };
    let Some(salary) = prompt::parse_salary(&salary_line) else {
        eprintln!("Error: invalid salary. Please enter a valid number.");
        return Ok(DraftOutcome::Aborted);
    };

    Ok(DraftOutcome::Ready(EmployeeDraft {
        name,
        department_id,
        role_id,
        salary,
    }))
}

fn view_departments(conn: &mut Connection) -> io::Result<Flow> {
    match list_departments(conn) {
        Ok(rows) if rows.is_empty() => println!("No departments found."),
        Ok(rows) => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|d| vec![d.id.to_string(), d.name.clone()])
                .collect();
            print!("{}", table::render(&["ID", "Name"], &cells));
        }
        Err(err) => {
            report("view_departments", &err);
            return Ok(Flow::Continue);
        }
    }

    loop {
        println!("\n--- View Departments ---");
        println!("1. Back to Main Menu");
        println!("2. View Roles in a Department");
        println!("3. View Employees in a Department");

        let Some(line) = prompt::read_line(CHOICE_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let flow = match prompt::parse_choice(&line) {
            Some(1) => return Ok(Flow::Continue),
            Some(2) => view_roles_in_department(conn)?,
            Some(3) => view_employees_in_department(conn)?,
            _ => {
                println!("{INVALID_CHOICE}");
                Flow::Continue
            }
        };
        if let Flow::Exit = flow {
            return Ok(Flow::Exit);
        }
    }
}

fn view_roles_in_department(conn: &mut Connection) -> io::Result<Flow> {
    let departments = match list_departments(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("view_roles_in_department", &err);
            return Ok(Flow::Continue);
        }
    };
    if departments.is_empty() {
        println!("No departments found.");
        return Ok(Flow::Continue);
    }

    let labels = department_labels(&departments);
    let index = match pick_one(&labels, "Departments", "Select a department by number: ")? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };
    let department = &departments[index];

    match employee_service(conn).and_then(|svc| svc.list_roles_in_department(department.id)) {
        Ok(roles) if roles.is_empty() => println!("No roles found in {}.", department.name),
        Ok(roles) => {
            println!("\nRoles in {}:", department.name);
            let cells: Vec<Vec<String>> = roles
                .iter()
                .map(|r| vec![r.id.to_string(), r.title.clone()])
                .collect();
            print!("{}", table::render(&["ID", "Title"], &cells));
        }
        Err(err) => report("view_roles_in_department", &err),
    }
    Ok(Flow::Continue)
}

fn view_employees_in_department(conn: &mut Connection) -> io::Result<Flow> {
    let departments = match list_departments(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("view_employees_in_department", &err);
            return Ok(Flow::Continue);
        }
    };
    if departments.is_empty() {
        println!("No departments found.");
        return Ok(Flow::Continue);
    }

    let labels = department_labels(&departments);
    let index = match pick_one(&labels, "Departments", "Select a department by number: ")? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };
    let department = &departments[index];

    match employee_service(conn).and_then(|svc| svc.list_views_in_department(department.id)) {
        Ok(views) if views.is_empty() => {
            println!("No employees found in {}.", department.name)
        }
        Ok(views) => {
            println!("\nEmployees in {}:", department.name);
            print_employee_views(&views);
        }
        Err(err) => report("view_employees_in_department", &err),
    }
    Ok(Flow::Continue)
}

fn view_roles(conn: &mut Connection) -> io::Result<Flow> {
    match list_roles(conn) {
        Ok(rows) if rows.is_empty() => println!("No roles found."),
        Ok(rows) => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| vec![r.id.to_string(), r.title.clone()])
                .collect();
            print!("{}", table::render(&["ID", "Title"], &cells));
        }
        Err(err) => {
            report("view_roles", &err);
            return Ok(Flow::Continue);
        }
    }

    loop {
        println!("\n--- View Roles ---");
        println!("1. Back to Main Menu");
        println!("2. View Employees with a Role");

        let Some(line) = prompt::read_line(CHOICE_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let flow = match prompt::parse_choice(&line) {
            Some(1) => return Ok(Flow::Continue),
            Some(2) => view_employees_with_role(conn)?,
            _ => {
                println!("{INVALID_CHOICE}");
                Flow::Continue
            }
        };
        if let Flow::Exit = flow {
            return Ok(Flow::Exit);
        }
    }
}

fn view_employees_with_role(conn: &mut Connection) -> io::Result<Flow> {
    let roles = match list_roles(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("view_employees_with_role", &err);
            return Ok(Flow::Continue);
        }
    };
    if roles.is_empty() {
        println!("No roles found.");
        return Ok(Flow::Continue);
    }

    let labels = role_labels(&roles);
    let index = match pick_one(&labels, "Roles", "Select a role by number: ")? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };
    let role = &roles[index];

    match employee_service(conn).and_then(|svc| svc.list_views_with_role(role.id)) {
        Ok(views) if views.is_empty() => println!("No employees found with role {}.", role.title),
        Ok(views) => {
            println!("\nEmployees with role {}:", role.title);
            print_employee_views(&views);
        }
        Err(err) => report("view_employees_with_role", &err),
    }
    Ok(Flow::Continue)
}

fn view_employees(conn: &mut Connection) -> io::Result<Flow> {
    match employee_service(conn).and_then(|svc| svc.list_employee_views()) {
        Ok(views) if views.is_empty() => println!("No employees found."),
        Ok(views) => print_employee_views(&views),
        Err(err) => {
            report("view_employees", &err);
            return Ok(Flow::Continue);
        }
    }

    loop {
        println!("\n--- View Employees ---");
        println!("1. Back to Main Menu");
        println!("2. View Employee Details");

        let Some(line) = prompt::read_line(CHOICE_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        let flow = match prompt::parse_choice(&line) {
            Some(1) => return Ok(Flow::Continue),
            Some(2) => view_employee_details(conn)?,
            _ => {
                println!("{INVALID_CHOICE}");
                Flow::Continue
            }
        };
        if let Flow::Exit = flow {
            return Ok(Flow::Exit);
        }
    }
}

fn view_employee_details(conn: &mut Connection) -> io::Result<Flow> {
    let employees = match list_employees(conn) {
        Ok(rows) => rows,
        Err(err) => {
            report("view_employee_details", &err);
            return Ok(Flow::Continue);
        }
    };
    if employees.is_empty() {
        println!("No employees available.");
        return Ok(Flow::Continue);
    }

    let labels = employee_labels(&employees);
    let index = match pick_one(
        &labels,
        "View Employee Details",
        "Select employee to view details by number: ",
    )? {
        Pick::Index(index) => index,
        Pick::Invalid => return Ok(Flow::Continue),
        Pick::Eof => return Ok(Flow::Exit),
    };

    match employee_service(conn).and_then(|svc| svc.get_employee_view(employees[index].id)) {
        Ok(Some(view)) => {
            println!("Name: {}", view.name);
            println!("Department: {}", view.department);
            println!("Role: {}", view.role);
            println!("Salary: {:.2}", view.salary);
        }
        Ok(None) => println!("Employee no longer exists."),
        Err(err) => report("view_employee_details", &err),
    }
    Ok(Flow::Continue)
}

fn print_employee_views(views: &[EmployeeView]) {
    let cells: Vec<Vec<String>> = views
        .iter()
        .map(|v| {
            vec![
                v.id.to_string(),
                v.name.clone(),
                v.department.clone(),
                v.role.clone(),
                format!("{:.2}", v.salary),
            ]
        })
        .collect();
    print!(
        "{}",
        table::render(&["ID", "Name", "Department", "Role", "Salary"], &cells)
    );
}

/// Prints an enumerated list under a heading and reads a 1-based pick.
fn pick_one(labels: &[String], title: &str, label: &str) -> io::Result<Pick> {
    println!("\n--- {title} ---");
    for (i, item) in labels.iter().enumerate() {
        println!("{}. {}", i + 1, item);
    }

    let Some(line) = prompt::read_line(label)? else {
        return Ok(Pick::Eof);
    };
    match prompt::parse_selection(&line, labels.len()) {
        Some(index) => Ok(Pick::Index(index)),
        None => {
            println!("Invalid selection.");
            Ok(Pick::Invalid)
        }
    }
}

fn department_labels(departments: &[Department]) -> Vec<String> {
    departments.iter().map(|d| d.name.clone()).collect()
}

fn role_labels(roles: &[Role]) -> Vec<String> {
    roles.iter().map(|r| r.title.clone()).collect()
}

fn employee_labels(employees: &[Employee]) -> Vec<String> {
    employees.iter().map(|e| e.name.clone()).collect()
}

fn department_service(
    conn: &Connection,
) -> RepoResult<DepartmentService<SqliteDepartmentRepository<'_>>> {
    Ok(DepartmentService::new(SqliteDepartmentRepository::try_new(
        conn,
    )?))
}

fn role_service(conn: &Connection) -> RepoResult<RoleService<SqliteRoleRepository<'_>>> {
    Ok(RoleService::new(SqliteRoleRepository::try_new(conn)?))
}

fn employee_service(
    conn: &mut Connection,
) -> RepoResult<EmployeeService<SqliteEmployeeRepository<'_>>> {
    Ok(EmployeeService::new(SqliteEmployeeRepository::try_new(
        conn,
    )?))
}

fn list_departments(conn: &Connection) -> RepoResult<Vec<Department>> {
    department_service(conn)?.list_departments()
}

fn list_roles(conn: &Connection) -> RepoResult<Vec<Role>> {
    role_service(conn)?.list_roles()
}

fn list_employees(conn: &mut Connection) -> RepoResult<Vec<Employee>> {
    employee_service(conn)?.list_employees()
}

/// Logs and prints one recoverable shell-boundary error.
fn report(action: &str, err: &RepoError) {
    warn!("event=menu_action module=cli status=error action={action} error={err}");
    eprintln!("Error: {err}");
}
