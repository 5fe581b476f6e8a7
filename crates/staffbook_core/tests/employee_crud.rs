use rusqlite::Connection;
use staffbook_core::db::open_db_in_memory;
use staffbook_core::{
    DepartmentRepository, EmployeeDraft, EmployeeRepository, EmployeeService, RepoError,
    RoleRepository, SqliteDepartmentRepository, SqliteEmployeeRepository, SqliteRoleRepository,
    ValidationError,
};

struct Refs {
    department_id: i64,
    role_id: i64,
}

fn seed_refs(conn: &Connection) -> Refs {
    let department_id = SqliteDepartmentRepository::try_new(conn)
        .unwrap()
        .create_department("Engineering")
        .unwrap()
        .id;
    let role_id = SqliteRoleRepository::try_new(conn)
        .unwrap()
        .create_role("Engineer")
        .unwrap()
        .id;
    Refs {
        department_id,
        role_id,
    }
}

fn draft(name: &str, refs: &Refs, salary: f64) -> EmployeeDraft {
    EmployeeDraft {
        name: name.to_string(),
        department_id: refs.department_id,
        role_id: refs.role_id,
        salary,
    }
}

#[test]
fn create_and_list_roundtrip_resolves_references() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();
    let created = repo
        .create_employee(&draft("Jane Doe", &refs, 50_000.0))
        .unwrap();
    assert!(created.id > 0);

    let all = repo.list_employees().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Jane Doe");
    assert_eq!(all[0].salary, 50_000.0);
    assert_eq!(all[0].department_id, refs.department_id);
    assert_eq!(all[0].role_id, refs.role_id);

    let view = repo.get_employee_view(created.id).unwrap().unwrap();
    assert_eq!(view.department, "Engineering");
    assert_eq!(view.role, "Engineer");
}

#[test]
fn unresolved_department_reference_creates_no_row() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();
    let bad = EmployeeDraft {
        department_id: refs.department_id + 999,
        ..draft("Jane Doe", &refs, 50_000.0)
    };

    let err = repo.create_employee(&bad).unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference { entity: "department", .. }
    ));
    assert!(repo.list_employees().unwrap().is_empty());
}

#[test]
fn unresolved_role_reference_creates_no_row() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();
    let bad = EmployeeDraft {
        role_id: refs.role_id + 999,
        ..draft("Jane Doe", &refs, 50_000.0)
    };

    let err = repo.create_employee(&bad).unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference { entity: "role", .. }
    ));
    assert!(repo.list_employees().unwrap().is_empty());
}

#[test]
fn invalid_name_or_salary_blocks_the_write() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();

    let err = repo
        .create_employee(&draft("John3", &refs, 50_000.0))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidEmployeeName(_))
    ));

    for salary in [-10.0, 0.0] {
        let err = repo
            .create_employee(&draft("Jane Doe", &refs, salary))
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::InvalidSalary(_))
        ));
    }

    assert!(repo.list_employees().unwrap().is_empty());
}

#[test]
fn create_stores_the_trimmed_name() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();
    let created = repo
        .create_employee(&draft("  Jane Doe ", &refs, 50_000.0))
        .unwrap();

    assert_eq!(created.name, "Jane Doe");
    let loaded = repo.get_employee(created.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Jane Doe");
}

#[test]
fn update_applies_validation_and_resolution_rules() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();
    let created = repo
        .create_employee(&draft("Jane Doe", &refs, 50_000.0))
        .unwrap();

    // Unresolvable role leaves the original row untouched.
    let bad = EmployeeDraft {
        role_id: refs.role_id + 999,
        ..draft("Jane Roe", &refs, 60_000.0)
    };
    let err = repo.update_employee(created.id, &bad).unwrap_err();
    assert!(matches!(err, RepoError::MissingReference { .. }));
    let unchanged = repo.get_employee(created.id).unwrap().unwrap();
    assert_eq!(unchanged.name, "Jane Doe");
    assert_eq!(unchanged.salary, 50_000.0);

    repo.update_employee(created.id, &draft("Jane Roe", &refs, 60_000.0))
        .unwrap();
    let updated = repo.get_employee(created.id).unwrap().unwrap();
    assert_eq!(updated.name, "Jane Roe");
    assert_eq!(updated.salary, 60_000.0);
}

#[test]
fn update_missing_employee_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();
    let err = repo
        .update_employee(404, &draft("Jane Doe", &refs, 50_000.0))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "employee", id: 404 }
    ));
}

#[test]
fn delete_then_list_no_longer_contains_the_row() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();
    let created = repo
        .create_employee(&draft("Jane Doe", &refs, 50_000.0))
        .unwrap();

    repo.delete_employee(created.id).unwrap();
    assert!(repo.list_employees().unwrap().is_empty());

    let err = repo.delete_employee(created.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn drilldown_views_filter_by_department_and_role() {
    let mut conn = open_db_in_memory().unwrap();

    let engineering = SqliteDepartmentRepository::try_new(&conn)
        .unwrap()
        .create_department("Engineering")
        .unwrap()
        .id;
    let sales = SqliteDepartmentRepository::try_new(&conn)
        .unwrap()
        .create_department("Sales")
        .unwrap()
        .id;
    let engineer = SqliteRoleRepository::try_new(&conn)
        .unwrap()
        .create_role("Engineer")
        .unwrap()
        .id;
    let manager = SqliteRoleRepository::try_new(&conn)
        .unwrap()
        .create_role("Manager")
        .unwrap()
        .id;

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();
    for (name, department_id, role_id) in [
        ("Jane Doe", engineering, engineer),
        ("John Smith", engineering, manager),
        ("Ada Jones", sales, manager),
    ] {
        repo.create_employee(&EmployeeDraft {
            name: name.to_string(),
            department_id,
            role_id,
            salary: 40_000.0,
        })
        .unwrap();
    }

    let in_engineering = repo.list_views_in_department(engineering).unwrap();
    assert_eq!(in_engineering.len(), 2);
    assert!(in_engineering.iter().all(|v| v.department == "Engineering"));

    let managers = repo.list_views_with_role(manager).unwrap();
    assert_eq!(managers.len(), 2);
    assert!(managers.iter().all(|v| v.role == "Manager"));

    let roles_in_engineering = repo.list_roles_in_department(engineering).unwrap();
    let titles: Vec<&str> = roles_in_engineering
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Engineer", "Manager"]);

    assert!(repo.list_roles_in_department(sales + 999).unwrap().is_empty());
}

#[test]
fn employee_view_serializes_with_stable_field_names() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut repo = SqliteEmployeeRepository::try_new(&mut conn).unwrap();
    let created = repo
        .create_employee(&draft("Jane Doe", &refs, 50_000.0))
        .unwrap();
    let view = repo.get_employee_view(created.id).unwrap().unwrap();

    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["name"], "Jane Doe");
    assert_eq!(value["department"], "Engineering");
    assert_eq!(value["role"], "Engineer");
    assert_eq!(value["salary"], 50_000.0);
}

#[test]
fn service_wraps_repository_calls() {
    let mut conn = open_db_in_memory().unwrap();
    let refs = seed_refs(&conn);

    let mut service =
        EmployeeService::new(SqliteEmployeeRepository::try_new(&mut conn).unwrap());

    let created = service
        .add_employee(&draft("Jane Doe", &refs, 50_000.0))
        .unwrap();

    let views = service.list_employee_views().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].name, "Jane Doe");

    service.delete_employee(created.id).unwrap();
    assert!(service.list_employees().unwrap().is_empty());
}
