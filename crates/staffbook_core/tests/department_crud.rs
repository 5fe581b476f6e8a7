use rusqlite::Connection;
use staffbook_core::db::open_db_in_memory;
use staffbook_core::{
    DepartmentRepository, DepartmentService, RepoError, SqliteDepartmentRepository,
    SqliteEmployeeRepository, SqliteRoleRepository, ValidationError,
};
use staffbook_core::{EmployeeDraft, EmployeeRepository, RoleRepository};

#[test]
fn add_then_list_contains_exactly_one_row_with_fresh_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let created = repo.create_department("Engineering").unwrap();
    assert!(created.id > 0);

    let all = repo.list_departments().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Engineering");
    assert_eq!(all[0].id, created.id);
}

#[test]
fn duplicate_name_is_rejected_and_count_is_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    repo.create_department("Engineering").unwrap();
    let err = repo.create_department("Engineering").unwrap_err();
    assert!(matches!(
        err,
        RepoError::DuplicateName { entity: "department", .. }
    ));

    assert_eq!(repo.list_departments().unwrap().len(), 1);
}

#[test]
fn create_trims_name_and_rejects_blank_input() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let created = repo.create_department("  Sales ").unwrap();
    assert_eq!(created.name, "Sales");

    let err = repo.create_department("   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyDepartmentName)
    ));
}

#[test]
fn rename_then_list_shows_new_name_and_drops_old_one() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let created = repo.create_department("Suport").unwrap();
    repo.rename_department(created.id, "Support").unwrap();

    let names: Vec<String> = repo
        .list_departments()
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Support".to_string()]);
}

#[test]
fn rename_missing_department_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let err = repo.rename_department(404, "Anything").unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "department", id: 404 }
    ));
}

#[test]
fn rename_to_taken_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    repo.create_department("Engineering").unwrap();
    let sales = repo.create_department("Sales").unwrap();

    let err = repo.rename_department(sales.id, "Engineering").unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName { .. }));
}

#[test]
fn delete_then_list_no_longer_contains_the_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let created = repo.create_department("Engineering").unwrap();
    repo.delete_department(created.id).unwrap();

    assert!(repo.list_departments().unwrap().is_empty());
    assert!(repo.get_department(created.id).unwrap().is_none());
}

#[test]
fn delete_missing_department_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let err = repo.delete_department(404).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn delete_referenced_department_is_restricted() {
    let mut conn = open_db_in_memory().unwrap();
    let department_id = seed_employee(&mut conn);

    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();
    let err = repo.delete_department(department_id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::InUse { entity: "department", .. }
    ));

    // The restricted delete must leave the row in place.
    assert!(repo.get_department(department_id).unwrap().is_some());
}

#[test]
fn find_by_name_resolves_the_natural_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let created = repo.create_department("Engineering").unwrap();

    let found = repo
        .find_department_by_name(" Engineering ")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert!(repo.find_department_by_name("Missing").unwrap().is_none());
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = DepartmentService::new(SqliteDepartmentRepository::try_new(&conn).unwrap());

    let created = service.add_department("Engineering").unwrap();
    service.rename_department(created.id, "Platform").unwrap();

    let listed = service.list_departments().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Platform");

    service.delete_department(created.id).unwrap();
    assert!(service.list_departments().unwrap().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteDepartmentRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

fn seed_employee(conn: &mut Connection) -> i64 {
    let department_id = {
        let repo = SqliteDepartmentRepository::try_new(conn).unwrap();
        repo.create_department("Engineering").unwrap().id
    };
    let role_id = {
        let repo = SqliteRoleRepository::try_new(conn).unwrap();
        repo.create_role("Engineer").unwrap().id
    };
    let mut repo = SqliteEmployeeRepository::try_new(conn).unwrap();
    let draft = EmployeeDraft {
        name: "Jane Doe".to_string(),
        department_id,
        role_id,
        salary: 50_000.0,
    };
    repo.create_employee(&draft).unwrap();
    department_id
}
