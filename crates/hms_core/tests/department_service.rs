use hms_core::db::open_db_in_memory;
use hms_core::{DepartmentService, DepartmentServiceError, SqliteDepartmentRepository};

#[test]
fn create_trims_and_lists_departments_by_id() {
    let conn = open_db_in_memory().unwrap();
    let service = DepartmentService::new(SqliteDepartmentRepository::try_new(&conn).unwrap());

    service.create_department(" DEP-NEUR ", " Neurology ").unwrap();
    service.create_department("DEP-CARD", "Cardiology").unwrap();

    let listed = service.list_departments().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, "DEP-CARD");
    assert_eq!(listed[1].id, "DEP-NEUR");
    assert_eq!(listed[1].name, "Neurology");
    assert!(service.verify_department_id("DEP-NEUR").unwrap());
    assert!(!service.verify_department_id("DEP-NONE").unwrap());
}

#[test]
fn create_rejects_blank_fields_and_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let service = DepartmentService::new(SqliteDepartmentRepository::try_new(&conn).unwrap());

    assert!(matches!(
        service.create_department("  ", "Cardiology").unwrap_err(),
        DepartmentServiceError::BlankField("id")
    ));
    assert!(matches!(
        service.create_department("DEP-CARD", "").unwrap_err(),
        DepartmentServiceError::BlankField("name")
    ));

    service.create_department("DEP-CARD", "Cardiology").unwrap();
    assert!(matches!(
        service.create_department("DEP-CARD", "Cardiac care").unwrap_err(),
        DepartmentServiceError::DuplicateDepartment(_)
    ));
    let stored = service.get_department("DEP-CARD").unwrap().unwrap();
    assert_eq!(stored.name, "Cardiology");
}
