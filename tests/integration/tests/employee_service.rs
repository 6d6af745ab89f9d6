//! Employee service tests.

use ems_api::{ApiError, LoginRequest, Principal};
use ems_auth::{HashedPasswordMode, MOCK_BEARER_TOKEN};
use ems_integration_tests::TestEnv;
use ems_model::{roles, EmployeeUpdate, NewEmployee};
use ems_storage::{EmployeeProvider, EmployeeSearchCriteria};
use http::StatusCode;

fn new_hire(name: &str, email: &str) -> NewEmployee {
    NewEmployee::new(name, email, "welcome1", roles::EMPLOYEE).with_department("QA")
}

#[tokio::test]
async fn search_is_newest_first_and_matches_every_filter() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let service = env.service();
    let admin = TestEnv::admin();

    let first = service.create(&admin, &new_hire("Quinn Tester", "quinn@company.com")).await?;
    let second = service.create(&admin, &new_hire("Quentin Tester", "quentin@company.com")).await?;

    let all = service.search(&admin, &EmployeeSearchCriteria::new()).await?;
    assert_eq!(all.len(), 7);
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let criteria = EmployeeSearchCriteria::new().name("tester").email("qu").department("qa");
    let found = service.search(&admin, &criteria).await?;
    assert_eq!(found.len(), 2);

    // The SQL filters agree with in-memory matching on every row.
    let everyone = env.store.employees().search(&EmployeeSearchCriteria::new()).await?;
    for criteria in [
        criteria,
        EmployeeSearchCriteria::new().role("employee"),
        EmployeeSearchCriteria::new().department("i").email("company"),
        EmployeeSearchCriteria::new().name("CHEN"),
        EmployeeSearchCriteria::new().name("%"),
    ] {
        let expected: Vec<_> = everyone
            .iter()
            .filter(|e| criteria.matches(e))
            .map(|e| e.id)
            .collect();
        let found: Vec<_> = service
            .search(&admin, &criteria)
            .await?
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(found, expected, "{criteria:?}");
    }

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn wildcards_in_filters_match_literally() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let service = env.service();
    let admin = TestEnv::admin();

    let none = service
        .search(&admin, &EmployeeSearchCriteria::new().name("%"))
        .await?;
    assert!(none.is_empty());

    service
        .create(&admin, &new_hire("Percent 100% Sure", "percent@company.com"))
        .await?;
    let one = service
        .search(&admin, &EmployeeSearchCriteria::new().name("100%"))
        .await?;
    assert_eq!(one.len(), 1);

    let blank = service
        .search(&admin, &EmployeeSearchCriteria::new().department("  "))
        .await?;
    assert_eq!(blank.len(), 6);

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn duplicate_email_never_creates_a_second_row() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let service = env.service();
    let admin = TestEnv::admin();

    let err = service
        .create(&admin, &new_hire("Another Sarah", "sarah@company.com"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Employee with email sarah@company.com already exists");
    assert_eq!(env.store.employees().count_by_email("sarah@company.com").await?, 1);

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn update_checks_email_and_changes_password() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let service = env.service();
    let manager = Principal::from_role("david@company.com", roles::MANAGER);

    let emily = env
        .store
        .employees()
        .get_by_email("emily@company.com")
        .await?
        .expect("seeded employee");

    let mut update = EmployeeUpdate::from_existing(&emily);
    update.email = "admin@company.com".to_string();
    let err = service.update(&manager, emily.id, &update).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    let mut update = EmployeeUpdate::from_existing(&emily);
    update.department = Some("Engineering".to_string());
    update.password = Some("newpass456".to_string());
    let updated = service.update(&manager, emily.id, &update).await?;
    assert_eq!(updated.department.as_deref(), Some("Engineering"));
    assert_eq!(updated.email, "emily@company.com");

    let provider = env.provider(HashedPasswordMode::Simulated);
    assert!(provider.validate_password("emily@company.com", "newpass456").await?);
    assert!(!provider.validate_password("emily@company.com", "emily123").await?);

    let mut blank = EmployeeUpdate::from_existing(&emily);
    blank.password = Some("   ".to_string());
    service.update(&manager, emily.id, &blank).await?;
    assert!(provider.validate_password("emily@company.com", "newpass456").await?);

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn delete_respects_permissions_and_missing_ids() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let service = env.service();
    let manager = Principal::from_role("david@company.com", roles::MANAGER);
    let hr = Principal::from_role("sarah@company.com", roles::HR);

    let err = service.delete(&manager, 5).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    service.delete(&hr, 5).await?;
    let err = service.get_by_id(&hr, 5).await.unwrap_err();
    assert_eq!(err.to_string(), "Employee not found with ID: 5");

    let err = service.delete(&hr, 5).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn create_many_skips_existing_and_repeated_emails() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let service = env.service();
    let admin = TestEnv::admin();

    let batch = [
        new_hire("Fresh One", "fresh1@company.com"),
        new_hire("Existing", "david@company.com"),
        new_hire("Fresh Two", "fresh2@company.com"),
        new_hire("Fresh One Again", "fresh1@company.com"),
    ];
    let created = service.create_many(&admin, &batch).await?;

    let emails: Vec<_> = created.iter().map(|e| e.email.as_str()).collect();
    assert_eq!(emails, vec!["fresh1@company.com", "fresh2@company.com"]);
    assert_eq!(service.count(&admin).await?, 7);

    let hr = Principal::from_role("sarah@company.com", roles::HR);
    assert!(matches!(
        service.create_many(&hr, &batch).await,
        Err(ApiError::Forbidden(_))
    ));

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn bulk_upload_imports_new_rows_from_csv() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let service = env.service();
    let admin = TestEnv::admin();

    let csv = "\
Name,Email,Department,Phone,Password,Role
Lena Ortiz,lena@company.com,Finance,5550102030,lena123,EMPLOYEE
Too Short,short@company.com
David Again,david@company.com,Engineering,,david456,MANAGER
  Raj Patel  ,  raj@company.com  ,  ,  ,  raj123  ,  HR  
";
    let created = service.bulk_upload(&admin, csv.as_bytes()).await?;

    let emails: Vec<_> = created.iter().map(|e| e.email.as_str()).collect();
    assert_eq!(emails, vec!["lena@company.com", "raj@company.com"]);
    assert_eq!(created[1].name, "Raj Patel");
    assert_eq!(created[1].role, "HR");
    assert_eq!(created[1].department, None);
    assert_eq!(service.count(&admin).await?, 7);

    // Imported passwords are hashed and still log in; the skipped row left David alone.
    let provider = env.provider(HashedPasswordMode::Simulated);
    assert!(provider.validate_password("lena@company.com", "lena123").await?);
    assert!(provider.validate_password("raj@company.com", "raj123").await?);
    assert!(provider.validate_password("david@company.com", "david123").await?);

    let again = service.bulk_upload(&admin, csv.as_bytes()).await?;
    assert!(again.is_empty());

    let manager = Principal::from_role("david@company.com", roles::MANAGER);
    let err = service.bulk_upload(&manager, csv.as_bytes()).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn login_only_needs_a_known_email() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let service = env.service();

    let response = service
        .login(&LoginRequest::new("user2@company.com", "password123"))
        .await?;
    assert!(response.success);
    assert_eq!(response.token.as_deref(), Some(MOCK_BEARER_TOKEN));

    let err = service
        .login(&LoginRequest::new("nobody@company.com", "password123"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn roles_in_use_are_listed_once() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let roles = env.service().distinct_roles(&TestEnv::admin()).await?;
    assert_eq!(roles, vec!["ADMIN", "EMPLOYEE", "HR", "MANAGER"]);
    env.close().await;
    Ok(())
}
