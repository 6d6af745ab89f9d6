//! User storage provider tests.

use ems_api::{Endpoint, Principal};
use ems_auth::{
    AuthError, CredentialValidator, HashedPasswordMode, PasswordHasherService,
    UserStorageProvider,
};
use ems_integration_tests::TestEnv;
use ems_model::{roles, NewEmployee, Permission};

#[tokio::test]
async fn simulated_mode_accepts_only_the_known_pair() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let provider = env.provider(HashedPasswordMode::Simulated);

    assert!(provider.validate_password("user2@company.com", "password123").await?);
    assert!(!provider.validate_password("user2@company.com", "wrongpassword").await?);
    assert!(!provider.validate_password("nonexistent@test.com", "anypassword").await?);
    assert!(!provider.validate_password("sarah@company.com", "password123").await?);
    assert!(provider.validate_password("david@company.com", "david123").await?);

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn bcrypt_mode_verifies_real_hashes() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let hash = bcrypt::hash("s3cret!", 4)?;
    env.service()
        .create(
            &TestEnv::admin(),
            &NewEmployee::new("Bea Crypt", "bea@company.com", hash, roles::EMPLOYEE),
        )
        .await?;

    let provider = env.provider(HashedPasswordMode::Bcrypt);
    assert!(provider.validate_password("bea@company.com", "s3cret!").await?);
    assert!(!provider.validate_password("bea@company.com", "secret").await?);
    assert!(!provider.validate_password("user2@company.com", "password123").await?);

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn argon2_hashes_work_in_either_mode() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let hash = PasswordHasherService::with_defaults().hash("correct horse")?;
    env.service()
        .create(
            &TestEnv::admin(),
            &NewEmployee::new("Ari Gon", "ari@company.com", hash, roles::MANAGER),
        )
        .await?;

    for mode in [HashedPasswordMode::Simulated, HashedPasswordMode::Bcrypt] {
        let provider = env.provider(mode);
        let session = provider.authenticate("ari@company.com", "correct horse").await?;
        assert_eq!(session.attributes.first_name, "Ari");
        assert!(matches!(
            provider.authenticate("ari@company.com", "wrong horse").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn authentication_builds_attributes_and_claims() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let provider = env.provider(HashedPasswordMode::Simulated);

    let session = provider.authenticate("user2@company.com", "password123").await?;
    let attributes = &session.attributes;
    assert_eq!(attributes.username, "user2@company.com");
    assert_eq!(attributes.first_name, "Michael");
    assert_eq!(attributes.last_name, "Johnson");
    assert_eq!(attributes.department.as_deref(), Some("IT"));
    assert_eq!(attributes.roles, vec!["READ_EMPLOYEES"]);

    let claims = &session.claims;
    assert_eq!(claims.sub, "user2@company.com");
    assert_eq!(claims.name, "Michael Johnson");
    assert_eq!(claims.realm_access.roles, vec!["READ_EMPLOYEES"]);
    assert_eq!(
        claims.resource_access["employee-api-client"].roles,
        vec!["CLIENT_READ", "CLIENT_WRITE"]
    );

    // Client roles in the token open the write endpoints.
    let caller = Principal::from_claims(claims);
    assert!(caller.has_permission(Permission::ClientWrite));
    assert!(caller.authorize(Endpoint::DeleteEmployee).is_ok());

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn failed_logins_short_circuit() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let provider = env.provider(HashedPasswordMode::Simulated);

    let err = provider
        .authenticate("nonexistent@test.com", "anypassword")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
    assert_eq!(err.to_string(), "User not found");

    let err = provider
        .authenticate("emily@company.com", "nope")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid password");

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn lookups_by_storage_id_username_and_email_agree() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let provider = env.provider(HashedPasswordMode::Simulated);

    let by_email = provider
        .get_user_by_email("sarah@company.com")
        .await?
        .expect("seeded employee");
    let storage_id = by_email.storage_id().to_string();
    assert_eq!(storage_id, "f:employee-user-storage:sarah@company.com");

    let by_id = provider.get_user_by_id(&storage_id).await?.expect("same employee");
    let by_username = provider
        .get_user_by_username("sarah@company.com")
        .await?
        .expect("same employee");
    assert_eq!(by_id.employee().id, by_email.employee().id);
    assert_eq!(by_username.employee().id, by_email.employee().id);
    assert_eq!(
        by_email.permissions(),
        &[
            Permission::ReadEmployees,
            Permission::CreateEmployees,
            Permission::UpdateEmployees,
            Permission::DeleteEmployees,
        ]
    );

    assert!(provider.get_user_by_email("ghost@company.com").await?.is_none());

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn credential_validation_surface() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let provider = env.provider(HashedPasswordMode::Simulated);
    let user = provider
        .get_user_by_email("david@company.com")
        .await?
        .expect("seeded employee");

    assert!(provider.supports_credential_type("password"));
    assert!(!provider.supports_credential_type("otp"));
    assert!(provider.is_configured_for(&user, "password").await?);
    assert!(!provider.is_configured_for(&user, "otp").await?);
    assert!(provider.is_valid(&user, "password", "david123").await?);
    assert!(!provider.is_valid(&user, "password", "david124").await?);
    assert!(!provider.is_valid(&user, "otp", "david123").await?);

    env.close().await;
    Ok(())
}

#[tokio::test]
async fn counts_by_exact_email() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let provider = env.provider(HashedPasswordMode::Simulated);

    assert_eq!(provider.count_by_email("user2@company.com").await?, 1);
    assert_eq!(provider.count_by_email("user2@company").await?, 0);
    assert_eq!(provider.count_by_email("nonexistent@test.com").await?, 0);

    env.close().await;
    Ok(())
}
